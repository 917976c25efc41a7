//! Page controllers
//!
//! Orchestrate gateway calls for the server-rendered pages.

pub mod checklist_controller;
pub mod checklist_form;
pub mod dashboard_controller;
