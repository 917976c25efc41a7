//! Derived figures for the dashboard.

pub mod kpi;
pub mod trend_chart;
