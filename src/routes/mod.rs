pub mod page_routes;
pub mod views;
