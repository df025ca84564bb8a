pub mod analyzer;
pub mod health_route;
