pub mod ai_analyze_batch_route;
pub mod ai_analyze_package_route;
pub mod ai_analyze_route;
pub mod analyze_route;
pub mod analyzer_request;
pub mod analyzer_response;
pub mod models_route;
