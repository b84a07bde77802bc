pub mod api_route;
pub mod health_check_route;
pub mod home_route;
