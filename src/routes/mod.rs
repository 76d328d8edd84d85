pub mod auth_routes;
pub mod customer_routes;
pub mod order_routes;
pub mod part_routes;
pub mod task_routes;
pub mod vehicle_routes;
