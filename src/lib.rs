// Library exports for Foodshare
// This allows integration tests and external code to use Foodshare modules

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod render;
pub mod routes;
pub mod state;
