//! CI gateway: backend-for-frontend for a Jenkins CI dashboard.
//!
//! Two halves: CRUD over the `server_nodes` credential table, and a thin
//! proxy that reshapes the Jenkins REST API into UI-friendly JSON.

pub mod config;
pub mod errors;
pub mod handlers;
pub mod jenkins;
pub mod middleware;
pub mod models;
pub mod repository;

use actix_web::web;

/// Registers every route group on an actix `App`.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    handlers::node_handlers::configure(cfg);
    handlers::view_handlers::configure(cfg);
    handlers::job_handlers::configure(cfg);
    handlers::console_handlers::configure(cfg);
    handlers::auth_handlers::configure(cfg);
}
