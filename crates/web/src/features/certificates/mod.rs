pub mod archive;
pub mod handlers;
pub mod routes;
pub mod services;
