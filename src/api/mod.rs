//! API module - HTTP routes, handlers, wire models and streaming emulation

pub mod handlers;
pub mod models;
pub mod routes;
pub mod stream;
