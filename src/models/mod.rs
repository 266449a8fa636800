//! Domain types shared by routes and services.

pub mod node_log;
pub mod resource;
