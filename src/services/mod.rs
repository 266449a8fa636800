//! Backend access and gateway logic.

pub mod backend;
pub mod dashboard;
pub mod node_logs;
pub mod normalize;
pub mod resources;
