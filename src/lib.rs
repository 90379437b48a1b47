pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod io;
pub mod logging;
pub mod mcp;
pub mod render;
pub mod storage;

pub use domain::*;
pub use storage::Repository;
