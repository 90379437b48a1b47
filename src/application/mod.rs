// Application layer - use cases shared by the MCP server and the CLI.
// Services return typed results; turning them into text is `render`'s job.

pub mod error;
pub mod reporting;
pub mod service;

pub use error::*;
pub use reporting::*;
pub use service::*;
