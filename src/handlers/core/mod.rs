//! Handler plumbing shared by every command.

mod context;
mod middleware;

pub use context::{Context, Handler};
pub use middleware::ResponseMiddleware;
