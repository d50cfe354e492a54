//! Command handler context and the handler trait.

use super::middleware::ResponseMiddleware;
use crate::error::{HandlerError, HandlerResult};
use crate::state::Matrix;
use async_trait::async_trait;
use slirc_proto::Message;
use std::sync::Arc;

/// Handler context passed to each command handler.
pub struct Context<'a> {
    /// UID of the client (local or relayed) that issued the command.
    pub uid: &'a str,
    /// Shared server state.
    pub matrix: &'a Arc<Matrix>,
    /// Sender for outgoing messages to this client.
    pub sender: ResponseMiddleware<'a>,
    /// Wall-clock seconds at dispatch.
    pub now: i64,
}

impl<'a> Context<'a> {
    /// Create a new context stamped with the current time.
    pub fn new(uid: &'a str, matrix: &'a Arc<Matrix>, sender: ResponseMiddleware<'a>) -> Self {
        Self {
            uid,
            matrix,
            sender,
            now: chrono::Utc::now().timestamp(),
        }
    }

    /// Build and send a server reply in one call.
    #[inline]
    pub async fn send_reply(
        &self,
        response: slirc_proto::Response,
        params: Vec<String>,
    ) -> Result<(), HandlerError> {
        use crate::handlers::helpers::server_reply;
        let reply = server_reply(&self.matrix.server_info.name, response, params);
        self.sender.send(reply).await?;
        Ok(())
    }
}

/// A command handler.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult;
}
