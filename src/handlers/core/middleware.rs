//! Response middleware for routing handler responses.
//!
//! Supports both direct forwarding to connection sender and capturing
//! for callers that want the whole reply at once.
//!
//! # SendQ Overflow Protection
//!
//! When the outgoing message queue is full (slow consumer), the send gives up
//! after [`SEND_TIMEOUT`] and the error is propagated to the handler.

use slirc_proto::{Command, Message};
use std::time::Duration;
use tokio::sync::{Mutex, mpsc};

/// Timeout for attempting to send to a slow consumer before giving up.
const SEND_TIMEOUT: Duration = Duration::from_secs(5);

/// Middleware for routing handler responses.
/// Direct forwards to the connection sender; Capturing buffers every line.
#[derive(Clone)]
pub enum ResponseMiddleware<'a> {
    Direct(&'a mpsc::Sender<Message>),
    Capturing(&'a Mutex<Vec<Message>>),
}

impl<'a> ResponseMiddleware<'a> {
    /// Send or buffer a message depending on middleware mode.
    pub async fn send(&self, msg: Message) -> Result<(), mpsc::error::SendError<Message>> {
        match self {
            Self::Direct(tx) => match tokio::time::timeout(SEND_TIMEOUT, tx.send(msg)).await {
                Ok(result) => result,
                Err(_timeout) => {
                    tracing::warn!(
                        "SendQ overflow: client not reading (timeout after {:?})",
                        SEND_TIMEOUT
                    );
                    Err(mpsc::error::SendError(Message {
                        prefix: None,
                        command: Command::Raw("ERROR".to_string(), vec!["SendQ overflow".to_string()]),
                    }))
                }
            },
            Self::Capturing(buf) => {
                buf.lock().await.push(msg);
                Ok(())
            }
        }
    }
}
