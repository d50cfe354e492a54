//! STATS handler for operator diagnostics.
//!
//! `STATS <letter> [target]`
//!
//! A request passes the server-wide pacing gate (directly connected
//! non-operators only), is routed to another server when its target names
//! one, and is otherwise answered from the category [`registry`]. Every
//! locally answered request ends with exactly one `RPL_ENDOFSTATS`; a paced
//! or forwarded request produces none.

/// Build a `Vec<String>` from heterogeneous displayable values.
macro_rules! fields {
    ($($x:expr),* $(,)?) => {
        vec![$(($x).to_string()),*]
    };
}

mod conf;
mod gate;
mod hunt;
mod ltrace;
mod memory;
pub mod registry;
mod runtime;
mod viewer;

#[cfg(test)]
mod test_support;

pub use gate::{Privilege, Visibility};
pub use hunt::{Route, forward_stats, hunt_server};
pub use memory::{MemorySummary, Usage};
pub use registry::{StatsEntry, resolve};
pub use viewer::{AddressMode, Viewer, client_name};

use super::{Context, Handler, err_noprivileges, rpl_load2hi, server_reply};
use crate::error::{HandlerError, HandlerResult};
use crate::metrics;
use crate::state::{Admission, Client, Matrix};
use crate::telemetry::{ReportTimer, spans};
use async_trait::async_trait;
use slirc_proto::{Command, Message, Response};
use std::sync::Arc;
use tracing::{Instrument, debug};

/// One category renderer.
///
/// Renderers only read shared state and return the lines to send, without
/// the completion marker.
pub trait StatsReport: Send + Sync {
    fn render(&self, req: &StatsRequest<'_>) -> Vec<Message>;
}

/// Everything a renderer needs to answer one request.
pub struct StatsRequest<'a> {
    pub matrix: &'a Matrix,
    pub source: &'a Client,
    pub viewer: Viewer,
    /// Category letter as requested.
    pub letter: char,
    /// Name or mask argument, if given.
    pub target: Option<&'a str>,
    pub now: i64,
}

impl StatsRequest<'_> {
    /// This server's name.
    pub fn me(&self) -> &str {
        &self.matrix.server_info.name
    }

    /// Numeric reply addressed to the requester.
    pub fn reply(&self, response: Response, mut params: Vec<String>) -> Message {
        params.insert(0, self.viewer.nick.clone());
        server_reply(self.me(), response, params)
    }

    /// Free-form `RPL_STATSDEBUG` line tagged with `tag`.
    pub fn debug(&self, tag: char, text: String) -> Message {
        self.reply(Response::RPL_STATSDEBUG, fields![tag, text])
    }

    pub fn no_privileges(&self) -> Message {
        err_noprivileges(self.me(), &self.viewer.nick)
    }
}

/// Handler for the STATS command.
pub struct StatsHandler;

#[async_trait]
impl Handler for StatsHandler {
    async fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let Command::STATS(letter, target) = &msg.command else {
            return Err(HandlerError::Internal(format!(
                "STATS handler given {}",
                msg.command
            )));
        };

        let source = ctx
            .matrix
            .clients
            .get(ctx.uid)
            .map(|r| Arc::clone(r.value()))
            .ok_or_else(|| HandlerError::NickOrUserMissing(ctx.uid.to_string()))?;

        let target = target.as_deref().filter(|t| !t.is_empty());
        let span = spans::stats_request(ctx.uid, letter.chars().next(), target);

        let ctx: &Context<'_> = ctx;
        let result = route(ctx, &source, letter, target).instrument(span).await;

        match result {
            Err(err) => {
                metrics::record_command_error("STATS", err.error_code());
                match err.to_irc_reply(&ctx.matrix.server_info.name, &source.name) {
                    Some(reply) => {
                        ctx.sender.send(reply).await?;
                        Ok(())
                    }
                    None => Err(err),
                }
            }
            ok => ok,
        }
    }
}

/// Pace, then answer locally or hand the request to the server it names.
async fn route(
    ctx: &Context<'_>,
    source: &Client,
    letter: &str,
    target: Option<&str>,
) -> HandlerResult {
    let matrix = ctx.matrix;
    let cfg = &matrix.config;

    // Only directly connected non-operators are paced, and only they can be
    // barred from remote commands.
    let paced = source.is_local() && !source.modes.oper;

    if paced && matrix.pacing.admit(ctx.now, cfg.stats.pace_wait) == Admission::RateLimited {
        debug!(uid = %source.uid, "STATS refused by pacing");
        metrics::record_stats_rate_limited();
        ctx.sender
            .send(rpl_load2hi(&matrix.server_info.name, &source.name, "STATS"))
            .await?;
        return Ok(());
    }

    if !paced || !cfg.serverhide.disable_remote_commands {
        match hunt_server(matrix, source, target) {
            Route::Local => {}
            Route::Forward { via } => {
                forward_stats(matrix, source, &via, letter, target.unwrap_or_default()).await;
                return Ok(());
            }
            Route::NoSuchServer(name) => return Err(HandlerError::NoSuchServer(name)),
        }
    }

    do_stats(ctx, source, letter.chars().next(), target).await
}

/// Answer a request on this server: resolve, gate, render, audit, end.
pub async fn do_stats(
    ctx: &Context<'_>,
    source: &Client,
    letter: Option<char>,
    target: Option<&str>,
) -> HandlerResult {
    let matrix = ctx.matrix;
    let server_name = &matrix.server_info.name;
    let viewer = Viewer::of(source);

    let Some(letter) = letter else {
        ctx.send_reply(
            Response::RPL_ENDOFSTATS,
            fields![viewer.nick, '*', "End of /STATS report"],
        )
        .await?;
        return Ok(());
    };

    if let Some(entry) = resolve(letter) {
        if viewer.has(entry.required) {
            let lines = {
                let req = StatsRequest {
                    matrix,
                    source,
                    viewer: viewer.clone(),
                    letter,
                    target,
                    now: ctx.now,
                };
                let _timer = ReportTimer::new(letter);
                entry.report.render(&req)
            };
            debug!(letter = %letter, lines = lines.len(), "STATS report rendered");
            metrics::record_stats_request(letter);
            for line in lines {
                ctx.sender.send(line).await?;
            }
        } else {
            debug!(letter = %letter, required = ?entry.required, "STATS refused for privilege");
            metrics::record_stats_denied();
            ctx.sender
                .send(err_noprivileges(server_name, &viewer.nick))
                .await?;
        }

        matrix
            .send_snomask(
                'y',
                &format!(
                    "STATS {} requested by {} ({}@{}) [{}]",
                    letter,
                    source.name,
                    source.username,
                    source.host,
                    source.server_name(server_name)
                ),
            )
            .await;
    }

    ctx.send_reply(
        Response::RPL_ENDOFSTATS,
        fields![viewer.nick, letter, "End of /STATS report"],
    )
    .await
}
