//! # Session Commands
//!
//! Open, close and inspect the register.

use tracing::debug;

use super::Context;
use crate::cli::{SessionArgs, SessionCommand};
use crate::error::CliResult;

pub async fn run(ctx: &Context, command: SessionCommand) -> CliResult<()> {
    debug!(?command, "session command");
    let workflow = ctx.workflow()?;

    match command {
        SessionCommand::Status => {
            let session = workflow.api().active_session().await?;
            ctx.emit(&session, || ctx.format.session(session.as_ref()))
        }
        SessionCommand::Open(SessionArgs { amount, notes }) => {
            let session = workflow.open_session(amount, notes.as_deref()).await?;
            ctx.emit(&session, || {
                format!("Register opened.\n{}", ctx.format.session(Some(&session)))
            })
        }
        SessionCommand::Close(SessionArgs { amount, notes }) => {
            let session = workflow.close_session(amount, notes.as_deref()).await?;
            ctx.emit(&session, || {
                format!("Register closed.\n{}", ctx.format.session(Some(&session)))
            })
        }
    }
}
