//! Show or switch the saved session.

use anyhow::Result;
use shopsmart_auth::{Session, UserType};
use shopsmart_commerce::UserId;

use super::{SessionArgs, SessionCommand};
use crate::context::Context;

/// Run the session command.
pub async fn run(args: SessionArgs, ctx: &Context) -> Result<()> {
    match args.command.unwrap_or(SessionCommand::Show) {
        SessionCommand::Show => show(ctx),
        SessionCommand::Customer { user_id } => {
            let session = Session::establish(UserId::new(user_id), UserType::Customer);
            ctx.save_session(Some(session.record().clone()))?;
            ctx.output
                .success(&format!("Signed in as customer {}", session.user_id()));
            Ok(())
        }
    }
}

fn show(ctx: &Context) -> Result<()> {
    let Some(record) = &ctx.config.session else {
        ctx.output.info("Not signed in");
        return Ok(());
    };

    if ctx.output.is_json() {
        ctx.output.json(record);
        return Ok(());
    }

    ctx.output.header("Session");
    ctx.output.kv("User", record.user_id.as_str());
    ctx.output.kv("Type", record.user_type.as_str());
    ctx.output.kv("Home", record.user_type.home_route());
    ctx.output
        .kv("Since", &record.established_at.format("%Y-%m-%d %H:%M:%S UTC").to_string());
    Ok(())
}
