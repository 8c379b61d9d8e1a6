//! Admin OTP login and logout.

use anyhow::{bail, Result};
use chrono::Utc;
use dialoguer::Input;
use shopsmart_auth::{AuthError, Session, MAX_OTP_REQUESTS};
use shopsmart_storefront::{AdminLogin, StorefrontError};

use super::{report, LoginArgs, LogoutArgs};
use crate::context::Context;

/// Run the login command.
pub async fn run(args: LoginArgs, ctx: &Context) -> Result<()> {
    let mut login = AdminLogin::new(ctx.services()?, ctx.notifier());

    let email = match args.email {
        Some(email) => email,
        None => Input::new().with_prompt("Admin email").interact_text()?,
    };

    let spinner = ctx.output.spinner("Sending OTP...");
    let sent = login.send_otp(&email, Utc::now()).await;
    spinner.finish_and_clear();
    if let Err(err) = sent {
        return report(&ctx.output, err);
    }
    ctx.output.info(&format!("OTP sent to {email}"));

    let session = loop {
        let code: String = Input::new()
            .with_prompt("OTP (leave blank to resend)")
            .allow_empty(true)
            .interact_text()?;

        if code.trim().is_empty() {
            match login.send_otp(&email, Utc::now()).await {
                Ok(()) => {}
                Err(StorefrontError::Auth(AuthError::OtpExhausted)) => {
                    bail!("All {MAX_OTP_REQUESTS} OTP requests used")
                }
                Err(StorefrontError::Auth(err @ AuthError::ResendCoolingDown { .. })) => {
                    ctx.output.warn(&err.to_string())
                }
                Err(err) => return report(&ctx.output, err),
            }
            continue;
        }

        match login.verify(&code).await {
            Ok(session) => break session,
            Err(err) if err.is_validation() => ctx.output.warn(&err.user_message()),
            Err(err) => return report(&ctx.output, err),
        }
    };

    let path = ctx.save_session(Some(session.record().clone()))?;
    ctx.output
        .debug(&format!("session saved to {}", path.display()));
    Ok(())
}

/// Run the logout command.
pub async fn run_logout(_args: LogoutArgs, ctx: &Context) -> Result<()> {
    let Some(record) = ctx.config.session.clone() else {
        ctx.output.info("Not signed in");
        return Ok(());
    };

    Session::from_record(record).teardown();
    ctx.save_session(None)?;
    ctx.output.success("Signed out");
    Ok(())
}
