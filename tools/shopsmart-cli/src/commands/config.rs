//! Configuration management commands.

use anyhow::{bail, Result};
use shopsmart_data::{Endpoints, ServiceTag};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig, BASE_URL_ENV, CONFIG_NAMES};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { base_url, force } => init_config(&base_url, force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(none, using defaults)"),
    }
    if std::env::var_os(BASE_URL_ENV).is_some() {
        ctx.output
            .kv("override", &format!("{BASE_URL_ENV} sets base_url"));
    }

    let api = &ctx.config.api;
    ctx.output.info("");
    ctx.output.info("[api]");
    ctx.output.kv("base_url", &api.base_url);
    ctx.output.kv("login_base_url", &api.login_base_url);
    ctx.output.kv("product_base_url", &api.product_base_url);
    ctx.output.kv("merchant_list_url", &api.merchant_list_url());
    ctx.output.kv("currency", api.currency.code());
    ctx.output
        .kv("connect_timeout_ms", &api.connect_timeout_ms.to_string());

    ctx.output.info("");
    ctx.output.info("Timeouts:");
    for tag in ServiceTag::ALL {
        let timeout = api.timeout_for(tag);
        ctx.output
            .list_item(&format!("{tag}: {}ms", timeout.total.as_millis()));
    }

    ctx.output.info("");
    ctx.output.info("[logging]");
    ctx.output.kv("level", &ctx.config.logging.level);
    ctx.output
        .kv("format", &format!("{:?}", ctx.config.logging.format).to_lowercase());

    if let Some(session) = &ctx.config.session {
        ctx.output.info("");
        ctx.output.info("[session]");
        ctx.output.kv("user_id", session.user_id.as_str());
        ctx.output.kv("user_type", session.user_type.as_str());
    }

    Ok(())
}

fn init_config(base_url: &str, force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, generate_default_config(base_url))?;
    ctx.output
        .success(&format!("Created {}", config_path.display()));
    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    let Some(path) = &ctx.config_path else {
        bail!("No config file found. Run `shopsmart config init` to create one.");
    };

    // Re-read so parse errors surface here rather than as defaults.
    let config = CliConfig::load(path)?;
    let mut errors = Vec::new();

    if let Err(err) = Endpoints::from_config(&config.api) {
        errors.push(err.to_string());
    }
    for key in config.api.unknown_timeout_keys() {
        errors.push(format!("Unknown service in timeouts_ms: {key}"));
    }
    if config.api.timeouts_ms.values().any(|ms| *ms == 0) {
        errors.push("Timeouts must be greater than zero".to_string());
    }

    if errors.is_empty() {
        ctx.output
            .success(&format!("{} is valid", path.display()));
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(error);
    }
    bail!("{} error(s) in {}", errors.len(), path.display())
}
