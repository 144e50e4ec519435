//! Configuration management commands.

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig};
use crate::context::{Context, CONFIG_NAMES};

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Path => show_path(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&redacted(&ctx.config));
        return Ok(());
    }

    let config = redacted(&ctx.config);
    ctx.output.header("Current Configuration");

    ctx.output.info("");
    ctx.output.info("[api]");
    ctx.output.kv("base_url", &config.api.base_url);
    ctx.output
        .kv("token", config.api.token.as_deref().unwrap_or("(not set)"));

    ctx.output.info("");
    ctx.output.info("[store]");
    ctx.output
        .kv("redirect_delay_ms", &config.store.redirect_delay_ms.to_string());
    ctx.output
        .kv("not_found_redirect", &config.store.not_found_redirect);
    ctx.output.kv(
        "shipping.free_threshold",
        &config.store.shipping.free_threshold.display(),
    );
    ctx.output.kv("shipping.fee", &config.store.shipping.fee.display());

    if ctx.offline {
        ctx.output.info("");
        ctx.output.warn("--offline: the API settings are not used");
    }
    Ok(())
}

fn show_path(ctx: &Context) -> Result<()> {
    match &ctx.config_path {
        Some(path) => println!("{}", path.display()),
        None => bail!(
            "No config file found; looked for {} from {}",
            CONFIG_NAMES.join(", "),
            ctx.cwd.display()
        ),
    }
    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let path = ctx.resolve_path(CONFIG_NAMES[0]);
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }

    std::fs::write(&path, generate_default_config())?;
    ctx.output.success(&format!("Created {}", path.display()));
    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    let Some(path) = &ctx.config_path else {
        ctx.output.info("No config file; using defaults");
        return Ok(());
    };

    let config = CliConfig::load(&path.to_string_lossy())?;
    let mut problems = Vec::new();
    if !config.api.base_url.starts_with("http://") && !config.api.base_url.starts_with("https://")
    {
        problems.push(format!("api.base_url must be an http(s) URL: {}", config.api.base_url));
    }
    if !config.store.not_found_redirect.starts_with('/') {
        problems.push("store.not_found_redirect must be a route starting with '/'".to_string());
    }
    if config.store.shipping.fee.amount_cents < 0 {
        problems.push("store.shipping.fee must not be negative".to_string());
    }

    if problems.is_empty() {
        ctx.output.success(&format!("{} is valid", path.display()));
        return Ok(());
    }
    for problem in &problems {
        ctx.output.error(problem);
    }
    bail!("{} problem(s) in {}", problems.len(), path.display())
}

/// Copy of `config` safe to print.
fn redacted(config: &CliConfig) -> CliConfig {
    let mut config = config.clone();
    if config.api.token.is_some() {
        config.api.token = Some("********".to_string());
    }
    config
}
