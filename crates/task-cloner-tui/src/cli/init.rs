/*
[INPUT]:  Interactive user input via CLI
[OUTPUT]: Generated YAML configuration file
[POS]:    CLI initialization layer
[UPDATE]: When ClonerConfig schema changes
*/

use anyhow::{Context, Result, bail};
use console::style;
use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};
use std::path::PathBuf;

use task_cloner::ClonerConfig;
use task_cloner::config::BackendMode;

pub fn run_init(output: PathBuf) -> Result<()> {
    println!("{}", style("Welcome to Task Cloner Init").bold().cyan());
    println!(
        "{}",
        style("This will guide you through creating a new configuration.").dim()
    );

    let theme = ColorfulTheme::default();

    if output.exists() {
        let overwrite = Confirm::with_theme(&theme)
            .with_prompt(format!("{} exists. Overwrite?", output.display()))
            .default(false)
            .interact()?;
        if !overwrite {
            bail!("left existing config at {} untouched", output.display());
        }
    }

    let mut config = ClonerConfig::default();

    println!("\n{}", style("--- Backend ---").bold());
    let modes = ["mock", "webhook"];
    let mode_selection = Select::with_theme(&theme)
        .with_prompt("Backend mode")
        .items(&modes)
        .default(0)
        .interact()?;

    if mode_selection == 1 {
        config.backend.mode = BackendMode::Webhook;

        let webhook_url: String = Input::with_theme(&theme)
            .with_prompt("Webhook URL (e.g., https://hooks.example.com/jira)")
            .validate_with(|input: &String| -> Result<(), String> {
                match url::Url::parse(input.trim()) {
                    Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
                    Ok(_) => Err("URL must use http or https".to_string()),
                    Err(err) => Err(err.to_string()),
                }
            })
            .interact_text()?;
        config.backend.webhook_url = Some(webhook_url.trim().to_string());

        let auth_token: String = Input::with_theme(&theme)
            .with_prompt("Auth token (leave empty for none)")
            .allow_empty(true)
            .interact_text()?;
        let auth_token = auth_token.trim();
        if !auth_token.is_empty() {
            config.backend.auth_token = Some(auth_token.to_string());
        }

        config.backend.timeout_secs = Input::with_theme(&theme)
            .with_prompt("Request timeout (seconds)")
            .default(config.backend.timeout_secs)
            .interact_text()?;
    } else {
        config.backend.browse_base_url = Input::with_theme(&theme)
            .with_prompt("Browse base URL for generated task links")
            .default(config.backend.browse_base_url.clone())
            .interact_text()?;
    }

    println!("\n{}", style("--- Logging ---").bold());
    let levels = ["error", "warn", "info", "debug", "trace"];
    let level_selection = Select::with_theme(&theme)
        .with_prompt("Log level")
        .items(&levels)
        .default(2)
        .interact()?;
    config.logging.level = levels[level_selection].to_string();

    config
        .validate()
        .context("generated configuration is invalid")?;
    config
        .save(&output)
        .with_context(|| format!("failed to write config to {}", output.display()))?;

    println!("\n{}", style("SUCCESS!").bold().green());
    println!(
        "Configuration written to: {}",
        style(output.display()).cyan()
    );

    Ok(())
}
