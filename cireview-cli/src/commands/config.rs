//! Config command - Show the effective configuration

use cireview_core::{Config, Secrets};

/// Print configuration and file locations
pub fn execute(config: &Config) -> anyhow::Result<()> {
    let secrets = Secrets::load()?;

    println!("cireview Configuration");
    println!("======================");
    println!();
    println!("Server Settings:");
    println!("  port: {}", config.server.port);
    println!();
    println!("Agent Settings:");
    println!("  retry_limit: {}", config.agent.retry_limit);
    println!("  readme_timeout: {:?}", config.agent.readme_timeout);
    println!("  raw_base_url: {}", config.agent.raw_base_url);
    println!();
    println!("Gemini Settings:");
    println!("  model: {}", config.gemini.model);
    println!("  base_url: {}", config.gemini.base_url);
    println!(
        "  api_key: {}",
        if secrets.gemini_api_key().is_some() {
            "(configured)"
        } else {
            "(not configured)"
        }
    );
    println!();

    for (label, path) in [
        ("Config file", Config::default_config_path()),
        ("Secrets file", Secrets::default_secrets_path()),
    ] {
        if let Some(path) = path {
            println!("{}: {}", label, path.display());
            if path.exists() {
                println!("  (exists)");
            } else {
                println!("  (not found - using defaults)");
            }
        }
    }

    Ok(())
}
