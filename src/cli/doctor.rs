//! CLI `doctor` command: print the effective configuration and probe the embedding provider.

use anyhow::{Context, Result};

use talae_recall::config::{default_config_path, RecallConfig};

const PROBE_TEXT: &str = "talae-recall doctor probe";

pub async fn doctor(config: &RecallConfig) -> Result<()> {
    let config_path = default_config_path();

    println!("Talae Recall Health Report");
    println!("==========================");
    println!();
    if config_path.exists() {
        println!("Config file:       {}", config_path.display());
    } else {
        println!("Config file:       not found at {} (using defaults)", config_path.display());
    }
    println!("Log level:         {}", config.server.log_level);
    println!();
    println!("Embedding:");
    println!("  Provider:        {}", config.embedding.provider);
    println!("  Base URL:        {}", config.embedding.base_url);
    println!("  Model:           {}", config.embedding.model);
    println!("  Timeout:         {}s", config.embedding.timeout_secs);
    println!(
        "  API key:         {}",
        if config.embedding.api_key.is_some() { "set" } else { "(not set)" }
    );
    println!();
    println!("Retrieval limits:");
    println!("  Default:         {}", config.retrieval.default_limit);
    println!("  Response:        {}", config.retrieval.response_limit);
    println!("  Evolution:       {}", config.retrieval.evolution_limit);
    println!();

    let provider = talae_recall::embedding::create_provider(&config.embedding)
        .context("failed to create embedding provider")?;
    match provider.embed(PROBE_TEXT).await {
        Ok(vector) => {
            println!("Provider probe:    OK ({} dimensions)", vector.len());
        }
        Err(e) => {
            println!("Provider probe:    FAILED ({e:#})");
            println!();
            println!("Recovery steps:");
            println!("  1. Check that the provider is running at {}", config.embedding.base_url);
            println!("  2. Check that model '{}' is available", config.embedding.model);
        }
    }
    Ok(())
}
