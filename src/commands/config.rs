use anyhow::Result;
use colored::Colorize;
use flat_prices::config::Config;
use tracing::info;

/// Execute the config show command
///
/// Displays the effective configuration (file, environment and defaults merged)
pub fn show(cfg: &Config) -> Result<()> {
    info!("Displaying configuration");

    println!("{}", "Current Configuration:".green().bold());
    println!();

    // Serialize to TOML format
    let toml_string = toml::to_string_pretty(cfg)?;
    println!("{}", toml_string);

    Ok(())
}

/// Execute the config validate command
///
/// Loading already validated the configuration; this prints a summary
pub fn validate(cfg: &Config) -> Result<()> {
    info!("Configuration validation successful");

    println!("{}", "✓ Configuration is valid".green());
    println!();
    println!("{}", "Summary:".bold());
    println!("  Model: {}", cfg.model.path.display());
    println!("  Cities: {}", cfg.cities.len());
    println!(
        "  Highlighted city: {}",
        highlight_summary(cfg)
    );
    println!("  Currency: {}", cfg.presentation.currency);
    println!(
        "  Logging: {} ({})",
        cfg.logging.level,
        cfg.logging
            .file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "stderr".to_string())
    );

    Ok(())
}

/// Describe the highlight setting, flagging a city missing from the catalog
fn highlight_summary(cfg: &Config) -> String {
    match cfg.presentation.highlight_city.as_deref() {
        None | Some("") => "none".to_string(),
        Some(city) if cfg.cities.iter().any(|c| c.name == city) => city.to_string(),
        Some(city) => format!("{} (not in catalog)", city),
    }
}
