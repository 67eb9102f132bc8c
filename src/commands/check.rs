use anyhow::Result;
use colored::Colorize;
use tracing::info;

use flat_prices::{config::Config, features::SliderValues, service::PriceService};

/// Execute the check command
///
/// Loads the model exactly as the dashboard would and runs one prediction
/// with default inputs, without opening the UI
pub fn execute(cfg: &Config) -> Result<()> {
    println!("{}", "Checking configuration and model...".yellow());
    info!("Loading and validating model");

    let service = PriceService::from_config(cfg)?;
    let model = service.model().info();

    println!("{}", "✓ Model loaded successfully".green());
    println!();

    println!("{}", "Model Summary:".bold());
    println!("  {}: {}", "Path".cyan(), cfg.model.path.display());
    println!("  {}: {}", "XGBoost version".cyan(), model.xgboost_version);
    println!("  {}: {}", "Booster".cyan(), model.booster);
    println!("  {}: {}", "Objective".cyan(), model.objective);
    println!("  {}: {}", "Trees".cyan(), model.num_trees);
    println!("  {}: {}", "Features".cyan(), model.num_features);
    if model.feature_names.is_empty() {
        println!("    {}", "(no feature names stored in model)".dimmed());
    } else {
        for (idx, name) in model.feature_names.iter().enumerate() {
            println!("    {}. {}", idx + 1, name);
        }
    }
    println!(
        "  {}: {}",
        "Schema validation".cyan(),
        if cfg.model.validate_schema {
            "enabled".green()
        } else {
            "disabled".red()
        }
    );
    println!();

    let ranked = service.evaluate(&SliderValues::default())?;
    println!(
        "  {}: {} cities predicted with default inputs",
        "Smoke test".cyan(),
        ranked.len()
    );
    if let (Some(first), Some(last)) = (ranked.entries().first(), ranked.entries().last()) {
        let presentation = service.presentation();
        println!(
            "    {} → {}",
            first.city_name,
            presentation.format_price(first.predicted_price)
        );
        println!(
            "    {} → {}",
            last.city_name,
            presentation.format_price(last.predicted_price)
        );
    }

    info!("Model check completed successfully");
    Ok(())
}
