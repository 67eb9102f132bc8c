//! Predict command implementation
//!
//! Runs one interaction without the interactive UI and prints the ranked
//! prices as a table followed by a text bar chart, or as JSON.

use anyhow::Result;
use colored::Colorize;
use serde_json::json;
use tracing::info;

use flat_prices::{
    config::Config,
    presentation::{chart::render_chart, table::render_table},
    service::PriceService,
};

use crate::cli::{OutputFormat, PredictArgs};

/// Execute the predict command
pub fn execute(cfg: &Config, args: &PredictArgs) -> Result<()> {
    // The CLI is the input layer here, so it owns range validation
    let values = args.slider_values();
    values.validate()?;

    let service = PriceService::from_config(cfg)?;
    let ranked = service.evaluate(&values)?;
    info!(cities = ranked.len(), "Predictions ready");

    match args.format {
        OutputFormat::Json => {
            let output = json!({
                "inputs": values,
                "currency": service.presentation().currency,
                "results": ranked,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Table => {
            println!("{}", "Predicted Apartment Prices".bold());
            println!("{}", render_table(&ranked, service.presentation()));
            println!();
            println!("{}", "Predicted Apartment Prices Across Cities".bold());
            let use_color = colored::control::SHOULD_COLORIZE.should_colorize();
            print!(
                "{}",
                render_chart(&ranked, service.presentation(), args.width, use_color)
            );
        }
    }

    Ok(())
}
