use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use flat_prices::features::SliderValues;

#[derive(Parser, Debug)]
#[command(
    name = "flat-prices",
    version,
    about = "Apartment price predictions across Polish cities"
)]
pub struct Cli {
    /// Configuration file path (flat-prices.toml is read if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Open the interactive price dashboard (default)
    Dashboard,

    /// Predict prices once and print the ranked table and chart
    Predict(PredictArgs),

    /// Load configuration and model, then print a summary
    Check,

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Display the effective configuration
    Show,

    /// Validate configuration file
    Validate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Args, Debug, Clone)]
pub struct PredictArgs {
    /// Area in m² (20-150)
    #[arg(long, default_value_t = 30.0)]
    pub area: f64,

    /// Number of rooms (1-6)
    #[arg(long, default_value_t = 1)]
    pub rooms: u32,

    /// Distance to the nearest university in km (0-20)
    #[arg(long, default_value_t = 2.0)]
    pub university_distance: f64,

    /// Distance to the city center in km (0-20)
    #[arg(long, default_value_t = 10.0)]
    pub center_distance: f64,

    /// Number of floors in the building (1-30)
    #[arg(long, default_value_t = 2)]
    pub floors: u32,

    /// Number of nearby points of interest (0-10)
    #[arg(long, default_value_t = 3)]
    pub poi: u32,

    /// Whether the building has an elevator
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub elevator: bool,

    /// Building age in years (0-100)
    #[arg(long, default_value_t = 4)]
    pub building_age: u32,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Maximum bar length of the text chart
    #[arg(long, default_value_t = 50)]
    pub width: usize,
}

impl PredictArgs {
    pub fn slider_values(&self) -> SliderValues {
        SliderValues {
            area: self.area,
            room_count: self.rooms,
            university_distance: self.university_distance,
            center_distance: self.center_distance,
            floor_count: self.floors,
            nearby_poi: self.poi,
            has_elevator: self.elevator,
            building_age: self.building_age,
        }
    }
}

impl Cli {
    /// Get the command to execute, defaulting to Dashboard if none provided
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Dashboard)
    }
}
