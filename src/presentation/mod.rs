//! Presentation of ranked predictions
//!
//! Formatting and styling shared by the terminal dashboard and the one-shot
//! `predict` command. Domain results only carry an `is_highlighted` flag;
//! the colors come from the [`Palette`] lookup here.

pub mod chart;
pub mod table;

use std::fmt;
use std::str::FromStr;

use crate::config::PresentationConfig;
use crate::error::AppError;

/// Format a price with grouped thousands, two decimals and a currency suffix
///
/// `format_price(1234567.891, "PLN")` gives `"1,234,567.89 PLN"`.
pub fn format_price(price: f64, currency: &str) -> String {
    let fixed = format!("{:.2}", price.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let len = int_part.len();
    let mut grouped = String::with_capacity(len + len / 3 + 1);
    if price < 0.0 && fixed != "0.00" {
        grouped.push('-');
    }
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if currency.is_empty() {
        format!("{}.{}", grouped, frac_part)
    } else {
        format!("{}.{} {}", grouped, frac_part, currency)
    }
}

/// Bar length in cells, proportional to `price / max_price`
///
/// Non-positive prices and maxima give an empty bar.
pub fn bar_length(price: f64, max_price: f64, width: usize) -> usize {
    if price.is_nan() || max_price.is_nan() || price <= 0.0 || max_price <= 0.0 {
        return 0;
    }
    let ratio = (price / max_price).min(1.0);
    (ratio * width as f64).round() as usize
}

/// An sRGB color written as `#rrggbb`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl FromStr for Rgb {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AppError::Config(format!("Invalid color '{}': expected #rrggbb", s));

        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());

        Ok(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Fill colors for the chart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub highlight: Rgb,
    pub bar: Rgb,
}

impl Palette {
    pub fn fill(&self, is_highlighted: bool) -> Rgb {
        if is_highlighted {
            self.highlight
        } else {
            self.bar
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            highlight: Rgb(0xff, 0xcc, 0xcc),
            bar: Rgb(0xcc, 0xe7, 0xff),
        }
    }
}

/// Resolved presentation settings
#[derive(Debug, Clone, PartialEq)]
pub struct Presentation {
    pub currency: String,
    pub highlight_city: Option<String>,
    pub palette: Palette,
}

impl Presentation {
    pub fn from_config(cfg: &PresentationConfig) -> Result<Self, AppError> {
        Ok(Self {
            currency: cfg.currency.clone(),
            highlight_city: cfg
                .highlight_city
                .clone()
                .filter(|city| !city.trim().is_empty()),
            palette: Palette {
                highlight: cfg.highlight_color.parse()?,
                bar: cfg.bar_color.parse()?,
            },
        })
    }

    pub fn format_price(&self, price: f64) -> String {
        format_price(price, &self.currency)
    }
}

impl Default for Presentation {
    fn default() -> Self {
        Self {
            currency: "PLN".to_string(),
            highlight_city: Some("Kraków".to_string()),
            palette: Palette::default(),
        }
    }
}
