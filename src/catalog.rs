//! City catalog
//!
//! Immutable, ordered mapping from the integer city code the model was
//! trained with to the display name shown to the user. The iteration order
//! of the catalog is the tie-break order used when ranking predictions.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// One catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct City {
    pub code: u32,
    pub name: String,
}

impl City {
    pub fn new(code: u32, name: impl Into<String>) -> Self {
        Self {
            code,
            name: name.into(),
        }
    }
}

/// Codes used by the bundled price model
const POLISH_CITIES: [(u32, &str); 15] = [
    (0, "Białystok"),
    (1, "Bydgoszcz"),
    (2, "Częstochowa"),
    (3, "Gdańsk"),
    (4, "Gdynia"),
    (5, "Katowice"),
    (6, "Kraków"),
    (7, "Łódź"),
    (8, "Lublin"),
    (9, "Poznań"),
    (10, "Radom"),
    (11, "Rzeszów"),
    (12, "Szczecin"),
    (13, "Warszawa"),
    (14, "Wrocław"),
];

/// The default city list, in catalog order
pub fn default_cities() -> Vec<City> {
    POLISH_CITIES
        .iter()
        .map(|(code, name)| City::new(*code, *name))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityCatalog {
    cities: Vec<City>,
}

impl CityCatalog {
    /// Build a catalog, rejecting duplicate codes, duplicate names and blank names
    pub fn new(cities: Vec<City>) -> Result<Self, AppError> {
        let mut codes = HashSet::new();
        let mut names = HashSet::new();

        for city in &cities {
            if city.name.trim().is_empty() {
                return Err(AppError::Config(format!(
                    "City code {} has an empty name",
                    city.code
                )));
            }
            if !codes.insert(city.code) {
                return Err(AppError::Config(format!(
                    "Duplicate city code {} in catalog",
                    city.code
                )));
            }
            if !names.insert(city.name.as_str()) {
                return Err(AppError::Config(format!(
                    "Duplicate city name '{}' in catalog",
                    city.name
                )));
            }
        }

        Ok(Self { cities })
    }

    /// Resolve a city code to its display name
    pub fn name(&self, code: u32) -> Result<&str, AppError> {
        self.cities
            .iter()
            .find(|c| c.code == code)
            .map(|c| c.name.as_str())
            .ok_or_else(|| {
                AppError::InvalidArgument(format!("city code {} is not in the catalog", code))
            })
    }

    pub fn contains(&self, code: u32) -> bool {
        self.cities.iter().any(|c| c.code == code)
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.cities.iter().any(|c| c.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &City> {
        self.cities.iter()
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}

impl Default for CityCatalog {
    fn default() -> Self {
        Self {
            cities: default_cities(),
        }
    }
}
