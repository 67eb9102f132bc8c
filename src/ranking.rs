//! Ranking of per-city predictions

use serde::Serialize;

use crate::predictor::PredictionResult;

/// Predictions ordered from the most to the least expensive city
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RankedResultSet {
    entries: Vec<PredictionResult>,
}

impl RankedResultSet {
    pub fn entries(&self) -> &[PredictionResult] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &PredictionResult> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn highlighted(&self) -> Option<&PredictionResult> {
        self.entries.iter().find(|r| r.is_highlighted)
    }

    /// Largest predicted price, `None` when empty
    pub fn max_price(&self) -> Option<f64> {
        self.entries.first().map(|r| r.predicted_price)
    }
}

/// Sort descending by price and flag the distinguished city
///
/// The sort is stable, so equal prices keep their input (catalog) order.
/// At most one entry is highlighted even if the name were repeated.
pub fn rank(mut results: Vec<PredictionResult>, highlight_city: Option<&str>) -> RankedResultSet {
    results.sort_by(|a, b| b.predicted_price.total_cmp(&a.predicted_price));

    let mut highlighted = false;
    for result in &mut results {
        result.is_highlighted =
            !highlighted && highlight_city.is_some_and(|city| city == result.city_name);
        highlighted |= result.is_highlighted;
    }

    RankedResultSet { entries: results }
}
