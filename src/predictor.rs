//! Batch prediction across the city catalog

use serde::Serialize;
use tracing::debug;

use crate::catalog::CityCatalog;
use crate::error::AppError;
use crate::features::{self, SliderValues};
use crate::model::PriceModel;

/// Predicted price for one city
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub city_code: u32,
    pub city_name: String,
    pub predicted_price: f64,
    pub is_highlighted: bool,
}

pub struct BatchPredictor<'a> {
    model: &'a dyn PriceModel,
    catalog: &'a CityCatalog,
}

impl<'a> BatchPredictor<'a> {
    pub fn new(model: &'a dyn PriceModel, catalog: &'a CityCatalog) -> Self {
        Self { model, catalog }
    }

    /// Predict the price of the same apartment in every catalog city
    ///
    /// Results come back in catalog order, one per city. A failure for any
    /// city fails the whole batch.
    pub fn predict_all(&self, values: &SliderValues) -> Result<Vec<PredictionResult>, AppError> {
        let mut results = Vec::with_capacity(self.catalog.len());

        for city in self.catalog.iter() {
            let input = features::build(values, city.code, self.catalog)?;
            let price = self
                .model
                .predict(&input)
                .map_err(|e| AppError::PredictionFailure {
                    city: city.name.clone(),
                    reason: e.to_string(),
                })?;

            // The trait contract does not forbid NaN, so check here too
            if !price.is_finite() {
                return Err(AppError::PredictionFailure {
                    city: city.name.clone(),
                    reason: format!("model produced a non-finite value ({})", price),
                });
            }

            debug!(city = %city.name, code = city.code, price, "Predicted price");
            results.push(PredictionResult {
                city_code: city.code,
                city_name: city.name.clone(),
                predicted_price: price,
                is_highlighted: false,
            });
        }

        Ok(results)
    }
}
