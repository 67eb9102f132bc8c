//! One interaction, end to end
//!
//! [`PriceService`] owns the process-wide, read-only pieces (model, city
//! catalog, presentation settings) and re-runs the whole pipeline for every
//! set of slider values: build vectors, predict per city, rank.

use std::time::Instant;

use tracing::{debug, warn};

use crate::catalog::CityCatalog;
use crate::config::Config;
use crate::error::AppError;
use crate::features::SliderValues;
use crate::model::{self, PriceModel, XgbRegressor};
use crate::predictor::BatchPredictor;
use crate::presentation::Presentation;
use crate::ranking::{rank, RankedResultSet};

pub struct PriceService<M: PriceModel = XgbRegressor> {
    model: M,
    catalog: CityCatalog,
    presentation: Presentation,
}

impl PriceService<XgbRegressor> {
    /// Load the model and resolve catalog and presentation from configuration
    pub fn from_config(cfg: &Config) -> Result<Self, AppError> {
        let catalog = cfg.catalog()?;
        let presentation = cfg.presentation()?;
        let model = model::load_model(&cfg.model.path, cfg.model.validate_schema)?;

        Ok(Self::new(model, catalog, presentation))
    }
}

impl<M: PriceModel> PriceService<M> {
    pub fn new(model: M, catalog: CityCatalog, presentation: Presentation) -> Self {
        if let Some(city) = &presentation.highlight_city {
            if !catalog.contains_name(city) {
                warn!(city = %city, "Highlight city is not in the catalog; nothing will be highlighted");
            }
        }

        Self {
            model,
            catalog,
            presentation,
        }
    }

    /// Predict every city for `values` and rank the results
    pub fn evaluate(&self, values: &SliderValues) -> Result<RankedResultSet, AppError> {
        let started = Instant::now();

        let results = BatchPredictor::new(&self.model, &self.catalog).predict_all(values)?;
        let ranked = rank(results, self.presentation.highlight_city.as_deref());

        debug!(
            cities = ranked.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "Recomputed predictions"
        );
        Ok(ranked)
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn catalog(&self) -> &CityCatalog {
        &self.catalog
    }

    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }
}
