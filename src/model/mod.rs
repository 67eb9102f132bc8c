//! Price model loading and evaluation
//!
//! The model is read once at startup from an XGBoost JSON file and is
//! immutable afterwards. Everything downstream talks to it through the
//! [`PriceModel`] trait.

pub mod json;
pub mod xgboost;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::{info, warn};

use crate::error::AppError;
use crate::features::FeatureInput;

pub use xgboost::{ModelInfo, SchemaCheck, XgbRegressor};

/// Errors raised while loading or evaluating a model
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("cannot read model file: {0}")]
    Io(#[from] std::io::Error),
    #[error("not a valid XGBoost JSON model: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unsupported objective '{0}': only regression objectives can predict prices")]
    UnsupportedObjective(String),
    #[error("multi-output models are not supported ({0} outputs)")]
    MultiOutput(i64),
    #[error("tree {0} has no nodes")]
    EmptyTree(usize),
    #[error("tree {tree} is malformed: {reason}")]
    MalformedTree { tree: usize, reason: String },
    #[error("tree {tree} uses categorical splits, which are not supported")]
    CategoricalSplit { tree: usize },
    #[error("invalid node index in tree {tree}: node {node} references child {child} but tree has {num_nodes} nodes")]
    InvalidNodeIndex {
        tree: usize,
        node: usize,
        child: i32,
        num_nodes: usize,
    },
    #[error("tree {tree} node {node} splits on feature {feature} but the model has {num_features} features")]
    FeatureOutOfRange {
        tree: usize,
        node: usize,
        feature: i64,
        num_features: usize,
    },
    #[error("gblinear model has {found} weights, expected {expected}")]
    LinearWeights { expected: usize, found: usize },
    #[error("feature count mismatch: expected {expected}, model has {found}")]
    FeatureCount { expected: usize, found: usize },
    #[error("feature name mismatch at position {position}: expected '{expected}', model has '{found}'")]
    FeatureName {
        position: usize,
        expected: String,
        found: String,
    },
    #[error("{0}")]
    Evaluation(String),
}

/// A loaded regression model that prices one apartment
pub trait PriceModel: Send + Sync {
    fn predict(&self, input: &FeatureInput) -> Result<f64, ModelError>;
}

/// Load and validate the price model at `path`
///
/// Any failure is a [`AppError::StartupFailure`]: without a model nothing can
/// be served, so this is never retried.
pub fn load_model(path: &Path, validate_names: bool) -> Result<XgbRegressor, AppError> {
    let startup_failure = |source: ModelError| AppError::StartupFailure {
        path: path.to_path_buf(),
        source,
    };

    info!(path = %path.display(), "Loading price model");

    let parsed: json::XgbModel = {
        let file = File::open(path).map_err(|e| startup_failure(e.into()))?;
        serde_json::from_reader(BufReader::new(file)).map_err(|e| startup_failure(e.into()))?
    };

    let model = XgbRegressor::from_json_model(parsed).map_err(startup_failure)?;

    match model
        .validate_schema(&FeatureInput::FEATURE_NAMES, validate_names)
        .map_err(startup_failure)?
    {
        SchemaCheck::Matched => info!("Model feature names match the feature vector"),
        SchemaCheck::Unnamed if validate_names => warn!(
            "Model carries no feature names; assuming positional order {:?}",
            FeatureInput::FEATURE_NAMES
        ),
        SchemaCheck::Unnamed => warn!("Feature name validation is disabled"),
    }

    let summary = model.info();
    info!(
        booster = %summary.booster,
        objective = %summary.objective,
        trees = summary.num_trees,
        xgboost_version = %summary.xgboost_version,
        "Price model loaded"
    );

    Ok(model)
}
