//! Gradient-boosted regressor evaluated from an XGBoost JSON model.

use serde::Serialize;

use super::json::{GradientBooster, ModelTrees, Tree, XgbModel};
use super::{ModelError, PriceModel};
use crate::features::FeatureInput;

/// Inverse link applied to the raw margin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Link {
    Identity,
    Log,
}

impl Link {
    fn for_objective(objective: &str) -> Result<Self, ModelError> {
        match objective {
            "reg:squarederror" | "reg:linear" | "reg:absoluteerror" | "reg:pseudohubererror"
            | "reg:squaredlogerror" | "reg:quantileerror" => Ok(Self::Identity),
            "reg:gamma" | "reg:tweedie" | "count:poisson" => Ok(Self::Log),
            other => Err(ModelError::UnsupportedObjective(other.to_string())),
        }
    }

    /// `base_score` is stored in output space; the predictor sums in margin space
    fn base_margin(self, base_score: f32) -> f32 {
        match self {
            Self::Identity => base_score,
            Self::Log => base_score.max(1e-7).ln(),
        }
    }

    fn apply(self, margin: f64) -> f64 {
        match self {
            Self::Identity => margin,
            Self::Log => margin.exp(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Node {
    Split {
        feature: usize,
        threshold: f32,
        default_left: bool,
        left: usize,
        right: usize,
    },
    Leaf(f32),
}

#[derive(Debug, Clone)]
struct CompiledTree {
    nodes: Vec<Node>,
}

impl CompiledTree {
    fn compile(tree: &Tree, tree_idx: usize, num_features: usize) -> Result<Self, ModelError> {
        let num_nodes = usize::try_from(tree.tree_param.num_nodes).unwrap_or(0);
        if num_nodes == 0 {
            return Err(ModelError::EmptyTree(tree_idx));
        }

        let lengths = [
            ("left_children", tree.left_children.len()),
            ("right_children", tree.right_children.len()),
            ("split_indices", tree.split_indices.len()),
            ("split_conditions", tree.split_conditions.len()),
            ("default_left", tree.default_left.len()),
        ];
        for (name, len) in lengths {
            if len != num_nodes {
                return Err(ModelError::MalformedTree {
                    tree: tree_idx,
                    reason: format!("{} has {} entries, expected {}", name, len, num_nodes),
                });
            }
        }
        if tree.split_type.iter().any(|&t| t != 0) {
            return Err(ModelError::CategoricalSplit { tree: tree_idx });
        }

        let mut nodes = Vec::with_capacity(num_nodes);
        for node_idx in 0..num_nodes {
            let left = tree.left_children[node_idx];
            let right = tree.right_children[node_idx];

            // XGBoost marks leaves with left_child == -1; the leaf value lives in split_conditions
            if left == -1 {
                nodes.push(Node::Leaf(tree.split_conditions[node_idx]));
                continue;
            }

            // Children always come after their parent, which also rules out cycles
            for child in [left, right] {
                if child <= node_idx as i32 || child as usize >= num_nodes {
                    return Err(ModelError::InvalidNodeIndex {
                        tree: tree_idx,
                        node: node_idx,
                        child,
                        num_nodes,
                    });
                }
            }

            let feature = tree.split_indices[node_idx];
            if feature < 0 || feature as usize >= num_features {
                return Err(ModelError::FeatureOutOfRange {
                    tree: tree_idx,
                    node: node_idx,
                    feature: feature as i64,
                    num_features,
                });
            }

            nodes.push(Node::Split {
                feature: feature as usize,
                threshold: tree.split_conditions[node_idx],
                default_left: tree.default_left[node_idx],
                left: left as usize,
                right: right as usize,
            });
        }

        Ok(Self { nodes })
    }

    fn leaf_value(&self, row: &[f32]) -> f32 {
        let mut idx = 0;
        loop {
            match self.nodes[idx] {
                Node::Leaf(value) => return value,
                Node::Split {
                    feature,
                    threshold,
                    default_left,
                    left,
                    right,
                } => {
                    let value = row[feature];
                    let go_left = if value.is_nan() {
                        default_left
                    } else {
                        value < threshold
                    };
                    idx = if go_left { left } else { right };
                }
            }
        }
    }
}

#[derive(Debug, Clone)]
enum Booster {
    Trees {
        trees: Vec<CompiledTree>,
        /// Per-tree scale; all ones except for dart
        weights: Vec<f32>,
    },
    Linear {
        weights: Vec<f32>,
        bias: f32,
    },
}

/// Summary of a loaded model, for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelInfo {
    pub xgboost_version: String,
    pub booster: String,
    pub objective: String,
    pub num_trees: usize,
    pub num_features: usize,
    pub feature_names: Vec<String>,
}

/// Outcome of comparing the model's feature names with [`FeatureInput::FEATURE_NAMES`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaCheck {
    Matched,
    /// The model was saved without feature names; order is assumed
    Unnamed,
}

#[derive(Debug, Clone)]
pub struct XgbRegressor {
    booster: Booster,
    link: Link,
    base_margin: f32,
    info: ModelInfo,
}

impl XgbRegressor {
    pub fn from_json_model(model: XgbModel) -> Result<Self, ModelError> {
        let learner = &model.learner;
        let param = &learner.learner_model_param;

        let outputs = param.num_class.max(param.num_target);
        if outputs > 1 {
            return Err(ModelError::MultiOutput(outputs));
        }

        let num_features = usize::try_from(param.num_feature).unwrap_or(0);
        let objective = learner.objective.name.clone();
        let link = Link::for_objective(&objective)?;

        let booster = match &learner.gradient_booster {
            GradientBooster::Gbtree { model } => compile_trees(model, None, num_features)?,
            GradientBooster::Dart {
                gbtree,
                weight_drop,
            } => compile_trees(&gbtree.model, Some(weight_drop), num_features)?,
            GradientBooster::Gblinear { model } => {
                // One weight per feature followed by the bias
                if model.weights.len() != num_features + 1 {
                    return Err(ModelError::LinearWeights {
                        expected: num_features + 1,
                        found: model.weights.len(),
                    });
                }
                Booster::Linear {
                    weights: model.weights[..num_features].to_vec(),
                    bias: model.weights[num_features],
                }
            }
        };

        let num_trees = match &booster {
            Booster::Trees { trees, .. } => trees.len(),
            Booster::Linear { .. } => 0,
        };

        let info = ModelInfo {
            xgboost_version: model.version_string(),
            booster: learner.gradient_booster.name().to_string(),
            objective,
            num_trees,
            num_features,
            feature_names: learner.feature_names.clone(),
        };

        Ok(Self {
            booster,
            link,
            base_margin: link.base_margin(param.base_score),
            info,
        })
    }

    pub fn info(&self) -> &ModelInfo {
        &self.info
    }

    /// Check the model's input schema against the feature vector layout
    ///
    /// The feature count is always checked. Names are compared only when
    /// `check_names` is set and the model carries them.
    pub fn validate_schema(
        &self,
        expected: &[&str],
        check_names: bool,
    ) -> Result<SchemaCheck, ModelError> {
        if self.info.num_features != expected.len() {
            return Err(ModelError::FeatureCount {
                expected: expected.len(),
                found: self.info.num_features,
            });
        }

        let names = &self.info.feature_names;
        if !check_names || names.is_empty() {
            return Ok(SchemaCheck::Unnamed);
        }

        if names.len() != expected.len() {
            return Err(ModelError::FeatureCount {
                expected: expected.len(),
                found: names.len(),
            });
        }
        for (position, (found, expected)) in names.iter().zip(expected).enumerate() {
            if found != expected {
                return Err(ModelError::FeatureName {
                    position,
                    expected: expected.to_string(),
                    found: found.clone(),
                });
            }
        }

        Ok(SchemaCheck::Matched)
    }

    /// Evaluate one dense row
    pub fn predict_row(&self, row: &[f32]) -> Result<f64, ModelError> {
        if row.len() != self.info.num_features {
            return Err(ModelError::FeatureCount {
                expected: self.info.num_features,
                found: row.len(),
            });
        }

        let mut margin = self.base_margin as f64;
        match &self.booster {
            Booster::Trees { trees, weights } => {
                for (tree, weight) in trees.iter().zip(weights) {
                    margin += (tree.leaf_value(row) * weight) as f64;
                }
            }
            Booster::Linear { weights, bias } => {
                margin += *bias as f64;
                for (w, x) in weights.iter().zip(row) {
                    // gblinear treats missing values as zero contribution
                    if !x.is_nan() {
                        margin += (*w as f64) * (*x as f64);
                    }
                }
            }
        }

        let prediction = self.link.apply(margin);
        if !prediction.is_finite() {
            return Err(ModelError::Evaluation(format!(
                "model produced a non-finite value ({})",
                prediction
            )));
        }
        Ok(prediction)
    }
}

impl PriceModel for XgbRegressor {
    fn predict(&self, input: &FeatureInput) -> Result<f64, ModelError> {
        self.predict_row(&input.to_row())
    }
}

fn compile_trees(
    model: &ModelTrees,
    weight_drop: Option<&Vec<f32>>,
    num_features: usize,
) -> Result<Booster, ModelError> {
    if model.tree_info.iter().any(|&group| group != 0) {
        return Err(ModelError::MultiOutput(
            model.tree_info.iter().copied().max().unwrap_or(0) as i64 + 1,
        ));
    }

    let trees = model
        .trees
        .iter()
        .enumerate()
        .map(|(idx, tree)| CompiledTree::compile(tree, idx, num_features))
        .collect::<Result<Vec<_>, _>>()?;

    let weights = match weight_drop {
        Some(drop) if !drop.is_empty() => {
            if drop.len() != trees.len() {
                return Err(ModelError::MalformedTree {
                    tree: drop.len().min(trees.len()),
                    reason: format!(
                        "dart model has {} tree weights for {} trees",
                        drop.len(),
                        trees.len()
                    ),
                });
            }
            drop.clone()
        }
        _ => vec![1.0; trees.len()],
    };

    Ok(Booster::Trees { trees, weights })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    /// Single-feature stump: x < 10 -> 1.0, else 3.0 (missing goes right)
    fn stump() -> Value {
        json!({
            "tree_param": {"num_nodes": "3"},
            "left_children": [1, -1, -1],
            "right_children": [2, -1, -1],
            "split_indices": [0, 0, 0],
            "split_conditions": [10.0, 1.0, 3.0],
            "default_left": [0, 0, 0],
            "split_type": [0, 0, 0]
        })
    }

    fn model_json(booster: Value, objective: &str, base_score: &str, num_feature: usize) -> Value {
        json!({
            "version": [2, 0, 3],
            "learner": {
                "feature_names": [],
                "gradient_booster": booster,
                "objective": {"name": objective},
                "learner_model_param": {
                    "base_score": base_score,
                    "num_class": "0",
                    "num_feature": num_feature.to_string(),
                    "num_target": "1"
                }
            }
        })
    }

    fn regressor(value: Value) -> Result<XgbRegressor, ModelError> {
        let model: XgbModel = serde_json::from_value(value).expect("valid model json");
        XgbRegressor::from_json_model(model)
    }

    fn gbtree(trees: Vec<Value>) -> Value {
        let n = trees.len();
        json!({
            "name": "gbtree",
            "model": {
                "trees": trees,
                "tree_info": vec![0; n],
                "gbtree_model_param": {"num_trees": n.to_string(), "num_parallel_tree": "1"}
            }
        })
    }

    #[test]
    fn test_stump_regression() {
        let model = regressor(model_json(gbtree(vec![stump()]), "reg:squarederror", "5E-1", 1))
            .unwrap();

        assert_eq!(model.predict_row(&[5.0]).unwrap(), 1.5);
        assert_eq!(model.predict_row(&[10.0]).unwrap(), 3.5);
        assert_eq!(model.predict_row(&[f32::NAN]).unwrap(), 3.5);
        assert_eq!(model.info().num_trees, 1);
        assert_eq!(model.info().xgboost_version, "2.0.3");
    }

    #[test]
    fn test_trees_are_summed() {
        let model = regressor(model_json(
            gbtree(vec![stump(), stump()]),
            "reg:squarederror",
            "0",
            1,
        ))
        .unwrap();
        assert_eq!(model.predict_row(&[1.0]).unwrap(), 2.0);
    }

    #[test]
    fn test_dart_weights_scale_trees() {
        let booster = json!({
            "name": "dart",
            "gbtree": {"name": "gbtree", "model": {"trees": [stump(), stump()], "tree_info": [0, 0]}},
            "weight_drop": [1.0, 0.5]
        });
        let model = regressor(model_json(booster, "reg:squarederror", "0", 1)).unwrap();
        assert_eq!(model.predict_row(&[20.0]).unwrap(), 4.5);
    }

    #[test]
    fn test_gamma_objective_uses_log_link() {
        let model = regressor(model_json(gbtree(vec![stump()]), "reg:gamma", "1", 1)).unwrap();
        let prediction = model.predict_row(&[0.0]).unwrap();
        assert!((prediction - 1.0f64.exp()).abs() < 1e-6);
    }

    #[test]
    fn test_gblinear() {
        let booster = json!({"name": "gblinear", "model": {"weights": [2.0, 3.0, 1.0]}});
        let model = regressor(model_json(booster, "reg:squarederror", "0.5", 2)).unwrap();
        // 0.5 + 1.0 + 2*1 + 3*2
        assert_eq!(model.predict_row(&[1.0, 2.0]).unwrap(), 9.5);
        assert_eq!(model.info().booster, "gblinear");
    }

    #[test]
    fn test_gblinear_weight_count_checked() {
        let booster = json!({"name": "gblinear", "model": {"weights": [2.0]}});
        let err = regressor(model_json(booster, "reg:squarederror", "0", 2)).unwrap_err();
        assert!(matches!(err, ModelError::LinearWeights { expected: 3, found: 1 }));
    }

    #[test]
    fn test_classification_objective_rejected() {
        let err = regressor(model_json(gbtree(vec![stump()]), "binary:logistic", "0.5", 1))
            .unwrap_err();
        assert!(matches!(err, ModelError::UnsupportedObjective(_)));
    }

    #[test]
    fn test_split_feature_out_of_range() {
        let mut tree = stump();
        tree["split_indices"] = json!([4, 0, 0]);
        let err = regressor(model_json(gbtree(vec![tree]), "reg:squarederror", "0", 1))
            .unwrap_err();
        assert!(matches!(err, ModelError::FeatureOutOfRange { feature: 4, .. }));
    }

    #[test]
    fn test_backward_child_rejected() {
        let mut tree = stump();
        tree["left_children"] = json!([0, -1, -1]);
        let err = regressor(model_json(gbtree(vec![tree]), "reg:squarederror", "0", 1))
            .unwrap_err();
        assert!(matches!(err, ModelError::InvalidNodeIndex { child: 0, .. }));
    }

    #[test]
    fn test_categorical_split_rejected() {
        let mut tree = stump();
        tree["split_type"] = json!([1, 0, 0]);
        let err = regressor(model_json(gbtree(vec![tree]), "reg:squarederror", "0", 1))
            .unwrap_err();
        assert!(matches!(err, ModelError::CategoricalSplit { tree: 0 }));
    }

    #[test]
    fn test_array_length_mismatch_rejected() {
        let mut tree = stump();
        tree["split_conditions"] = json!([10.0, 1.0]);
        let err = regressor(model_json(gbtree(vec![tree]), "reg:squarederror", "0", 1))
            .unwrap_err();
        assert!(err.to_string().contains("split_conditions"));
    }

    #[test]
    fn test_row_length_checked() {
        let model = regressor(model_json(gbtree(vec![stump()]), "reg:squarederror", "0", 1))
            .unwrap();
        assert!(matches!(
            model.predict_row(&[1.0, 2.0]),
            Err(ModelError::FeatureCount { expected: 1, found: 2 })
        ));
    }

    #[test]
    fn test_schema_validation() {
        let mut value = model_json(gbtree(vec![stump()]), "reg:squarederror", "0", 2);
        let model = regressor(value.clone()).unwrap();
        assert_eq!(
            model.validate_schema(&["a", "b"], true).unwrap(),
            SchemaCheck::Unnamed
        );
        assert!(model.validate_schema(&["a", "b", "c"], true).is_err());

        value["learner"]["feature_names"] = json!(["a", "c"]);
        let named = regressor(value).unwrap();
        assert_eq!(
            named.validate_schema(&["a", "c"], true).unwrap(),
            SchemaCheck::Matched
        );
        let err = named.validate_schema(&["a", "b"], true).unwrap_err();
        assert!(matches!(err, ModelError::FeatureName { position: 1, .. }));
        assert_eq!(
            named.validate_schema(&["a", "b"], false).unwrap(),
            SchemaCheck::Unnamed
        );
    }
}
