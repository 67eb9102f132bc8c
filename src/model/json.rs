//! XGBoost JSON model format.
//!
//! Parsing-only types for the document written by `Booster.save_model("*.json")`.
//! Fields the predictor does not need are ignored. XGBoost writes most scalar
//! parameters as strings, so integer fields accept either form.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use serde_with::{formats::Flexible, serde_as, BoolFromInt, DisplayFromStr, PickFirst};

// =============================================================================
// base_score
// =============================================================================

/// `base_score` appears as `0.5`, `"5E-1"` or `"[5E-1]"` depending on the XGBoost version
fn deserialize_base_score<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error as SerdeError;

    let mut cur = Value::deserialize(deserializer)?;
    loop {
        match cur {
            Value::Number(n) => {
                return n
                    .as_f64()
                    .map(|f| f as f32)
                    .ok_or_else(|| SerdeError::custom("invalid base_score number"));
            }
            Value::String(s) => {
                let t = s.trim();
                if let Ok(f) = t.parse::<f32>() {
                    return Ok(f);
                }
                if t.starts_with('[') && t.ends_with(']') {
                    cur = Value::String(t[1..t.len() - 1].to_string());
                    continue;
                }
                return Err(SerdeError::custom(format!(
                    "cannot parse base_score from string: {}",
                    s
                )));
            }
            Value::Array(arr) => match arr.into_iter().next() {
                Some(first) => cur = first,
                None => return Err(SerdeError::custom("empty base_score array")),
            },
            _ => {
                return Err(SerdeError::custom(
                    "base_score must be number, string, or array",
                ))
            }
        }
    }
}

fn default_num_target() -> i64 {
    1
}

// =============================================================================
// Tree / booster definitions
// =============================================================================

#[serde_as]
#[derive(Debug, Clone, Deserialize)]
pub struct TreeParam {
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub num_nodes: i64,
}

/// `default_left` is written as integers by XGBoost 2.x and as booleans by some exporters
#[serde_as]
#[derive(Debug, Clone, Deserialize)]
pub struct Tree {
    pub tree_param: TreeParam,
    #[serde(default)]
    pub id: i32,
    pub left_children: Vec<i32>,
    pub right_children: Vec<i32>,
    pub split_indices: Vec<i32>,
    pub split_conditions: Vec<f32>,
    #[serde_as(as = "Vec<PickFirst<(_, BoolFromInt<Flexible>)>>")]
    pub default_left: Vec<bool>,
    #[serde(default)]
    pub split_type: Vec<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelTrees {
    pub trees: Vec<Tree>,
    #[serde(default)]
    pub tree_info: Vec<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GbLinearModel {
    pub weights: Vec<f32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GBTreeDefinition {
    pub model: ModelTrees,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "name", rename_all = "lowercase")]
pub enum GradientBooster {
    Gbtree {
        model: ModelTrees,
    },
    Gblinear {
        model: GbLinearModel,
    },
    Dart {
        gbtree: GBTreeDefinition,
        weight_drop: Vec<f32>,
    },
}

impl GradientBooster {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Gbtree { .. } => "gbtree",
            Self::Gblinear { .. } => "gblinear",
            Self::Dart { .. } => "dart",
        }
    }
}

// =============================================================================
// Learner
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct ObjectiveSpec {
    pub name: String,
}

#[serde_as]
#[derive(Debug, Clone, Deserialize)]
pub struct LearnerModelParam {
    #[serde(deserialize_with = "deserialize_base_score")]
    pub base_score: f32,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[serde(default)]
    pub num_class: i64,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub num_feature: i64,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[serde(default = "default_num_target")]
    pub num_target: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Learner {
    #[serde(default)]
    pub feature_names: Vec<String>,
    pub gradient_booster: GradientBooster,
    pub objective: ObjectiveSpec,
    pub learner_model_param: LearnerModelParam,
}

#[derive(Debug, Clone, Deserialize)]
pub struct XgbModel {
    #[serde(default)]
    pub version: Vec<u32>,
    pub learner: Learner,
}

impl XgbModel {
    /// Dotted version string of the XGBoost release that wrote the model
    pub fn version_string(&self) -> String {
        if self.version.is_empty() {
            return "unknown".to_string();
        }
        self.version
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(".")
    }
}
