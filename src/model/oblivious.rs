use serde::Deserialize;

use crate::{
    error::{AppError, Result},
    features::{FeatureVector, FEATURE_COUNT},
};

/// Deepest tree accepted; bounds the leaf table at 2^16 entries.
const MAX_DEPTH: usize = 16;

/// Gradient boosted ensemble of oblivious (symmetric) decision trees, as
/// exported by CatBoost in its JSON model format.
///
/// Every level of an oblivious tree applies the same split, so a tree is
/// just `depth` splits plus `2^depth` leaf values. Split `d` sets bit `d`
/// of the leaf index when `x[feature] > border`.
#[derive(Debug, Clone, Deserialize)]
pub struct ObliviousEnsemble {
    oblivious_trees: Vec<ObliviousTree>,
    #[serde(default)]
    scale_and_bias: ScaleAndBias,
}

#[derive(Debug, Clone, Deserialize)]
struct ObliviousTree {
    #[serde(default)]
    splits: Vec<Split>,
    leaf_values: Vec<f64>,
}

#[derive(Debug, Clone, Deserialize)]
struct Split {
    float_feature_index: usize,
    border: f64,
    #[serde(default = "float_feature")]
    split_type: String,
}

fn float_feature() -> String {
    "FloatFeature".to_string()
}

/// `[scale, bias]` or `[scale, [bias]]`, depending on the exporter version.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "(f64, Bias)")]
struct ScaleAndBias {
    scale: f64,
    bias: Bias,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Bias {
    Scalar(f64),
    PerDimension(Vec<f64>),
}

impl Default for ScaleAndBias {
    fn default() -> Self {
        Self {
            scale: 1.0,
            bias: Bias::Scalar(0.0),
        }
    }
}

impl From<(f64, Bias)> for ScaleAndBias {
    fn from((scale, bias): (f64, Bias)) -> Self {
        Self { scale, bias }
    }
}

impl ScaleAndBias {
    fn bias(&self) -> f64 {
        match &self.bias {
            Bias::Scalar(b) => *b,
            Bias::PerDimension(v) => v.first().copied().unwrap_or(0.0),
        }
    }
}

impl ObliviousEnsemble {
    /// Number of trees in the ensemble.
    pub fn len(&self) -> usize {
        self.oblivious_trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.oblivious_trees.is_empty()
    }

    /// Checks structural invariants the evaluator relies on.
    pub(super) fn validate(&self) -> std::result::Result<(), String> {
        if let Bias::PerDimension(v) = &self.scale_and_bias.bias {
            if v.len() > 1 {
                return Err(format!(
                    "expected a single-output regressor, got {} bias values",
                    v.len()
                ));
            }
        }

        for (t, tree) in self.oblivious_trees.iter().enumerate() {
            let depth = tree.splits.len();
            if depth > MAX_DEPTH {
                return Err(format!("tree {t} has depth {depth}, max is {MAX_DEPTH}"));
            }

            let expected = 1usize << depth;
            if tree.leaf_values.len() != expected {
                return Err(format!(
                    "tree {t} has {} leaf values, expected {expected}",
                    tree.leaf_values.len()
                ));
            }

            for split in &tree.splits {
                if split.split_type != "FloatFeature" {
                    return Err(format!(
                        "tree {t} uses unsupported split type '{}'",
                        split.split_type
                    ));
                }
                if split.float_feature_index >= FEATURE_COUNT {
                    return Err(format!(
                        "tree {t} splits on feature {}, but only {FEATURE_COUNT} features exist",
                        split.float_feature_index
                    ));
                }
            }
        }

        Ok(())
    }

    pub fn predict(&self, x: &FeatureVector) -> Result<f64> {
        let mut sum = 0.0;
        for tree in &self.oblivious_trees {
            sum += tree.eval(x)?;
        }

        let out = self.scale_and_bias.scale * sum + self.scale_and_bias.bias();
        if !out.is_finite() {
            return Err(AppError::ModelInvocation(format!(
                "ensemble produced a non-finite value ({out})"
            )));
        }
        Ok(out)
    }
}

impl ObliviousTree {
    fn eval(&self, x: &FeatureVector) -> Result<f64> {
        let mut idx = 0usize;
        for (depth, split) in self.splits.iter().enumerate() {
            let value = x.get(split.float_feature_index).ok_or_else(|| {
                AppError::ModelInvocation(format!(
                    "feature {} out of range",
                    split.float_feature_index
                ))
            })?;
            if value > split.border {
                idx |= 1 << depth;
            }
        }

        self.leaf_values
            .get(idx)
            .copied()
            .ok_or_else(|| AppError::ModelInvocation(format!("leaf {idx} out of range")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::encode;

    // Two trees: one splitting on smoker, one on (age > 50, bmi > 30).
    const ENSEMBLE: &str = r#"{
        "oblivious_trees": [
            {
                "splits": [{"float_feature_index": 4, "border": 0.5, "split_type": "FloatFeature"}],
                "leaf_values": [100.0, 2000.0]
            },
            {
                "splits": [
                    {"float_feature_index": 0, "border": 50.0, "split_type": "FloatFeature"},
                    {"float_feature_index": 2, "border": 30.0, "split_type": "FloatFeature"}
                ],
                "leaf_values": [10.0, 20.0, 30.0, 40.0]
            }
        ],
        "scale_and_bias": [1.5, [1000.0]]
    }"#;

    fn ensemble() -> ObliviousEnsemble {
        let e: ObliviousEnsemble = serde_json::from_str(ENSEMBLE).unwrap();
        e.validate().unwrap();
        e
    }

    #[test]
    fn leaf_index_bits_follow_split_order() {
        let e = ensemble();

        // non-smoker, age <= 50, bmi <= 30: leaves 0 and 0
        let x = encode(30, "female", 25.0, 0, "no", "northeast").unwrap();
        assert_eq!(e.predict(&x).unwrap(), 1.5 * (100.0 + 10.0) + 1000.0);

        // smoker, age > 50, bmi <= 30: leaves 1 and 0b01
        let x = encode(60, "female", 25.0, 0, "yes", "northeast").unwrap();
        assert_eq!(e.predict(&x).unwrap(), 1.5 * (2000.0 + 20.0) + 1000.0);

        // non-smoker, age <= 50, bmi > 30: leaves 0 and 0b10
        let x = encode(40, "male", 30.2, 2, "no", "southeast").unwrap();
        assert_eq!(e.predict(&x).unwrap(), 1.5 * (100.0 + 30.0) + 1000.0);
    }

    #[test]
    fn border_comparison_is_strict() {
        let e = ensemble();
        let at_border = encode(50, "male", 30.0, 0, "no", "northwest").unwrap();
        assert_eq!(e.predict(&at_border).unwrap(), 1.5 * 110.0 + 1000.0);
    }

    #[test]
    fn scalar_bias_and_missing_scale_are_accepted() {
        let e: ObliviousEnsemble = serde_json::from_str(
            r#"{"oblivious_trees": [{"splits": [], "leaf_values": [7.0]}], "scale_and_bias": [2.0, 1.0]}"#,
        )
        .unwrap();
        let x = encode(30, "male", 25.0, 0, "no", "northeast").unwrap();
        assert_eq!(e.predict(&x).unwrap(), 15.0);

        let e: ObliviousEnsemble =
            serde_json::from_str(r#"{"oblivious_trees": [{"splits": [], "leaf_values": [7.0]}]}"#)
                .unwrap();
        assert_eq!(e.predict(&x).unwrap(), 7.0);
    }

    #[test]
    fn wrong_leaf_count_fails_validation() {
        let e: ObliviousEnsemble = serde_json::from_str(
            r#"{"oblivious_trees": [{"splits": [{"float_feature_index": 0, "border": 1.0}], "leaf_values": [1.0]}]}"#,
        )
        .unwrap();
        assert!(e.validate().unwrap_err().contains("leaf values"));
    }

    #[test]
    fn out_of_range_feature_fails_validation() {
        let e: ObliviousEnsemble = serde_json::from_str(
            r#"{"oblivious_trees": [{"splits": [{"float_feature_index": 9, "border": 1.0}], "leaf_values": [1.0, 2.0]}]}"#,
        )
        .unwrap();
        assert!(e.validate().unwrap_err().contains("feature 9"));
    }

    #[test]
    fn categorical_splits_are_unsupported() {
        let e: ObliviousEnsemble = serde_json::from_str(
            r#"{"oblivious_trees": [{"splits": [{"float_feature_index": 1, "border": 0.5, "split_type": "OnlineCtr"}], "leaf_values": [1.0, 2.0]}]}"#,
        )
        .unwrap();
        assert!(e.validate().unwrap_err().contains("OnlineCtr"));
    }

    #[test]
    fn multi_output_bias_is_rejected() {
        let e: ObliviousEnsemble = serde_json::from_str(
            r#"{"oblivious_trees": [], "scale_and_bias": [1.0, [0.0, 1.0]]}"#,
        )
        .unwrap();
        assert!(e.validate().is_err());
    }
}
