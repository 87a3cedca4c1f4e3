use super::{region::Region, submission::Submission};
use crate::error::Result;

/// Number of model inputs.
pub const FEATURE_COUNT: usize = 9;

/// Column names in the order the model was trained on.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "age", "sex", "bmi", "children", "smoker", "region_0", "region_1", "region_2", "region_3",
];

/// Fixed-order numeric input for the predictor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn get(&self, idx: usize) -> Option<f64> {
        self.0.get(idx).copied()
    }

    /// The four one-hot region slots.
    pub fn region_slots(&self) -> &[f64] {
        &self.0[5..]
    }
}

/// Maps raw submission fields to the model's feature vector.
///
/// `sex` encodes as 1 only for "male" and `smoker` only for "yes" (both
/// case-insensitive); any other text silently encodes as 0. `region` must
/// be one of the four known regions.
///
/// # Errors
/// Returns `AppError::Validation` if `region` is not recognised.
pub fn encode(
    age: u32,
    sex: &str,
    bmi: f64,
    children: u32,
    smoker: &str,
    region: &str,
) -> Result<FeatureVector> {
    let region: Region = region.parse()?;
    let [r0, r1, r2, r3] = region.one_hot();

    Ok(FeatureVector([
        age as f64,
        flag(sex, "male"),
        bmi,
        children as f64,
        flag(smoker, "yes"),
        r0,
        r1,
        r2,
        r3,
    ]))
}

/// Encodes a parsed submission.
pub fn encode_submission(submission: &Submission) -> Result<FeatureVector> {
    encode(
        submission.age,
        &submission.sex,
        submission.bmi,
        submission.children,
        &submission.smoker,
        &submission.region,
    )
}

fn flag(value: &str, truthy: &str) -> f64 {
    if value.to_lowercase() == truthy {
        1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn encodes_reference_submission() {
        let v = encode(30, "male", 25.0, 0, "yes", "northeast").unwrap();
        assert_eq!(
            v.as_slice(),
            &[30.0, 1.0, 25.0, 0.0, 1.0, 1.0, 0.0, 0.0, 0.0]
        );
    }

    #[test]
    fn region_is_case_insensitive() {
        let upper = encode(52, "female", 31.1, 3, "no", "Northeast").unwrap();
        let lower = encode(52, "female", 31.1, 3, "no", "northeast").unwrap();
        assert_eq!(upper, lower);
    }

    #[test]
    fn unrecognised_sex_silently_encodes_as_zero() {
        let female = encode(40, "Female", 22.0, 1, "no", "southwest").unwrap();
        let unknown = encode(40, "unknown", 22.0, 1, "no", "southwest").unwrap();
        assert_eq!(female.get(1), Some(0.0));
        assert_eq!(unknown.get(1), Some(0.0));
        assert_eq!(encode(40, "MALE", 22.0, 1, "no", "southwest").unwrap().get(1), Some(1.0));
    }

    #[test]
    fn unrecognised_smoker_silently_encodes_as_zero() {
        let v = encode(40, "male", 22.0, 1, "sometimes", "southwest").unwrap();
        assert_eq!(v.get(4), Some(0.0));
        let v = encode(40, "male", 22.0, 1, "YES", "southwest").unwrap();
        assert_eq!(v.get(4), Some(1.0));
    }

    #[test]
    fn unknown_region_is_rejected() {
        let err = encode(40, "male", 22.0, 1, "no", "atlantis").unwrap_err();
        assert!(matches!(err, AppError::Validation { field: "region", .. }));
    }

    #[test]
    fn every_region_yields_a_single_hot_slot() {
        for region in Region::ALL {
            for (sex, smoker) in [("male", "yes"), ("female", "no"), ("x", "y")] {
                let v = encode(19, sex, 27.9, 0, smoker, region.as_str()).unwrap();
                assert_eq!(v.as_slice().len(), FEATURE_COUNT);
                assert_eq!(v.region_slots().iter().sum::<f64>(), 1.0);
                assert_eq!(v.region_slots()[region.slot()], 1.0);
                assert!(matches!(v.get(1), Some(s) if s == 0.0 || s == 1.0));
                assert!(matches!(v.get(4), Some(s) if s == 0.0 || s == 1.0));
            }
        }
    }
}
