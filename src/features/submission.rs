use serde::Deserialize;

use crate::error::{AppError, Result};

/// Raw form fields exactly as posted.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionForm {
    pub age: String,
    pub sex: String,
    pub bmi: String,
    pub children: String,
    pub smoker: String,
    pub region: String,
}

/// A validated submission.
///
/// Numeric fields are parsed; categorical fields keep the text the user
/// submitted so it can be logged verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub age: u32,
    pub sex: String,
    pub bmi: f64,
    pub children: u32,
    pub smoker: String,
    pub region: String,
}

impl Submission {
    /// Parses the numeric fields of a form.
    ///
    /// # Errors
    /// Returns `AppError::Validation` if `age` or `children` is not a
    /// non-negative integer, `age` is zero, or `bmi` is not a positive
    /// finite number.
    pub fn parse(form: &SubmissionForm) -> Result<Self> {
        let age = parse_count("age", &form.age)?;
        if age == 0 {
            return Err(AppError::validation("age", "must be greater than zero"));
        }

        let bmi = parse_bmi(&form.bmi)?;
        let children = parse_count("children", &form.children)?;

        Ok(Self {
            age,
            sex: form.sex.clone(),
            bmi,
            children,
            smoker: form.smoker.clone(),
            region: form.region.clone(),
        })
    }
}

impl TryFrom<SubmissionForm> for Submission {
    type Error = AppError;

    fn try_from(form: SubmissionForm) -> Result<Self> {
        Self::parse(&form)
    }
}

fn parse_count(field: &'static str, raw: &str) -> Result<u32> {
    raw.trim().parse().map_err(|_| {
        AppError::validation(field, format!("expected a non-negative integer, got '{raw}'"))
    })
}

fn parse_bmi(raw: &str) -> Result<f64> {
    let bmi: f64 = raw
        .trim()
        .parse()
        .map_err(|_| AppError::validation("bmi", format!("expected a number, got '{raw}'")))?;

    if !bmi.is_finite() || bmi <= 0.0 {
        return Err(AppError::validation("bmi", "must be a positive number"));
    }
    Ok(bmi)
}
