use std::{fmt, str::FromStr};

use crate::error::AppError;

/// Residential area in the US, as collected by the form.
///
/// The declaration order is the order of the one-hot slots in the
/// feature vector and must not change without retraining the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Northeast,
    Northwest,
    Southeast,
    Southwest,
}

impl Region {
    pub const ALL: [Region; 4] = [
        Region::Northeast,
        Region::Northwest,
        Region::Southeast,
        Region::Southwest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Northeast => "northeast",
            Region::Northwest => "northwest",
            Region::Southeast => "southeast",
            Region::Southwest => "southwest",
        }
    }

    /// Position of this region's slot inside the one-hot block.
    pub fn slot(&self) -> usize {
        *self as usize
    }

    /// Returns the one-hot encoding of this region.
    pub fn one_hot(&self) -> [f64; 4] {
        let mut out = [0.0; 4];
        out[self.slot()] = 1.0;
        out
    }
}

impl FromStr for Region {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_lowercase();
        Region::ALL
            .into_iter()
            .find(|region| region.as_str() == lowered)
            .ok_or_else(|| {
                let known: Vec<String> = Region::ALL.iter().map(Region::to_string).collect();
                AppError::validation(
                    "region",
                    format!("unknown region '{s}', expected one of {}", known.join(", ")),
                )
            })
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
