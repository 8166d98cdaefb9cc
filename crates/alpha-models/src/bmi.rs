//! Body-mass-index estimator.
//!
//! Weight is in kilograms, height in metres. Raw form text is parsed here so
//! that every caller rejects the same inputs.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Lower bound of the normal band.
pub const NORMAL_FROM: f64 = 18.5;
/// Lower bound of the overweight band.
pub const OVERWEIGHT_FROM: f64 = 25.0;
/// Lower bound of the obese band.
pub const OBESE_FROM: f64 = 30.0;

/// BMI band.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
pub enum BmiCategory {
    /// Below 18.5.
    Underweight,
    /// 18.5 up to (excluding) 25.
    Normal,
    /// 25 up to (excluding) 30.
    Overweight,
    /// 30 and above.
    Obese,
}

impl BmiCategory {
    /// Band for a computed BMI value. Lower bounds are inclusive.
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < NORMAL_FROM {
            Self::Underweight
        } else if bmi < OVERWEIGHT_FROM {
            Self::Normal
        } else if bmi < OBESE_FROM {
            Self::Overweight
        } else {
            Self::Obese
        }
    }

    /// Chat preference sent by the "Consult Trainer" suggestion.
    pub fn consult_preference(self) -> String {
        self.to_string().to_lowercase()
    }
}

/// Result of a successful estimate.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct BmiReport {
    /// `weight / height²`.
    pub bmi: f64,
    /// Band the value falls in.
    pub category: BmiCategory,
}

impl BmiReport {
    /// Compute from already-validated measurements.
    ///
    /// # Errors
    ///
    /// [`ModelError::InvalidBodyMeasurements`] when either value is not a
    /// finite number greater than zero.
    pub fn compute(weight_kg: f64, height_m: f64) -> Result<Self, ModelError> {
        if !is_positive(weight_kg) || !is_positive(height_m) {
            return Err(ModelError::InvalidBodyMeasurements);
        }
        let bmi = weight_kg / (height_m * height_m);
        Ok(Self {
            bmi,
            category: BmiCategory::from_bmi(bmi),
        })
    }

    /// Parse raw form fields and compute.
    ///
    /// # Errors
    ///
    /// [`ModelError::InvalidBodyMeasurements`] for empty, non-numeric, zero or
    /// negative input.
    pub fn from_input(weight: &str, height: &str) -> Result<Self, ModelError> {
        let parse = |raw: &str| {
            raw.trim()
                .parse::<f64>()
                .map_err(|_| ModelError::InvalidBodyMeasurements)
        };
        Self::compute(parse(weight)?, parse(height)?)
    }

    /// Result markup shown under the form.
    pub fn to_html(&self) -> String {
        format!(
            "<strong>BMI:</strong> {:.2}<br><strong>Category:</strong> {}",
            self.bmi, self.category
        )
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands() {
        assert_eq!(BmiCategory::from_bmi(17.0), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_bmi(22.0), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_bmi(27.5), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(41.0), BmiCategory::Obese);
    }

    #[test]
    fn band_boundaries_belong_to_upper_band() {
        assert_eq!(BmiCategory::from_bmi(18.499), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_bmi(18.5), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_bmi(25.0), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(30.0), BmiCategory::Obese);
    }

    #[test]
    fn computes_weight_over_height_squared() {
        let report = BmiReport::compute(100.0, 2.0).unwrap();
        assert!((report.bmi - 25.0).abs() < f64::EPSILON);
        assert_eq!(report.category, BmiCategory::Overweight);
    }

    #[test]
    fn parses_form_text() {
        let report = BmiReport::from_input(" 70 ", "1.75").unwrap();
        assert_eq!(report.category, BmiCategory::Normal);
        assert_eq!(
            report.to_html(),
            "<strong>BMI:</strong> 22.86<br><strong>Category:</strong> Normal"
        );
    }

    #[test]
    fn rejects_zero_negative_and_non_numeric() {
        for (w, h) in [("0", "1.8"), ("70", "0"), ("-5", "1.8"), ("70", "-1"), ("abc", "1.8"), ("", ""), ("NaN", "1.7"), ("inf", "1.7")] {
            assert_eq!(
                BmiReport::from_input(w, h),
                Err(ModelError::InvalidBodyMeasurements),
                "{w:?} / {h:?}"
            );
        }
    }

    #[test]
    fn consult_preference_is_lowercase_category() {
        assert_eq!(BmiCategory::Overweight.consult_preference(), "overweight");
    }
}
