use serde::{Deserialize, Serialize};

/// Policy dials for the value and composite scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringPolicy {
    pub reference_salary: f64,
    pub salary_cap_multiple: f64,
    pub reference_experience_years: f64,
    pub max_experience_bonus: f64,
    pub performance_blend: f64,
    pub value_blend: f64,
}

impl ScoringPolicy {
    pub const REFERENCE_SALARY: f64 = 200_000.0;
    pub const SALARY_CAP_MULTIPLE: f64 = 2.0;
    pub const REFERENCE_EXPERIENCE_YEARS: f64 = 20.0;
    pub const MAX_EXPERIENCE_BONUS: f64 = 0.2;
    pub const PERFORMANCE_BLEND: f64 = 0.7;
    pub const VALUE_BLEND: f64 = 0.3;

    pub fn validate(&self) -> Result<(), PolicyError> {
        let positive = [
            ("reference_salary", self.reference_salary),
            ("salary_cap_multiple", self.salary_cap_multiple),
            ("reference_experience_years", self.reference_experience_years),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(PolicyError::NotPositive { field, value });
            }
        }

        if !self.max_experience_bonus.is_finite() || self.max_experience_bonus < 0.0 {
            return Err(PolicyError::Negative {
                field: "max_experience_bonus",
                value: self.max_experience_bonus,
            });
        }

        for (field, value) in [
            ("performance_blend", self.performance_blend),
            ("value_blend", self.value_blend),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(PolicyError::BlendOutOfRange { field, value });
            }
        }

        let total = self.performance_blend + self.value_blend;
        if (total - 1.0).abs() > 1e-9 {
            return Err(PolicyError::BlendSum { total });
        }

        Ok(())
    }
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            reference_salary: Self::REFERENCE_SALARY,
            salary_cap_multiple: Self::SALARY_CAP_MULTIPLE,
            reference_experience_years: Self::REFERENCE_EXPERIENCE_YEARS,
            max_experience_bonus: Self::MAX_EXPERIENCE_BONUS,
            performance_blend: Self::PERFORMANCE_BLEND,
            value_blend: Self::VALUE_BLEND,
        }
    }
}

/// Rejected policy values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PolicyError {
    #[error("{field} must be a positive number (found {value})")]
    NotPositive { field: &'static str, value: f64 },
    #[error("{field} must not be negative (found {value})")]
    Negative { field: &'static str, value: f64 },
    #[error("{field} must lie within [0, 1] (found {value})")]
    BlendOutOfRange { field: &'static str, value: f64 },
    #[error("performance_blend and value_blend must sum to 1 (found {total})")]
    BlendSum { total: f64 },
}
