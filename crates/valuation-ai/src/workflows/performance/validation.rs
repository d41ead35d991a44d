use super::domain::{Metric, MetricSet, Subject, SubjectDraft};

/// Caller input rejected before scoring. Values are never clamped.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("metric {} must lie within [1, 10] (found {value})", .metric.key())]
    MetricOutOfRange { metric: Metric, value: f64 },
    #[error("annual_compensation must be a positive number (found {value})")]
    NonPositiveCompensation { value: f64 },
    #[error("years_experience must not be negative (found {value})")]
    NegativeExperience { value: f64 },
    #[error("display_name must not be blank")]
    MissingDisplayName,
}

impl ValidationError {
    /// Name of the offending input field.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MetricOutOfRange { metric, .. } => metric.key(),
            ValidationError::NonPositiveCompensation { .. } => "annual_compensation",
            ValidationError::NegativeExperience { .. } => "years_experience",
            ValidationError::MissingDisplayName => "display_name",
        }
    }
}

/// Guard applied to every subject before it reaches the calculator.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubjectValidator;

impl SubjectValidator {
    pub fn validate_draft(&self, draft: &SubjectDraft) -> Result<(), ValidationError> {
        check_fields(
            &draft.display_name,
            draft.years_experience,
            draft.annual_compensation,
            &draft.metrics,
        )
    }

    pub fn validate_subject(&self, subject: &Subject) -> Result<(), ValidationError> {
        check_fields(
            &subject.display_name,
            subject.years_experience,
            subject.annual_compensation,
            &subject.metrics,
        )
    }

    pub fn validate_metrics(&self, metrics: &MetricSet) -> Result<(), ValidationError> {
        for (metric, value) in metrics.iter() {
            // NaN fails the range check.
            if !(MetricSet::MIN_SCORE..=MetricSet::MAX_SCORE).contains(&value) {
                return Err(ValidationError::MetricOutOfRange { metric, value });
            }
        }
        Ok(())
    }
}

fn check_fields(
    display_name: &str,
    years_experience: f64,
    annual_compensation: f64,
    metrics: &MetricSet,
) -> Result<(), ValidationError> {
    if display_name.trim().is_empty() {
        return Err(ValidationError::MissingDisplayName);
    }

    if !years_experience.is_finite() || years_experience < 0.0 {
        return Err(ValidationError::NegativeExperience {
            value: years_experience,
        });
    }

    if !annual_compensation.is_finite() || annual_compensation <= 0.0 {
        return Err(ValidationError::NonPositiveCompensation {
            value: annual_compensation,
        });
    }

    SubjectValidator.validate_metrics(metrics)
}
