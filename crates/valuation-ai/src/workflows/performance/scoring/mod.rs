mod config;
mod rating;
mod rules;

pub use config::{PolicyError, ScoringPolicy};
pub use rating::PerformanceRating;

use serde::{Deserialize, Serialize};

use super::categories::WeightVector;
use super::domain::{Metric, Subject};

/// Stateless calculator that applies the scoring policy to one subject.
#[derive(Debug, Clone, Default)]
pub struct ScoreCalculator {
    policy: ScoringPolicy,
}

impl ScoreCalculator {
    pub fn new(policy: ScoringPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    /// Scores a subject that has already passed validation.
    pub fn score(&self, subject: &Subject, weights: &WeightVector) -> SubjectScores {
        let (performance_score, contributions) =
            rules::performance_score(&subject.metrics, weights);
        let value_score = rules::value_score(
            performance_score,
            subject.years_experience,
            subject.annual_compensation,
            &self.policy,
        );
        let composite_score = rules::composite_score(performance_score, value_score, &self.policy);

        SubjectScores {
            performance_score,
            value_score,
            composite_score,
            contributions,
        }
    }
}

/// Weighted contribution of one metric, kept for audit displays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricContribution {
    pub metric: Metric,
    pub value: f64,
    pub weight: f64,
    pub weighted: f64,
}

/// Scores computed for one subject, independent of the population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectScores {
    pub performance_score: f64,
    pub value_score: f64,
    pub composite_score: f64,
    pub contributions: Vec<MetricContribution>,
}

impl SubjectScores {
    pub fn rating(&self) -> PerformanceRating {
        PerformanceRating::from_score(self.performance_score)
    }
}
