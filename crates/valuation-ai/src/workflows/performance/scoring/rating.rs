use serde::{Deserialize, Serialize};

/// Review band derived from the performance score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceRating {
    Unsatisfactory,
    NeedsImprovement,
    MeetsExpectations,
    ExceedsExpectations,
    Exceptional,
}

impl PerformanceRating {
    pub fn from_score(score: f64) -> Self {
        if score >= 9.0 {
            Self::Exceptional
        } else if score >= 7.5 {
            Self::ExceedsExpectations
        } else if score >= 6.0 {
            Self::MeetsExpectations
        } else if score >= 4.0 {
            Self::NeedsImprovement
        } else {
            Self::Unsatisfactory
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Exceptional => "Exceptional",
            Self::ExceedsExpectations => "Exceeds Expectations",
            Self::MeetsExpectations => "Meets Expectations",
            Self::NeedsImprovement => "Needs Improvement",
            Self::Unsatisfactory => "Unsatisfactory",
        }
    }

    /// Best band first.
    pub fn ordered() -> [Self; 5] {
        [
            Self::Exceptional,
            Self::ExceedsExpectations,
            Self::MeetsExpectations,
            Self::NeedsImprovement,
            Self::Unsatisfactory,
        ]
    }
}
