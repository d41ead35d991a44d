//! Weighted performance and value scoring for valuation-practice staff.
//!
//! A role title resolves to a category weight vector, the calculator turns a subject's
//! sixteen metrics into performance, value and composite scores, and the ranking step
//! orders a population snapshot by composite score.

pub mod categories;
pub mod domain;
pub mod import;
pub mod ranking;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod summary;
pub mod validation;

#[cfg(test)]
mod tests;

pub use categories::{
    CategoryProfile, CategoryTable, CategoryTableError, CategoryTableFile, ResolvedCategory,
    WeightVector,
};
pub use domain::{Metric, MetricSet, ScoredSubject, Subject, SubjectDraft, SubjectId};
pub use import::{SubjectCsvImporter, SubjectImportError};
pub use ranking::rank_population;
pub use repository::{RepositoryError, SubjectRepository};
pub use router::performance_router;
pub use scoring::{
    MetricContribution, PerformanceRating, PolicyError, ScoreCalculator, ScoringPolicy,
    SubjectScores,
};
pub use service::{DraftScore, PerformanceService, PerformanceServiceError, RankingSnapshot};
pub use summary::{CategoryHeadcount, MetricAverage, PopulationSummary, RatingCount};
pub use validation::{SubjectValidator, ValidationError};
