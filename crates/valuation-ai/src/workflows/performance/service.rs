use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use super::categories::{CategoryTable, ResolvedCategory};
use super::domain::{MetricSet, ScoredSubject, Subject, SubjectDraft, SubjectId};
use super::ranking::rank_population;
use super::repository::{RepositoryError, SubjectRepository};
use super::scoring::{PerformanceRating, ScoreCalculator, ScoringPolicy, SubjectScores};
use super::summary::PopulationSummary;
use super::validation::{SubjectValidator, ValidationError};

static SUBJECT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

pub(crate) fn next_subject_id() -> SubjectId {
    let id = SUBJECT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SubjectId(format!("subj-{id:06}"))
}

/// Point-in-time ranking of the whole population.
#[derive(Debug, Clone, Serialize)]
pub struct RankingSnapshot {
    pub generated_at: DateTime<Utc>,
    pub rankings: Vec<ScoredSubject>,
    pub summary: PopulationSummary,
}

/// Service composing the validator, category table, calculator and repository.
///
/// Nothing derived is cached: every read snapshots the repository and ranks it
/// again, so scores can never go stale after a mutation.
pub struct PerformanceService<R> {
    table: Arc<CategoryTable>,
    calculator: ScoreCalculator,
    repository: Arc<R>,
    validator: SubjectValidator,
}

impl<R> PerformanceService<R>
where
    R: SubjectRepository + 'static,
{
    pub fn new(repository: Arc<R>, table: Arc<CategoryTable>, policy: ScoringPolicy) -> Self {
        Self {
            table,
            calculator: ScoreCalculator::new(policy),
            repository,
            validator: SubjectValidator,
        }
    }

    pub fn table(&self) -> &CategoryTable {
        &self.table
    }

    pub fn policy(&self) -> &ScoringPolicy {
        self.calculator.policy()
    }

    /// Validate and store a new assessment.
    pub fn submit(&self, draft: SubjectDraft) -> Result<Subject, PerformanceServiceError> {
        self.validator.validate_draft(&draft)?;
        // Imported ids may already occupy the generated sequence; draw until one is free.
        loop {
            let subject = draft.clone().into_subject(next_subject_id());
            match self.repository.insert(subject) {
                Err(RepositoryError::Conflict) => {
                    debug!("generated subject id already taken, drawing another");
                }
                result => {
                    let stored = result?;
                    info!(
                        subject_id = %stored.id,
                        role = %stored.role_title,
                        "assessment submitted"
                    );
                    return Ok(stored);
                }
            }
        }
    }

    /// Store a subject whose identifier was assigned upstream (e.g. a CSV import).
    pub fn register(&self, subject: Subject) -> Result<Subject, PerformanceServiceError> {
        self.validator.validate_subject(&subject)?;
        let stored = self.repository.insert(subject)?;
        debug!(subject_id = %stored.id, "subject registered");
        Ok(stored)
    }

    /// Replace a subject's metric set wholesale.
    pub fn replace_metrics(
        &self,
        id: &SubjectId,
        metrics: MetricSet,
    ) -> Result<Subject, PerformanceServiceError> {
        self.validator.validate_metrics(&metrics)?;
        let updated = self.repository.replace_metrics(id, metrics)?;
        info!(subject_id = %id, "assessment metrics replaced");
        Ok(updated)
    }

    pub fn remove(&self, id: &SubjectId) -> Result<Subject, PerformanceServiceError> {
        let removed = self.repository.remove(id)?;
        info!(subject_id = %id, "subject removed from population");
        Ok(removed)
    }

    /// Score an unsaved draft without touching the population.
    pub fn score(&self, draft: &SubjectDraft) -> Result<DraftScore, PerformanceServiceError> {
        self.validator.validate_draft(draft)?;
        let resolved = self.table.resolve(&draft.role_title);
        let subject = draft.clone().into_subject(SubjectId("draft".to_string()));
        let scores = self.calculator.score(&subject, resolved.weights());

        Ok(DraftScore {
            category: resolved.name().to_string(),
            matched_role: resolved.matched,
            rating: scores.rating(),
            scores,
        })
    }

    pub fn rankings(&self) -> Result<RankingSnapshot, PerformanceServiceError> {
        let population = self.repository.snapshot()?;
        let headcount = population.len();
        let rankings = rank_population(population, &self.table, &self.calculator)?;
        let summary = PopulationSummary::from_rankings(&rankings, &self.table);
        debug!(headcount, "population ranked");

        Ok(RankingSnapshot {
            generated_at: Utc::now(),
            rankings,
            summary,
        })
    }

    /// Aggregate view over the current rankings.
    pub fn summary(&self) -> Result<PopulationSummary, PerformanceServiceError> {
        Ok(self.rankings()?.summary)
    }

    /// One subject's population-relative view.
    pub fn scored(&self, id: &SubjectId) -> Result<ScoredSubject, PerformanceServiceError> {
        self.repository.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        let population = self.repository.snapshot()?;
        let rankings = rank_population(population, &self.table, &self.calculator)?;
        rankings
            .into_iter()
            .find(|entry| &entry.subject.id == id)
            .ok_or(PerformanceServiceError::Repository(RepositoryError::NotFound))
    }

    pub fn resolve(&self, role_title: &str) -> ResolvedCategory<'_> {
        self.table.resolve(role_title)
    }
}

/// Scores for a draft that has not been stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DraftScore {
    pub category: String,
    pub matched_role: bool,
    pub rating: PerformanceRating,
    #[serde(flatten)]
    pub scores: SubjectScores,
}

/// Error raised by the performance service.
#[derive(Debug, thiserror::Error)]
pub enum PerformanceServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
