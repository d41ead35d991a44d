use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::performance::categories::CategoryTable;
use crate::workflows::performance::domain::{
    Metric, MetricSet, Subject, SubjectDraft, SubjectId,
};
use crate::workflows::performance::repository::{RepositoryError, SubjectRepository};
use crate::workflows::performance::scoring::{ScoreCalculator, ScoringPolicy};
use crate::workflows::performance::service::PerformanceService;

pub(super) const EPSILON: f64 = 1e-9;

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "expected {expected}, got {actual}"
    );
}

pub(super) fn table() -> CategoryTable {
    CategoryTable::builtin()
}

pub(super) fn calculator() -> ScoreCalculator {
    ScoreCalculator::new(ScoringPolicy::default())
}

/// Policy where the composite score equals the performance score.
pub(super) fn performance_only_calculator() -> ScoreCalculator {
    ScoreCalculator::new(ScoringPolicy {
        performance_blend: 1.0,
        value_blend: 0.0,
        ..ScoringPolicy::default()
    })
}

pub(super) fn subject(id: &str, role: &str, metrics: MetricSet) -> Subject {
    Subject {
        id: SubjectId(id.to_string()),
        display_name: format!("Staff {id}"),
        role_title: role.to_string(),
        years_experience: 10.0,
        annual_compensation: 100_000.0,
        metrics,
    }
}

pub(super) fn draft(role: &str, metrics: MetricSet) -> SubjectDraft {
    SubjectDraft {
        display_name: "Jordan Ellis".to_string(),
        role_title: role.to_string(),
        years_experience: 10.0,
        annual_compensation: 100_000.0,
        metrics,
    }
}

/// Deterministic spread of metric values across [1, 10].
pub(super) fn varied_metrics(seed: u64) -> MetricSet {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    let mut metrics = MetricSet::uniform(1.0);
    for metric in Metric::ALL {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let unit = (state >> 11) as f64 / (1u64 << 53) as f64;
        metrics.set(metric, 1.0 + unit * 9.0);
    }
    metrics
}

pub(super) fn build_service() -> (PerformanceService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = PerformanceService::new(
        repository.clone(),
        Arc::new(table()),
        ScoringPolicy::default(),
    );
    (service, repository)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) subjects: Arc<Mutex<Vec<Subject>>>,
}

impl SubjectRepository for MemoryRepository {
    fn insert(&self, subject: Subject) -> Result<Subject, RepositoryError> {
        let mut guard = self.subjects.lock().expect("repository mutex poisoned");
        if guard.iter().any(|existing| existing.id == subject.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(subject.clone());
        Ok(subject)
    }

    fn replace_metrics(
        &self,
        id: &SubjectId,
        metrics: MetricSet,
    ) -> Result<Subject, RepositoryError> {
        let mut guard = self.subjects.lock().expect("repository mutex poisoned");
        let subject = guard
            .iter_mut()
            .find(|existing| &existing.id == id)
            .ok_or(RepositoryError::NotFound)?;
        subject.metrics = metrics;
        Ok(subject.clone())
    }

    fn remove(&self, id: &SubjectId) -> Result<Subject, RepositoryError> {
        let mut guard = self.subjects.lock().expect("repository mutex poisoned");
        let index = guard
            .iter()
            .position(|existing| &existing.id == id)
            .ok_or(RepositoryError::NotFound)?;
        Ok(guard.remove(index))
    }

    fn fetch(&self, id: &SubjectId) -> Result<Option<Subject>, RepositoryError> {
        let guard = self.subjects.lock().expect("repository mutex poisoned");
        Ok(guard.iter().find(|existing| &existing.id == id).cloned())
    }

    fn snapshot(&self) -> Result<Vec<Subject>, RepositoryError> {
        Ok(self.subjects.lock().expect("repository mutex poisoned").clone())
    }
}

pub(super) struct UnavailableRepository;

impl SubjectRepository for UnavailableRepository {
    fn insert(&self, _subject: Subject) -> Result<Subject, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn replace_metrics(
        &self,
        _id: &SubjectId,
        _metrics: MetricSet,
    ) -> Result<Subject, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn remove(&self, _id: &SubjectId) -> Result<Subject, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &SubjectId) -> Result<Option<Subject>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn snapshot(&self) -> Result<Vec<Subject>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
