use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};
use valuation_ai::config::ScoringConfig;
use valuation_ai::workflows::performance::{
    CategoryTable, CategoryTableError, MetricSet, RepositoryError, Subject, SubjectId,
    SubjectRepository,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Insertion-ordered population store; ranking ties depend on this order.
#[derive(Default, Clone)]
pub(crate) struct InMemorySubjectRepository {
    subjects: Arc<Mutex<Vec<Subject>>>,
}

impl InMemorySubjectRepository {
    fn lock(&self) -> Result<MutexGuard<'_, Vec<Subject>>, RepositoryError> {
        self.subjects
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".to_string()))
    }
}

impl SubjectRepository for InMemorySubjectRepository {
    fn insert(&self, subject: Subject) -> Result<Subject, RepositoryError> {
        let mut guard = self.lock()?;
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
        let mut guard = self.lock()?;
        match guard.iter_mut().find(|existing| &existing.id == id) {
            Some(subject) => {
                subject.metrics = metrics;
                Ok(subject.clone())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn remove(&self, id: &SubjectId) -> Result<Subject, RepositoryError> {
        let mut guard = self.lock()?;
        match guard.iter().position(|existing| &existing.id == id) {
            Some(index) => Ok(guard.remove(index)),
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: &SubjectId) -> Result<Option<Subject>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.iter().find(|existing| &existing.id == id).cloned())
    }

    fn snapshot(&self) -> Result<Vec<Subject>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.clone())
    }
}

/// A `--categories` path wins over `SCORING_CATEGORIES_PATH`.
pub(crate) fn load_category_table(
    override_path: Option<&Path>,
    scoring: &ScoringConfig,
) -> Result<CategoryTable, CategoryTableError> {
    match override_path {
        Some(path) => CategoryTable::from_path(path),
        None => scoring.category_table(),
    }
}
