use super::domain::{MetricSet, Subject, SubjectId};

/// Storage abstraction for the assessed population so the service can be exercised
/// in isolation. Implementations own their synchronisation.
pub trait SubjectRepository: Send + Sync {
    fn insert(&self, subject: Subject) -> Result<Subject, RepositoryError>;
    /// Replaces the metric set wholesale; partial updates are not supported.
    fn replace_metrics(&self, id: &SubjectId, metrics: MetricSet)
        -> Result<Subject, RepositoryError>;
    fn remove(&self, id: &SubjectId) -> Result<Subject, RepositoryError>;
    fn fetch(&self, id: &SubjectId) -> Result<Option<Subject>, RepositoryError>;
    /// Owned copy of the population in insertion order.
    fn snapshot(&self) -> Result<Vec<Subject>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
