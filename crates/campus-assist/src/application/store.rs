use super::domain::ApplicationRecord;

/// Storage abstraction over the key-value application table.
///
/// Records are stored whole, keyed by the student's full name; there are no
/// partial updates. Two concurrent uploads for the same student can therefore
/// interleave and the later write wins (known open issue, not mitigated).
pub trait ApplicationStore: Send + Sync {
    fn fetch(&self, full_name: &str) -> Result<Option<ApplicationRecord>, StoreError>;
    fn fetch_by_student_id(&self, student_id: &str)
        -> Result<Option<ApplicationRecord>, StoreError>;
    fn put(&self, record: ApplicationRecord) -> Result<(), StoreError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("application store unavailable: {0}")]
    Unavailable(String),
}
