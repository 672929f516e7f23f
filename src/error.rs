//! Error types for the cache crate
//!
//! Provides the error taxonomy using thiserror. Failures are split by origin
//! so callers can tell a broken cache apart from a failed upstream fetch.

use thiserror::Error;

// == Storage Error ==
/// The durable key-value backend could not complete an operation.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Underlying device or storage service failed
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

// == Store Error ==
/// Errors surfaced by `CacheStore` operations.
///
/// A decode failure is never collapsed into a miss: callers see it and can
/// recover with an explicit invalidation.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backend could not complete a read/write/delete/list
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// The value could not be serialized at the storage boundary
    #[error("failed to serialize cached value: {0}")]
    Serialize(#[source] serde_json::Error),

    /// A persisted entry could not be decoded as the requested type
    #[error("failed to deserialize cached value: {0}")]
    Deserialize(#[source] serde_json::Error),
}

// == Fetch Error ==
/// Errors surfaced by the fetch-through accessor.
///
/// The producer's error type `E` is carried unchanged, so a caller that wants
/// to retry only upstream failures can match on the variant.
#[derive(Error, Debug)]
pub enum FetchError<E> {
    /// The cache store failed; the producer may never have been invoked
    #[error("cache storage error: {0}")]
    Storage(#[from] StoreError),

    /// The caller-supplied producer failed; nothing was written to the store
    #[error("upstream fetch failed: {0}")]
    Producer(E),
}

impl<E> FetchError<E> {
    // == Is Producer ==
    /// Returns true if the failure came from the caller-supplied producer.
    pub fn is_producer(&self) -> bool {
        matches!(self, FetchError::Producer(_))
    }

    // == Is Storage ==
    /// Returns true if the failure came from the cache store or its backend.
    pub fn is_storage(&self) -> bool {
        matches!(self, FetchError::Storage(_))
    }

    // == Into Producer ==
    /// Unwraps the producer error, if that is what this failure is.
    pub fn into_producer(self) -> Option<E> {
        match self {
            FetchError::Producer(e) => Some(e),
            FetchError::Storage(_) => None,
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_kind_helpers() {
        let producer: FetchError<String> = FetchError::Producer("network down".to_string());
        assert!(producer.is_producer());
        assert!(!producer.is_storage());

        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk gone");
        let storage: FetchError<String> = FetchError::Storage(StoreError::Storage(io.into()));
        assert!(storage.is_storage());
        assert!(!storage.is_producer());
    }

    #[test]
    fn test_fetch_error_into_producer() {
        let err: FetchError<&str> = FetchError::Producer("timeout");
        assert_eq!(err.into_producer(), Some("timeout"));

        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk gone");
        let err: FetchError<&str> = FetchError::Storage(StoreError::Storage(io.into()));
        assert_eq!(err.into_producer(), None);
    }

    #[test]
    fn test_storage_error_display() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing dir");
        let err = StorageError::Io(io);
        assert!(err.to_string().contains("storage I/O failed"));
    }
}
