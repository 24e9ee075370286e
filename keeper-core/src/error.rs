use thiserror::Error;

/// Outcome taxonomy shared by both conditional-create services.
///
/// `DuplicateIdentity` is a normal result of the uniqueness protocol, not a
/// fault; callers should branch on [`KeeperError::is_duplicate`] before
/// treating anything as an infrastructure failure.
#[derive(Error, Debug)]
pub enum KeeperError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("already exists: {0}")]
    DuplicateIdentity(String),

    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("store write failed: {0}")]
    StoreWriteFailed(String),

    #[error("stage write failed: {0}")]
    StageWriteFailed(String),

    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    DuplicateIdentity,
    StoreUnavailable,
    StoreWriteFailed,
    StageWriteFailed,
    UpstreamUnavailable,
    Io,
}

impl KeeperError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            KeeperError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            KeeperError::DuplicateIdentity(_) => ErrorKind::DuplicateIdentity,
            KeeperError::StoreUnavailable(_) => ErrorKind::StoreUnavailable,
            KeeperError::StoreWriteFailed(_) => ErrorKind::StoreWriteFailed,
            KeeperError::StageWriteFailed(_) => ErrorKind::StageWriteFailed,
            KeeperError::UpstreamUnavailable(_) => {
                ErrorKind::UpstreamUnavailable
            }
            KeeperError::Io(_) => ErrorKind::Io,
        }
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, KeeperError::DuplicateIdentity(_))
    }

    /// Infrastructure failures the client may retry on its own.
    pub fn is_infrastructure(&self) -> bool {
        !matches!(
            self,
            KeeperError::InvalidArgument(_) | KeeperError::DuplicateIdentity(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, KeeperError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_is_not_infrastructure() {
        let err = KeeperError::DuplicateIdentity("luke".into());
        assert!(err.is_duplicate());
        assert!(!err.is_infrastructure());
        assert_eq!(err.kind(), ErrorKind::DuplicateIdentity);
    }

    #[test]
    fn io_errors_classify_as_infrastructure() {
        let err: KeeperError =
            std::io::Error::new(std::io::ErrorKind::Other, "disk").into();
        assert!(err.is_infrastructure());
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
