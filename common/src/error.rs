use thiserror::Error;

/// Every way a certification action can fail.
///
/// Validation variants are resolved before any wallet or ledger interaction.
/// Ledger variants are caught at the executor / dispatcher boundary and
/// surfaced as exactly one notification.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CertError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("invalid certification id or address format: {0:?}")]
    InvalidKeyFormat(String),
    #[error("invalid skill level: {0:?}")]
    InvalidLevel(String),
    #[error("invalid certification id: {0:?}")]
    InvalidCertificationId(String),
    #[error("wallet not connected")]
    NotConnected,
    #[error("no compatible wallet provider")]
    ProviderUnavailable,
    #[error("wallet provider error: {0}")]
    Provider(String),
    #[error("cost estimation failed: {0}")]
    EstimationFailure(String),
    #[error("submission rejected: {0}")]
    SubmissionRejected(String),
    #[error("no confirmation after {polls} polls")]
    ConfirmationTimeout { polls: u32 },
    #[error("certification not found: {0}")]
    ReadNotFound(String),
}

impl CertError {
    /// True for errors resolved locally without touching the network.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingField(_)
                | Self::InvalidKeyFormat(_)
                | Self::InvalidLevel(_)
                | Self::InvalidCertificationId(_)
        )
    }

    /// True for failures that happened while talking to the ledger.
    pub fn is_ledger(&self) -> bool {
        matches!(
            self,
            Self::EstimationFailure(_)
                | Self::SubmissionRejected(_)
                | Self::ConfirmationTimeout { .. }
                | Self::ReadNotFound(_)
        )
    }
}

pub type CertResult<T> = Result<T, CertError>;
