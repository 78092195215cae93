use thiserror::Error;

/// Failure taxonomy for one producer invocation.
///
/// Adapters report plain `String` errors; handlers wrap them into the variant
/// naming the concern that failed so the entry point can log a stable kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProducerError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("malformed event: {0}")]
    MalformedEvent(String),

    #[error("failed to enumerate stack instances of {stack_set}: {message}")]
    Enumeration { stack_set: String, message: String },

    #[error("failed to resolve caller identity: {0}")]
    Identity(String),

    #[error("failed to deliver {failed} of {attempted} work items")]
    Delivery { failed: usize, attempted: usize },

    #[error("failed to send work item for account {account} in {region}: {message}")]
    Send {
        account: String,
        region: String,
        message: String,
    },

    #[error("failed to acknowledge custom resource request: {0}")]
    Acknowledgment(String),

    #[error("failed to serialize {what}: {message}")]
    Serialization { what: &'static str, message: String },
}

impl ProducerError {
    /// Stable identifier used as the `error_kind` log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "configuration_error",
            Self::MalformedEvent(_) => "malformed_event",
            Self::Enumeration { .. } => "enumeration_error",
            Self::Identity(_) => "identity_error",
            Self::Delivery { .. } => "delivery_error",
            Self::Send { .. } => "send_error",
            Self::Acknowledgment(_) => "acknowledgment_error",
            Self::Serialization { .. } => "serialization_error",
        }
    }
}
