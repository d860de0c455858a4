use std::fmt;

/// Hit fields that must be present and non-blank before a hit is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequiredField {
    Version,
    TrackingId,
    ClientId,
    HitType,
}

impl RequiredField {
    /// Protocol parameter name for this field.
    pub fn param(self) -> &'static str {
        match self {
            RequiredField::Version => "v",
            RequiredField::TrackingId => "tid",
            RequiredField::ClientId => "cid",
            RequiredField::HitType => "t",
        }
    }

    fn name(self) -> &'static str {
        match self {
            RequiredField::Version => "version",
            RequiredField::TrackingId => "tracking ID",
            RequiredField::ClientId => "client ID",
            RequiredField::HitType => "hit type",
        }
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.param())
    }
}

/// Errors returned to callers of the client.
///
/// All of them are raised before any network activity. Transport failures
/// are never reported here; see [`TransportError`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{field} is required")]
    MissingRequiredField { field: RequiredField },

    #[error("batch must contain at least one hit")]
    EmptyBatch,

    #[error("invalid collector endpoint: {0}")]
    InvalidEndpoint(String),
}

/// Failure of a single POST to the collector.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("collector returned {0}")]
    Status(u16),

    #[error("transport error: {0}")]
    Transport(String),
}

pub type Result<T> = std::result::Result<T, Error>;
