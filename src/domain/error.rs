use serde::Serialize;

/// Failure of a single call to the deck service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeckError {
    /// The request never produced a usable reply: connect error, timeout,
    /// or a non-success HTTP status.
    Network(String),
    /// A reply arrived but did not carry what the operation needs.
    Protocol(String),
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum ErrorKind {
    NetworkFailure,
    ProtocolFailure,
}

impl DeckError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DeckError::Network(_) => ErrorKind::NetworkFailure,
            DeckError::Protocol(_) => ErrorKind::ProtocolFailure,
        }
    }

    pub fn missing(field: &str) -> Self {
        DeckError::Protocol(format!("response is missing `{field}`"))
    }
}

impl std::fmt::Display for DeckError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeckError::Network(msg) => write!(f, "network failure: {msg}"),
            DeckError::Protocol(msg) => write!(f, "protocol failure: {msg}"),
        }
    }
}

impl std::error::Error for DeckError {}
