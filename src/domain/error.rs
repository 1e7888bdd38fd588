//! Domain error types.

/// Top-level error type for taevents.
#[derive(Debug, thiserror::Error)]
pub enum TaEventsError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("unknown strategy '{name}': no preset and no kind given")]
    UnknownStrategy { name: String },

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("output error: {reason}")]
    Output { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&TaEventsError> for std::process::ExitCode {
    fn from(err: &TaEventsError) -> Self {
        let code: u8 = match err {
            TaEventsError::Io(_) | TaEventsError::Output { .. } => 1,
            TaEventsError::ConfigParse { .. }
            | TaEventsError::ConfigMissing { .. }
            | TaEventsError::ConfigInvalid { .. }
            | TaEventsError::UnknownStrategy { .. } => 2,
            TaEventsError::Data { .. } => 3,
        };
        std::process::ExitCode::from(code)
    }
}
