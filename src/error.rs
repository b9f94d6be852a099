use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackError {
    #[error("I/O error while {context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON parse error while {context}: {source}")]
    Json {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("{context}: {message}")]
    Audio {
        context: &'static str,
        message: String,
    },
    #[error("interval {index} starts at {start_sec}s, before the previous start {previous_start_sec}s")]
    InputOrdering {
        index: usize,
        start_sec: f64,
        previous_start_sec: f64,
    },
    #[error("interval {index} has invalid bounds [{start_sec}, {end_sec})")]
    InvalidInterval {
        index: usize,
        start_sec: f64,
        end_sec: f64,
    },
    #[error("phonemizer returned no symbols for interval {index} ({text:?})")]
    EmptyPhonemeSequence { index: usize, text: String },
    #[error("invalid config: {message}")]
    InvalidConfig { message: String },
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
}

impl TrackError {
    pub(crate) fn io(context: &'static str, source: std::io::Error) -> Self {
        Self::Io { context, source }
    }

    pub(crate) fn json(context: &'static str, source: serde_json::Error) -> Self {
        Self::Json { context, source }
    }

    pub(crate) fn audio(context: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Audio {
            context,
            message: err.to_string(),
        }
    }

    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}
