/// Convenience result type used across vidpipe.
pub type VidpipeResult<T> = Result<T, VidpipeError>;

/// Top-level error taxonomy used by the pipeline APIs.
#[derive(thiserror::Error, Debug)]
pub enum VidpipeError {
    /// Invalid user-provided options, names or image dimensions.
    #[error("configuration error: {0}")]
    Config(String),

    /// Picture buffer or engine handle could not be created.
    #[error("allocation error: {0}")]
    Alloc(String),

    /// The compression engine rejected a call.
    #[error("engine error: {0}")]
    Engine(String),

    /// A drain call failed while the engine still held buffered frames.
    #[error("engine error: flush aborted with {pending} frame(s) still pending: {reason}")]
    PartialFlush {
        /// Engine pending-frame count when the drain call failed.
        pending: usize,
        /// Message of the failed drain call.
        reason: String,
    },

    /// The output sink accepted fewer bytes than a unit holds.
    #[error("io error: short write, size={expected}, n={written}")]
    ShortWrite {
        /// Unit payload length.
        expected: usize,
        /// Bytes the sink reported as written.
        written: usize,
    },

    /// The output sink failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Coarse classification of a [`VidpipeError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Recoverable by fixing inputs and retrying.
    Configuration,
    /// Fatal to the pipeline instance.
    Allocation,
    /// Fatal to the current operation; the pipeline should be closed.
    Engine,
    /// Output sink failure or short write.
    Io,
    /// Anything else.
    Other,
}

impl VidpipeError {
    /// Build a [`VidpipeError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`VidpipeError::Alloc`] value.
    pub fn alloc(msg: impl Into<String>) -> Self {
        Self::Alloc(msg.into())
    }

    /// Build a [`VidpipeError::Engine`] value.
    pub fn engine(msg: impl Into<String>) -> Self {
        Self::Engine(msg.into())
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(_) => ErrorKind::Configuration,
            Self::Alloc(_) => ErrorKind::Allocation,
            Self::Engine(_) | Self::PartialFlush { .. } => ErrorKind::Engine,
            Self::ShortWrite { .. } | Self::Io(_) => ErrorKind::Io,
            Self::Other(_) => ErrorKind::Other,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
