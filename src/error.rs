/// Errors that can occur during a collection pass.
///
/// Every variant except [`CollectError::UnitParse`] is fatal for the
/// invocation: it propagates to the entry point, which prints it and exits
/// nonzero. `UnitParse` is returned by the memory-unit parser and handled at
/// the call site — the field defaults to 0.0 and a warning is logged, so a
/// single odd value never aborts a whole batch.
#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    /// The capability provider (system API or external command) is missing
    /// or could not be reached.
    #[error("provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Provider output could not be parsed at all.
    #[error("unparseable provider output: {0}")]
    Parse(String),

    /// A memory value carried an unrecognized unit suffix.
    #[error("unrecognized memory unit in '{0}'")]
    UnitParse(String),

    /// The batch counter file could not be read, parsed, or updated.
    #[error("batch counter: {0}")]
    Counter(String),

    /// A data directory or partition file could not be created or written.
    #[error("storage: {0}")]
    Storage(#[from] std::io::Error),
}

/// Convenience `Result` alias for collection operations.
pub type Result<T> = std::result::Result<T, CollectError>;
