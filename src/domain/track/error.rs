#[derive(Debug, thiserror::Error)]
pub enum TrackBuildError {
    /// Rejected before any synthesis work starts
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Only raised when the request opts into `fail_on_empty`
    #[error("no rows to speak")]
    EmptyInput,

    /// Final encode failed or the encoder could not be initialized
    #[error("export failed: {0}")]
    Export(String),
}
