use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("usage error: {0}")]
    Usage(String),

    #[error(transparent)]
    Feed(#[from] refx_core::FeedError),

    #[error(transparent)]
    Render(#[from] refx_core::RenderError),

    #[error(transparent)]
    Store(#[from] refx_store::StoreError),

    #[error(transparent)]
    Report(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(_) => 2,
            Self::Feed(_) => 3,
            Self::Render(_) | Self::Store(_) | Self::Report(_) | Self::Io(_) => 10,
        }
    }
}
