use std::path::PathBuf;

/// Errors surfaced to the host application.
#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    /// Neither the requested nor the default save directory exists.
    #[error("{} is not a directory", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// plotters failed to draw or encode the figure.
    #[error("failed to render figure: {0}")]
    Render(String),

    #[error("invalid chart configuration: {0}")]
    Config(#[from] serde_json::Error),
}
