//! Saving a figure to disk.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::backend::{ImageFormat, render_to_file};
use crate::config::ChartConfig;
use crate::error::ChartError;
use crate::figure::Figure;

/// Pick the directory to save into.
///
/// The requested directory wins when it exists; otherwise the configured
/// default is used. Fails when neither is a directory.
pub fn resolve_save_dir(requested: Option<&Path>, default_dir: &Path) -> Result<PathBuf, ChartError> {
    if let Some(dir) = requested {
        if dir.is_dir() {
            return Ok(dir.to_path_buf());
        }
        debug!(dir = %dir.display(), "requested save directory missing, using default");
    }

    if default_dir.is_dir() {
        Ok(default_dir.to_path_buf())
    } else {
        Err(ChartError::DirectoryNotFound(default_dir.to_path_buf()))
    }
}

/// Build the output path and format inside an already resolved directory.
///
/// The name comes from `filename`, then `config.filename`, then the figure
/// default. The format comes from `format`, then the name's extension, then
/// `config.default_format`. An unknown extension is an error unless an
/// explicit format overrides it.
pub fn resolve_save_path(
    dir: &Path,
    filename: Option<&str>,
    format: Option<ImageFormat>,
    figure: &Figure,
    config: &ChartConfig,
) -> Result<(PathBuf, ImageFormat), ChartError> {
    let name = match filename.filter(|name| !name.is_empty()) {
        Some(name) => name.to_owned(),
        None if !config.filename.is_empty() => config.filename.clone(),
        None => figure.default_filename(),
    };
    let name = Path::new(&name);

    let extension = name.extension().and_then(|ext| ext.to_str());
    let format = match (format, extension) {
        (Some(format), _) => format,
        (None, Some(ext)) => {
            ImageFormat::from_extension(ext).ok_or_else(|| ChartError::UnsupportedFormat(ext.to_owned()))?
        }
        (None, None) => config.default_format,
    };

    let stem = name
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .unwrap_or("image");

    Ok((dir.join(format!("{stem}.{}", format.extension())), format))
}

/// Save `figure` and return the written path.
///
/// Nothing is written when the directory cannot be resolved.
pub fn save_figure(
    figure: &Figure,
    dir: Option<&Path>,
    filename: Option<&str>,
    format: Option<ImageFormat>,
    config: &ChartConfig,
) -> Result<PathBuf, ChartError> {
    let dir = resolve_save_dir(dir, &config.default_dir)?;
    let (path, format) = resolve_save_path(&dir, filename, format, figure, config)?;

    render_to_file(figure, &path, format, config.background)?;
    info!(path = %path.display(), ?format, "figure saved");

    Ok(path)
}
