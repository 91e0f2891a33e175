use std::path::Path;

use egui_plotnav::save::{resolve_save_dir, resolve_save_path};
use egui_plotnav::{Axes, ChartConfig, ChartError, Figure, ImageFormat, save_figure};

fn figure() -> Figure {
    let mut figure = Figure::new(200, 100).with_title("Transfer function");
    figure.add_axes(Axes::new([0.1, 0.1, 0.8, 0.8]).line("h", vec![(0.0, 0.0), (1.0, 1.0)], [0, 0, 0]));
    figure
}

#[test]
fn missing_directory_fails_without_writing() {
    let temp_dir = tempfile::tempdir().unwrap();
    let missing = temp_dir.path().join("missing");
    let config = ChartConfig {
        default_dir: temp_dir.path().join("also-missing"),
        ..ChartConfig::default()
    };

    let err = save_figure(&figure(), Some(missing.as_path()), None, None, &config).unwrap_err();
    assert!(matches!(err, ChartError::DirectoryNotFound(ref dir) if dir == &config.default_dir));
    assert!(err.to_string().contains("is not a directory"));
    assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}

#[test]
fn blank_figure_is_written() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config = ChartConfig {
        default_dir: temp_dir.path().to_path_buf(),
        ..ChartConfig::default()
    };
    // No axes and no title keeps rendering independent of system fonts.
    let blank = Figure::new(64, 48);

    let path = save_figure(&blank, None, Some("blank"), None, &config).unwrap();
    assert_eq!(path, temp_dir.path().join("blank.png"));
    assert!(std::fs::metadata(&path).unwrap().len() > 0);

    let path = save_figure(&blank, Some(temp_dir.path()), Some("blank.svg"), None, &config).unwrap();
    let svg = std::fs::read_to_string(&path).unwrap();
    assert!(svg.contains("<svg"));
}

#[test]
fn requested_directory_wins_then_default() {
    let requested = tempfile::tempdir().unwrap();
    let default = tempfile::tempdir().unwrap();

    let dir = resolve_save_dir(Some(requested.path()), default.path()).unwrap();
    assert_eq!(dir, requested.path());

    let dir = resolve_save_dir(Some(requested.path().join("nope").as_path()), default.path()).unwrap();
    assert_eq!(dir, default.path());

    let dir = resolve_save_dir(None, default.path()).unwrap();
    assert_eq!(dir, default.path());
}

#[test]
fn path_uses_figure_default_name() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config = ChartConfig::default();

    let (path, format) = resolve_save_path(temp_dir.path(), None, None, &figure(), &config).unwrap();
    assert_eq!(path, temp_dir.path().join("Transfer_function.png"));
    assert_eq!(format, ImageFormat::Png);

    let (path, format) =
        resolve_save_path(temp_dir.path(), Some("bode"), Some(ImageFormat::Svg), &figure(), &config).unwrap();
    assert_eq!(path, temp_dir.path().join("bode.svg"));
    assert_eq!(format, ImageFormat::Svg);
    assert!(!Path::new(&path).exists());
}
