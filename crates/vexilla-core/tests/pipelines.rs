//! End-to-end runs of both pipelines against temporary flag directories.

use image::{Rgb, RgbImage, Rgba, RgbaImage};
use std::fs;
use std::path::Path;
use vexilla_core::{Config, PipelineError, Vexilla};

fn config_for(root: &Path) -> Config {
    let mut config = Config::default();
    config.general.source_dir = root.join("state_flags_png");
    config.general.output_dir = root.join("outputs");
    config
}

fn solid(dir: &Path, name: &str, width: u32, height: u32, color: [u8; 3]) {
    RgbImage::from_pixel(width, height, Rgb(color))
        .save_with_format(dir.join(name), image::ImageFormat::Png)
        .unwrap();
}

/// A source directory with PNGs in mixed case, plus files discovery must skip.
fn populate(config: &Config) {
    let src = config.source_dir();
    fs::create_dir_all(&src).unwrap();
    solid(&src, "texas.png", 10, 10, [255, 0, 0]);
    solid(&src, "Alabama.PNG", 20, 10, [0, 0, 255]);
    solid(&src, "colorado.png", 12, 8, [0, 255, 0]);
    fs::write(src.join("README.txt"), "not a flag").unwrap();
    fs::create_dir(src.join("archive")).unwrap();
    solid(&src.join("archive"), "old.png", 4, 4, [1, 2, 3]);
}

#[test]
fn average_colors_writes_ordered_reports() {
    let root = tempfile::tempdir().unwrap();
    let config = config_for(root.path());
    populate(&config);

    let report = Vexilla::new(config.clone()).average_colors().unwrap();

    let files: Vec<&str> = report.records.iter().map(|r| r.file.as_str()).collect();
    assert_eq!(files, vec!["Alabama.PNG", "colorado.png", "texas.png"]);
    assert!(report.failures.is_empty());

    let csv = fs::read_to_string(config.csv_path()).unwrap();
    assert_eq!(
        csv,
        "file,r,g,b\n\
         Alabama.PNG,0.0,0.0,1.0\n\
         colorado.png,0.0,1.0,0.0\n\
         texas.png,1.0,0.0,0.0\n"
    );

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(config.json_path()).unwrap()).unwrap();
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[2]["file"], "texas.png");
    assert_eq!(rows[2]["r"], 1.0);
    assert_eq!(rows[2]["g"], 0.0);
}

#[test]
fn average_colors_is_idempotent() {
    let root = tempfile::tempdir().unwrap();
    let config = config_for(root.path());
    populate(&config);

    let vexilla = Vexilla::new(config.clone());
    vexilla.average_colors().unwrap();
    let json_first = fs::read(config.json_path()).unwrap();
    let csv_first = fs::read(config.csv_path()).unwrap();

    vexilla.average_colors().unwrap();
    assert_eq!(fs::read(config.json_path()).unwrap(), json_first);
    assert_eq!(fs::read(config.csv_path()).unwrap(), csv_first);
}

#[test]
fn empty_source_writes_nothing() {
    let root = tempfile::tempdir().unwrap();
    let config = config_for(root.path());
    fs::create_dir_all(config.source_dir()).unwrap();
    fs::write(config.source_dir().join("notes.md"), "").unwrap();

    let vexilla = Vexilla::new(config.clone());
    for err in [
        vexilla.average_colors().unwrap_err(),
        vexilla.thumbnails().unwrap_err(),
    ] {
        assert!(matches!(
            err.pipeline(),
            Some(PipelineError::EmptyInputSet { .. })
        ));
    }
    assert!(!config.output_dir().exists());
}

#[test]
fn thumbnails_are_square_and_named_after_sources() {
    let root = tempfile::tempdir().unwrap();
    let config = config_for(root.path());
    populate(&config);
    solid(&config.source_dir(), "wide.png", 1024, 512, [10, 20, 30]);

    let report = Vexilla::new(config.clone()).thumbnails().unwrap();
    assert_eq!(
        report.created,
        vec!["Alabama.PNG", "colorado.png", "texas.png", "wide.png"]
    );
    assert_eq!(report.output_dir, config.thumbnail_dir());

    for name in &report.created {
        let thumb = image::open(config.thumbnail_dir().join(name)).unwrap();
        assert_eq!((thumb.width(), thumb.height()), (128, 128));
    }

    let wide = image::open(config.thumbnail_dir().join("wide.png"))
        .unwrap()
        .to_rgba8();
    assert_eq!(*wide.get_pixel(64, 10), Rgba([255, 255, 255, 255]));
    assert_eq!(*wide.get_pixel(64, 64), Rgba([10, 20, 30, 255]));
    assert_eq!(*wide.get_pixel(64, 117), Rgba([255, 255, 255, 255]));
}

#[test]
fn thumbnail_upscale_fills_width() {
    let root = tempfile::tempdir().unwrap();
    let mut config = config_for(root.path());
    config.thumbnail.upscale = true;
    fs::create_dir_all(config.source_dir()).unwrap();
    solid(&config.source_dir(), "small.png", 64, 32, [0, 0, 0]);

    Vexilla::new(config.clone()).thumbnails().unwrap();
    let thumb = image::open(config.thumbnail_dir().join("small.png"))
        .unwrap()
        .to_rgba8();

    let white = Rgba([255, 255, 255, 255]);
    assert_eq!(*thumb.get_pixel(0, 31), white);
    assert_ne!(*thumb.get_pixel(0, 32), white);
    assert_ne!(*thumb.get_pixel(127, 95), white);
    assert_eq!(*thumb.get_pixel(127, 96), white);
}

#[test]
fn thumbnails_keep_transparent_areas_white() {
    let root = tempfile::tempdir().unwrap();
    let config = config_for(root.path());
    fs::create_dir_all(config.source_dir()).unwrap();
    RgbaImage::from_pixel(128, 128, Rgba([200, 0, 0, 0]))
        .save(config.source_dir().join("clear.png"))
        .unwrap();

    Vexilla::new(config.clone()).thumbnails().unwrap();
    let thumb = image::open(config.thumbnail_dir().join("clear.png"))
        .unwrap()
        .to_rgba8();
    assert!(thumb.pixels().all(|p| *p == Rgba([255, 255, 255, 255])));
}

#[test]
fn thumbnail_failure_keeps_earlier_outputs() {
    let root = tempfile::tempdir().unwrap();
    let config = config_for(root.path());
    fs::create_dir_all(config.source_dir()).unwrap();
    solid(&config.source_dir(), "a.png", 8, 8, [1, 1, 1]);
    fs::write(config.source_dir().join("b.png"), b"corrupt").unwrap();
    solid(&config.source_dir(), "c.png", 8, 8, [1, 1, 1]);

    let err = Vexilla::new(config.clone()).thumbnails().unwrap_err();
    assert!(matches!(err.pipeline(), Some(PipelineError::Decode { .. })));
    assert!(config.thumbnail_dir().join("a.png").exists());
    assert!(!config.thumbnail_dir().join("c.png").exists());
}

#[test]
fn average_colors_reports_unwritable_output() {
    let root = tempfile::tempdir().unwrap();
    let config = config_for(root.path());
    populate(&config);
    fs::write(config.output_dir(), "occupied").unwrap();

    let err = Vexilla::new(config.clone()).average_colors().unwrap_err();
    match err.pipeline() {
        Some(PipelineError::Write { path, .. }) => assert_eq!(*path, config.output_dir()),
        other => panic!("expected a write error, got {other:?}"),
    }
    assert!(!config.csv_path().exists());
    assert_eq!(fs::read_to_string(config.output_dir()).unwrap(), "occupied");
}

#[test]
fn clusters_group_report_colors() {
    let root = tempfile::tempdir().unwrap();
    let mut config = config_for(root.path());
    config.clusters.k = 2;
    config.clusters.seed = 7;
    let src = config.source_dir();
    fs::create_dir_all(&src).unwrap();
    solid(&src, "maine.png", 8, 8, [0, 0, 200]);
    solid(&src, "nevada.png", 8, 8, [0, 0, 230]);
    solid(&src, "ohio.png", 8, 8, [240, 10, 10]);

    let vexilla = Vexilla::new(config.clone());
    vexilla.average_colors().unwrap();
    let report = vexilla.clusters().unwrap();

    assert_eq!(report.path, config.clusters_path());
    assert_eq!(report.k, 2);
    let mut groups: Vec<Vec<&str>> = report
        .clusters
        .iter()
        .map(|c| c.members.iter().map(|m| m.file.as_str()).collect())
        .collect();
    groups.sort();
    assert_eq!(groups, vec![vec!["maine.png", "nevada.png"], vec!["ohio.png"]]);

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(config.clusters_path()).unwrap()).unwrap();
    assert_eq!(json["k"], 2);
    assert_eq!(json["seed"], 7);
    assert_eq!(json["clusters"].as_array().unwrap().len(), 2);

    // Same records and seed give a byte-identical report.
    let first = fs::read(config.clusters_path()).unwrap();
    vexilla.clusters().unwrap();
    assert_eq!(fs::read(config.clusters_path()).unwrap(), first);
}

#[test]
fn clusters_need_a_color_report() {
    let root = tempfile::tempdir().unwrap();
    let config = config_for(root.path());

    let err = Vexilla::new(config.clone()).clusters().unwrap_err();
    assert!(matches!(
        err.pipeline(),
        Some(PipelineError::ReportRead { .. })
    ));
    assert!(!config.clusters_path().exists());
}
