//! Full capture runs against a recording fake surface.

use chrono::TimeZone;
use mapgrab::script::SCRIPT_NAME;
use mapgrab::{
    run, Axis, Config, Error, GridConfig, PanExecutor, TileCapturer, ZoomDirection, ZoomExecutor,
};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Zoom(u32, ZoomDirection),
    Drag(Axis, i32),
    Park,
    Capture(String),
}

#[derive(Default)]
struct FakeSurface {
    calls: Vec<Call>,
    fail_on_capture: Option<usize>,
    captures: usize,
}

impl PanExecutor for FakeSurface {
    fn drag(&mut self, axis: Axis, distance: i32) -> mapgrab::Result<()> {
        self.calls.push(Call::Drag(axis, distance));
        Ok(())
    }
}

impl ZoomExecutor for FakeSurface {
    fn zoom(&mut self, steps: u32, direction: ZoomDirection) -> mapgrab::Result<()> {
        self.calls.push(Call::Zoom(steps, direction));
        Ok(())
    }
}

impl TileCapturer for FakeSurface {
    fn park_pointer(&mut self) -> mapgrab::Result<()> {
        self.calls.push(Call::Park);
        Ok(())
    }

    fn capture_tile(&mut self, path: &Path) -> mapgrab::Result<()> {
        self.captures += 1;
        if self.fail_on_capture == Some(self.captures) {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "screen grab failed",
            )));
        }
        fs::write(path, b"png")?;
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        self.calls.push(Call::Capture(name));
        Ok(())
    }
}

fn config_in(dir: &Path, grid: GridConfig) -> Config {
    let mut config = Config::default();
    config.grid = grid;
    config.output.dir = dir.to_path_buf();
    config.timing.capture_settle_ms = 0;
    config.zoom.baseline_out_steps = 15;
    config
}

fn started_at() -> chrono::DateTime<chrono::Utc> {
    chrono::Utc.with_ymd_and_hms(2026, 10, 19, 14, 2, 33).unwrap()
}

#[test]
fn run_drives_surface_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let grid = GridConfig {
        rows: 2,
        columns: 2,
        tile_width: 600,
        tile_height: 400,
        x_shift: -580,
        y_shift: -390,
        zoom_steps: 4,
        origin_offset_x: -1500,
        origin_offset_y: 0,
    };
    let config = config_in(dir.path(), grid);
    let mut surface = FakeSurface::default();

    run(&mut surface, &config, started_at()).expect("run should succeed");

    assert_eq!(
        surface.calls,
        vec![
            Call::Zoom(15, ZoomDirection::Out),
            Call::Zoom(4, ZoomDirection::In),
            Call::Drag(Axis::X, -600),
            Call::Drag(Axis::X, -600),
            Call::Drag(Axis::X, -300),
            Call::Park,
            Call::Capture("scr-01.png".into()),
            Call::Drag(Axis::X, -580),
            Call::Park,
            Call::Capture("scr-02.png".into()),
            Call::Drag(Axis::Y, -390),
            Call::Park,
            Call::Capture("scr-03.png".into()),
            Call::Drag(Axis::X, 580),
            Call::Park,
            Call::Capture("scr-04.png".into()),
        ]
    );
}

#[test]
fn run_writes_executable_composite_script() {
    let dir = tempfile::tempdir().unwrap();
    let grid = GridConfig {
        rows: 2,
        columns: 2,
        tile_width: 600,
        tile_height: 400,
        x_shift: -580,
        y_shift: -390,
        ..GridConfig::default()
    };
    let config = config_in(dir.path(), grid);
    let mut surface = FakeSurface::default();

    let summary = run(&mut surface, &config, started_at()).unwrap();

    assert_eq!(summary.script_path, dir.path().join(SCRIPT_NAME));
    assert_eq!(summary.output_name, "map-20261019-140233.png");
    assert_eq!(
        (summary.canvas.total_width, summary.canvas.total_height),
        (1180, 790)
    );
    let placements: Vec<(i32, i32)> = summary
        .tiles
        .iter()
        .map(|t| (t.placement_x, t.placement_y))
        .collect();
    assert_eq!(placements, vec![(0, 0), (580, 0), (580, 390), (0, 390)]);

    let script = fs::read_to_string(&summary.script_path).unwrap();
    let lines: Vec<&str> = script.lines().collect();
    assert_eq!(lines[0], "#!/bin/sh");
    assert!(lines.contains(&"convert -size 1180x790 xc:none \\"));
    assert!(lines.contains(&"  scr-03.png -geometry +580+390 -composite \\"));
    assert!(lines.contains(&"  map-20261019-140233.png"));
    assert!(lines.contains(&"rm -f scr-*.png"));
    assert_eq!(lines.last(), Some(&"exit 0"));

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = fs::metadata(&summary.script_path).unwrap().permissions().mode();
        assert_eq!(mode & 0o111, 0o111, "script should be executable");
    }
}

#[test]
fn reruns_produce_identical_placements() {
    let grid = GridConfig {
        rows: 3,
        columns: 4,
        tile_width: 500,
        tile_height: 300,
        x_shift: -1200,
        y_shift: 280,
        ..GridConfig::default()
    };

    let placements = |dir: &Path| {
        let mut surface = FakeSurface::default();
        run(&mut surface, &config_in(dir, grid), started_at())
            .unwrap()
            .tiles
            .into_iter()
            .map(|t| (t.placement_x, t.placement_y))
            .collect::<Vec<_>>()
    };

    let a = tempfile::tempdir().unwrap();
    let b = tempfile::tempdir().unwrap();
    assert_eq!(placements(a.path()), placements(b.path()));
}

#[test]
fn failed_capture_aborts_and_leaves_partial_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let grid = GridConfig {
        rows: 1,
        columns: 4,
        tile_width: 300,
        tile_height: 200,
        x_shift: -290,
        ..GridConfig::default()
    };
    let config = config_in(dir.path(), grid);
    let mut surface = FakeSurface {
        fail_on_capture: Some(3),
        ..FakeSurface::default()
    };

    let err = run(&mut surface, &config, started_at()).unwrap_err();
    assert!(matches!(err, Error::Io(_)));

    // No pan is attempted after the failure
    assert_eq!(surface.calls.last(), Some(&Call::Park));
    assert!(dir.path().join("scr-02.png").exists());
    assert!(!dir.path().join("scr-03.png").exists());

    let script = fs::read_to_string(dir.path().join(SCRIPT_NAME)).unwrap();
    assert!(script.contains("scr-02.png -geometry +290+0"));
    assert!(!script.contains("exit 0"));
}
