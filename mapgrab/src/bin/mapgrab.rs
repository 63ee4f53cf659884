use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use mapgrab::{preview, Axis, Config, DesktopSurface, Panner, Step};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mapgrab")]
#[command(about = "Capture a map larger than the screen as tiles and stitch them")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    grid: GridArgs,

    /// Config file (default: ~/.config/mapgrab/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Pan across the map, capture every tile and write the composite script
    Capture,
    /// Print the traversal and tile placements without touching the screen
    Plan,
    /// Print the effective grid settings
    Settings,
}

/// Overrides for the grid section of the config file
#[derive(Args)]
struct GridArgs {
    /// Number of tile rows
    #[arg(short, long, global = true)]
    rows: Option<u32>,

    /// Number of tile columns
    #[arg(short, long, global = true)]
    columns: Option<u32>,

    /// Initial pan along x before the first tile
    #[arg(short = 'x', long, global = true, allow_negative_numbers = true)]
    x_offset: Option<i32>,

    /// Initial pan along y before the first tile
    #[arg(short = 'y', long, global = true, allow_negative_numbers = true)]
    y_offset: Option<i32>,

    /// Pan distance between columns
    #[arg(long, global = true, allow_negative_numbers = true)]
    x_shift: Option<i32>,

    /// Pan distance between rows
    #[arg(long, global = true, allow_negative_numbers = true)]
    y_shift: Option<i32>,

    /// Zoom-in steps from minimum zoom
    #[arg(short, long, global = true)]
    zoom: Option<u32>,

    /// Title of the window showing the map
    #[arg(short, long, global = true)]
    window: Option<String>,

    /// Directory for tiles and the composite script
    #[arg(short, long, global = true)]
    output_dir: Option<PathBuf>,
}

impl GridArgs {
    fn apply(self, config: &mut Config) {
        let grid = &mut config.grid;
        if let Some(v) = self.rows {
            grid.rows = v;
        }
        if let Some(v) = self.columns {
            grid.columns = v;
        }
        if let Some(v) = self.x_offset {
            grid.origin_offset_x = v;
        }
        if let Some(v) = self.y_offset {
            grid.origin_offset_y = v;
        }
        if let Some(v) = self.x_shift {
            grid.x_shift = v;
        }
        if let Some(v) = self.y_shift {
            grid.y_shift = v;
        }
        if let Some(v) = self.zoom {
            grid.zoom_steps = v;
        }
        if let Some(v) = self.window {
            config.window.title = v;
        }
        if let Some(v) = self.output_dir {
            config.output.dir = v;
        }
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "mapgrab={},mapgrab_input={},mapgrab_capture={}",
            level, level, level
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::load(),
    };
    cli.grid.apply(&mut config);
    config.validate()?;

    match cli.command.unwrap_or(Commands::Capture) {
        Commands::Capture => run_capture(&config),
        Commands::Plan => {
            print_plan(&config);
            Ok(())
        }
        Commands::Settings => {
            println!("{}", config.grid.report());
            Ok(())
        }
    }
}

fn run_capture(config: &Config) -> anyhow::Result<()> {
    let started_at = chrono::Utc::now();
    let mut surface = DesktopSurface::connect(config).context("preparing the map window")?;
    info!(region = ?surface.capture_region(), "capturing");

    let summary = mapgrab::run(&mut surface, config, started_at).context("capture run aborted")?;

    println!(
        "Captured {} tiles. Run {} to build {} ({}x{}).",
        summary.tiles.len(),
        summary.script_path.display(),
        summary.output_name,
        summary.canvas.total_width,
        summary.canvas.total_height
    );
    Ok(())
}

fn print_plan(config: &Config) {
    let grid = &config.grid;
    let panner = Panner::for_grid(grid);
    println!(
        "origin: x {:?} y {:?}",
        panner.gestures(Axis::X, grid.origin_offset_x),
        panner.gestures(Axis::Y, grid.origin_offset_y)
    );

    for planned in preview(grid) {
        match (planned.step, planned.tile) {
            (Step::Capture { row, column }, Some(tile)) => println!(
                "capture r{} c{} -> {} at {:+}{:+}",
                row, column, tile.file_name, tile.placement_x, tile.placement_y
            ),
            (Step::Pan { axis, distance }, _) => {
                println!("pan {} {:+} {:?}", axis, distance, planned.gestures)
            }
            (Step::Capture { .. }, None) => {}
        }
    }

    let report = grid.report();
    println!("canvas: {}x{}", report.total_width, report.total_height);
}
