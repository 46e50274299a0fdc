// src/main.rs - cursor-demo: exercises move/click/drag over a null sink
use clap::Parser;

use krusty_cursor::{Cursor, CursorConfig, DurationSpec, NullSink, Point, Target};

#[derive(Parser, Debug)]
#[command(name = "cursor-demo", version, about = "Human-like cursor trajectory demo")]
struct Args {
    /// Path to a TOML config file. Falls back to built-in defaults if absent.
    #[arg(short, long)]
    config: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    tracing::info!("Starting cursor trajectory demo");

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path);
            CursorConfig::load(path).map_err(|e| {
                tracing::error!("Failed to load config from '{}': {}", path, e);
                e
            })?
        }
        None => {
            tracing::warn!("No config path given, using built-in defaults");
            CursorConfig::default()
        }
    };

    let sink = NullSink::new(Point::new(0.0, 0.0), (1920.0, 1080.0));
    let mut cursor = Cursor::new(sink, config)?;

    tracing::info!("Testing different motion modes...");

    cursor.move_to(Target::Absolute(Point::new(640.0, 480.0)), DurationSpec::Auto, 12.0)?;
    let position = cursor.sink().position()?;
    tracing::info!(x = position.x, y = position.y, "moved to first point");

    cursor.click(Target::Absolute(Point::new(900.0, 500.0)), 1, 0.05, None)?;
    tracing::info!("clicked");

    cursor.drag_and_drop(
        Target::Absolute(Point::new(300.0, 300.0)),
        Target::Absolute(Point::new(1200.0, 700.0)),
        DurationSpec::Auto,
        false,
    )?;
    tracing::info!("drag-and-drop complete");

    cursor.idle_jitter(0.5, 1.0, || false)?;

    tracing::info!("Motion mode testing complete");
    Ok(())
}
