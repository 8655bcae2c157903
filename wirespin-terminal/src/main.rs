//! wirespin - rotating wireframe models in the terminal
//!
//! Loads an STL file (or a built-in shape) and spins it forever, redrawing
//! the whole screen every frame. Stop it with Ctrl-C.

use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;
use wirespin_core::{stl, Canvas, Glyphs, Model, RenderConfig, RotationState};
use wirespin_terminal::{AppError, TerminalApp};

/// Render a rotating 3D wireframe in the terminal
#[derive(Parser)]
#[command(name = "wirespin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// STL file to render (binary or ASCII)
    #[arg(default_value = "model.stl")]
    model: PathBuf,

    /// Render a built-in model instead of an STL file
    #[arg(short, long, value_enum)]
    builtin: Option<BuiltinModel>,

    /// Projection field-of-view constant
    #[arg(long, default_value_t = 1200.0)]
    fov: f64,

    /// Distance from the camera to the model origin
    #[arg(long, default_value_t = 200.0)]
    camera_distance: f64,

    /// Minimum depth a vertex needs to be drawn
    #[arg(long, default_value_t = 1.0)]
    near_plane: f64,

    /// Rotation per frame on every axis, in radians
    #[arg(long, default_value_t = 0.1)]
    step: f64,

    /// Rotation per frame about X (overrides --step)
    #[arg(long)]
    step_x: Option<f64>,

    /// Rotation per frame about Y (overrides --step)
    #[arg(long)]
    step_y: Option<f64>,

    /// Rotation per frame about Z (overrides --step)
    #[arg(long)]
    step_z: Option<f64>,

    /// Delay between frames in milliseconds
    #[arg(short, long, default_value_t = 100)]
    delay_ms: u64,

    /// Uniform scale applied to the model
    #[arg(short, long, default_value_t = 1.0)]
    scale: f64,

    /// Stop after this many frames
    #[arg(short, long)]
    frames: Option<u64>,

    /// Canvas width in columns (defaults to the terminal width)
    #[arg(long, requires = "height", value_parser = clap::value_parser!(u16).range(1..))]
    width: Option<u16>,

    /// Canvas height in rows (defaults to the terminal height)
    #[arg(long, requires = "width", value_parser = clap::value_parser!(u16).range(1..))]
    height: Option<u16>,

    /// Glyph for lit cells
    #[arg(long, default_value_t = '█')]
    glyph: char,

    /// Enable verbose logging (to stderr)
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum BuiltinModel {
    /// Cube with side 3
    Cube,
    /// One triangle
    Triangle,
    /// Two triangles forming a square
    DoubleTriangle,
}

impl BuiltinModel {
    fn build(self) -> Model {
        match self {
            BuiltinModel::Cube => Model::cube(3.0),
            BuiltinModel::Triangle => Model::triangle(1.5),
            BuiltinModel::DoubleTriangle => Model::double_triangle(3.0),
        }
    }
}

impl Cli {
    fn config(&self) -> RenderConfig {
        RenderConfig {
            rotation_step: RotationState::new(
                self.step_x.unwrap_or(self.step),
                self.step_y.unwrap_or(self.step),
                self.step_z.unwrap_or(self.step),
            ),
            fov: self.fov,
            camera_distance: self.camera_distance,
            near_plane: self.near_plane,
            frame_delay: Duration::from_millis(self.delay_ms),
            scale: self.scale,
            glyphs: Glyphs::new(self.glyph, ' '),
        }
    }

    /// Reject `--width/--height` pairs the canvas cannot hold
    fn validate_size(&self) -> Result<(), clap::Error> {
        if let (Some(cols), Some(rows)) = (self.width, self.height) {
            if let Err(e) = Canvas::check_size(rows.into(), cols.into()) {
                return Err(Cli::command().error(ErrorKind::ValueValidation, e));
            }
        }
        Ok(())
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = cli.validate_size() {
        e.exit();
    }

    // Setup logging; stdout belongs to the animation
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("wirespin: {e}");
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("wirespin: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), AppError> {
    let config = cli.config();

    let model = match cli.builtin {
        Some(builtin) => builtin.build(),
        None => stl::load_stl(&cli.model)?,
    };
    let model = model.scaled(config.scale);

    let app = match (cli.width, cli.height) {
        (Some(cols), Some(rows)) => TerminalApp::with_writer(
            model,
            &config,
            cols.into(),
            rows.into(),
            std::io::stdout(),
        )?,
        _ => TerminalApp::new(model, &config)?,
    };
    let mut app = app.with_frame_limit(cli.frames);
    app.run()?;

    Ok(())
}
