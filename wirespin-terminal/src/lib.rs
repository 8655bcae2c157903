/// Terminal front end: render loop over the wirespin pipeline
use crossterm::terminal;
use std::io::{self, stdout, Stdout, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, trace};
use wirespin_core::{Canvas, Model, Pipeline, RenderConfig};

pub mod renderer;

pub use renderer::TerminalRenderer;

/// Errors from the terminal front end
#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to get terminal size: {0}")]
    TerminalSize(#[source] io::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Core(#[from] wirespin_core::Error),
}

/// Flag checked at the top of every frame to stop the loop
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Query the terminal's `(columns, rows)`
pub fn terminal_size() -> Result<(usize, usize), AppError> {
    let (cols, rows) = terminal::size().map_err(AppError::TerminalSize)?;
    debug!(cols, rows, "terminal size");
    Ok((cols as usize, rows as usize))
}

/// Main application struct for the terminal animation
pub struct TerminalApp<W: Write> {
    pipeline: Pipeline,
    canvas: Canvas,
    renderer: TerminalRenderer,
    out: W,
    frame_delay: Duration,
    max_frames: Option<u64>,
    cancel: CancelToken,
    frame_count: u64,
}

impl TerminalApp<Stdout> {
    /// Size the canvas from the current terminal and render to stdout
    pub fn new(model: Model, config: &RenderConfig) -> Result<Self, AppError> {
        let (cols, rows) = terminal_size()?;
        Self::with_writer(model, config, cols, rows, stdout())
    }
}

impl<W: Write> TerminalApp<W> {
    pub fn with_writer(
        model: Model,
        config: &RenderConfig,
        cols: usize,
        rows: usize,
        out: W,
    ) -> Result<Self, AppError> {
        Ok(Self {
            pipeline: Pipeline::new(model, config),
            canvas: Canvas::new(rows, cols)?,
            renderer: TerminalRenderer::new(config.glyphs),
            out,
            frame_delay: config.frame_delay,
            max_frames: None,
            cancel: CancelToken::new(),
            frame_count: 0,
        })
    }

    /// Stop after `frames` frames instead of running until cancelled
    pub fn with_frame_limit(mut self, frames: Option<u64>) -> Self {
        self.max_frames = frames;
        self
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn into_writer(self) -> W {
        self.out
    }

    /// Run frames until cancelled or the frame limit is reached
    ///
    /// Returns the number of frames rendered.
    pub fn run(&mut self) -> Result<u64, AppError> {
        info!(
            cols = self.canvas.width(),
            rows = self.canvas.height(),
            triangles = self.pipeline.model().triangle_count(),
            "starting render loop"
        );

        loop {
            if self.cancel.is_cancelled() {
                info!(frames = self.frame_count, "render loop cancelled");
                break;
            }
            if self.max_frames.is_some_and(|limit| self.frame_count >= limit) {
                info!(frames = self.frame_count, "frame limit reached");
                break;
            }

            self.frame()?;
            std::thread::sleep(self.frame_delay);
        }

        Ok(self.frame_count)
    }

    /// Rotate, clear, rasterize and display one frame
    fn frame(&mut self) -> Result<(), AppError> {
        let frame_start = Instant::now();

        self.pipeline.advance();
        self.renderer.clear_screen(&mut self.out)?;
        let stats = self.pipeline.render(&mut self.canvas);
        self.renderer.present(&mut self.out, &self.canvas)?;

        self.frame_count += 1;
        trace!(
            frame = self.frame_count,
            drawn = stats.drawn,
            skipped = stats.skipped,
            elapsed_us = frame_start.elapsed().as_micros() as u64,
            "frame"
        );
        Ok(())
    }
}
