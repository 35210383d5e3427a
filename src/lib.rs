// ============================================================================
// CRATE CONFIGURATION & IMPORTS
// ============================================================================

pub mod config;
pub mod error;
pub mod geometry;
pub mod render;
pub mod surface;
pub mod time;

pub use config::{
    ClockConfig, ClockOptions, Color, ConfigFile, Hand, HandConfig, Style, WindowConfig,
};
pub use error::{ClockError, Result};
pub use geometry::{ClockTime, Point, RenderState};
pub use render::render_frame;
pub use surface::{Canvas, DrawCommand, Scene, Surface};
pub use time::{FixedTime, LocalTime, TimeSource};

// External crate imports
use log::{debug, error, info, warn};
use pixels::{Pixels, SurfaceTexture};

// Standard library imports
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

// Window management imports
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

// ============================================================================
// FRAME PACING & CANCELLATION
// ============================================================================

/// Stops a running clock from any thread. The event loop notices on its
/// next wake-up and closes the window.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Caps how often redraws are requested.
#[derive(Debug, Clone)]
pub struct FramePacer {
    interval: Duration,
    last_frame: Option<Instant>,
}

impl FramePacer {
    /// A non-positive or non-finite rate means "draw on every wake-up".
    /// Rates too small for a `Duration` interval clamp to `Duration::MAX`.
    pub fn new(max_framerate: f64) -> Self {
        let interval = if max_framerate.is_finite() && max_framerate > 0.0 {
            Duration::try_from_secs_f64(1.0 / max_framerate).unwrap_or(Duration::MAX)
        } else {
            Duration::ZERO
        };
        Self {
            interval,
            last_frame: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns true, and starts a new interval, once the previous frame is
    /// at least one interval old.
    pub fn frame_due(&mut self, now: Instant) -> bool {
        let due = match self.last_frame {
            Some(last) => now.saturating_duration_since(last) >= self.interval,
            None => true,
        };
        if due {
            self.last_frame = Some(now);
        }
        due
    }
}

// ============================================================================
// PUBLIC API - MAIN INTERFACE
// ============================================================================

/// An analog clock: a fixed configuration plus the time source it reads
/// on every frame.
#[derive(Debug, Clone)]
pub struct Clock<T = LocalTime> {
    config: ClockConfig,
    window: WindowConfig,
    time_source: T,
    stop: StopHandle,
}

impl Clock<LocalTime> {
    /// Builds a clock from partial options merged over the defaults.
    pub fn new(options: Option<ClockOptions>) -> Self {
        Self::with_config(ClockConfig::resolve(options.as_ref()))
    }

    pub fn with_config(config: ClockConfig) -> Self {
        Self {
            config,
            window: WindowConfig::default(),
            time_source: LocalTime,
            stop: StopHandle::default(),
        }
    }
}

impl<T: TimeSource> Clock<T> {
    pub fn with_time_source<U: TimeSource>(self, time_source: U) -> Clock<U> {
        Clock {
            config: self.config,
            window: self.window,
            time_source,
            stop: self.stop,
        }
    }

    pub fn with_window(mut self, window: WindowConfig) -> Self {
        self.window = window;
        self
    }

    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    pub fn window(&self) -> &WindowConfig {
        &self.window
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Draws one frame at the time source's current time.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S, state: &RenderState) {
        render_frame(surface, &self.config, state, self.time_source.now());
    }

    /// Opens the clock window and redraws it until the window is closed or
    /// the stop handle fires.
    pub fn show(&self) -> Result<()> {
        let event_loop = EventLoop::new()?;
        let window = WindowBuilder::new()
            .with_title(&self.window.title)
            .with_inner_size(LogicalSize::new(
                self.window.width as f64,
                self.window.height as f64,
            ))
            .with_resizable(self.window.resizable)
            .build(&event_loop)?;

        let window = Arc::new(window);

        let size = window.inner_size();
        let mut state = RenderState::new(size.width, size.height, self.config.radius_percent);
        let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
        let mut pixels = Pixels::new(size.width, size.height, surface_texture)?;

        let mut scene = Scene::new(size.width, size.height);
        let mut pacer = FramePacer::new(self.window.max_framerate);
        let mut failure: Option<ClockError> = None;

        info!(
            "showing {} clock at {}x{} ({}% radius, up to {} fps)",
            self.config.style.as_str(),
            size.width,
            size.height,
            self.config.radius_percent,
            self.window.max_framerate
        );

        event_loop.run(|event, window_target| {
            window_target.set_control_flow(ControlFlow::Poll);
            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => {
                        info!("clock window closed");
                        window_target.exit();
                    }
                    WindowEvent::Resized(new_size) => {
                        self.resize(&mut state, &mut pixels, new_size.width, new_size.height);
                    }
                    WindowEvent::RedrawRequested => {
                        if !state.has_area() {
                            return;
                        }
                        scene.reset(state.width(), state.height());
                        self.render(&mut scene, &state);

                        let frame = pixels.frame_mut();
                        let mut canvas =
                            Canvas::new(frame, state.width() as usize, state.height() as usize);
                        scene.replay(&mut canvas);

                        if let Err(err) = pixels.render() {
                            error!("failed to present frame: {err}");
                            failure = Some(err.into());
                            window_target.exit();
                        }
                    }
                    _ => {}
                },
                Event::AboutToWait => {
                    if self.stop.is_stopped() {
                        info!("clock stopped");
                        window_target.exit();
                    } else if pacer.frame_due(Instant::now()) {
                        window.request_redraw();
                    }
                }
                _ => {}
            }
        })?;

        match failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn resize(&self, state: &mut RenderState, pixels: &mut Pixels<'_>, width: u32, height: u32) {
        let resized = resize_viewport(state, width, height, self.config.radius_percent, |w, h| {
            pixels.resize_buffer(w, h)
        });
        if !resized {
            return;
        }
        if let Err(err) = pixels.resize_surface(width, height) {
            warn!("failed to resize surface to {width}x{height}: {err}");
        }
    }
}

/// Moves `state` to the new viewport and resizes the frame buffer to match.
///
/// A minimized window reports 0x0: the state follows but the old buffer is
/// kept. If the buffer cannot be resized the previous state is restored so
/// the canvas row stride keeps matching the buffer. Returns true when the
/// buffer now has the new size.
fn resize_viewport<E: std::fmt::Display>(
    state: &mut RenderState,
    width: u32,
    height: u32,
    radius_percent: f64,
    resize_buffer: impl FnOnce(u32, u32) -> std::result::Result<(), E>,
) -> bool {
    let previous = *state;
    state.resize(width, height, radius_percent);
    debug!(
        "viewport {width}x{height}, clock radius {:.1}px",
        state.clock_radius()
    );

    if !state.has_area() {
        return false;
    }
    match resize_buffer(width, height) {
        Ok(()) => true,
        Err(err) => {
            warn!("failed to resize frame buffer to {width}x{height}: {err}");
            *state = previous;
            false
        }
    }
}
