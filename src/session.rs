use std::time::Instant;

use image::RgbaImage;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::clock::{self, Evaluation, TimeWindow, TimerState};
use crate::color::ColorStop;
use crate::error::Result;
use crate::order::{FillMode, FillOrder};
use crate::raster::Compositor;
use crate::rate::{self, RateUnit};

/// Content address of a generated fill order. The order is reused as
/// long as none of these change; any change regenerates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OrderKey {
    width: u32,
    height: u32,
    colors: ColorStop,
    mode: FillMode,
}

/// Per-frame output handed to the host for display.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    pub state: TimerState,
    /// Fraction elapsed, in [0, 1].
    pub progress: f64,
    /// Units committed to the surface.
    pub filled: usize,
    /// `"42.17%"`
    pub percent: String,
    /// `"3h 4m 5s"`, `"Completed"` once done
    pub remaining: String,
    /// `"118.3 pixels/second"`
    pub rate: String,
}

/// Everything one animation owns: the window, the color pair, the fill
/// order and the surface it paints. Dropped wholesale on teardown;
/// nothing is shared between sessions.
#[derive(Debug)]
pub struct Session {
    window: TimeWindow,
    colors: ColorStop,
    mode: FillMode,
    key: OrderKey,
    order: FillOrder,
    compositor: Compositor,
    rate: String,
    rng: StdRng,
}

impl Session {
    pub fn new(
        window: TimeWindow,
        colors: ColorStop,
        mode: FillMode,
        width: u32,
        height: u32,
    ) -> Result<Self> {
        Self::with_rng(window, colors, mode, width, height, StdRng::from_entropy())
    }

    /// Seedable variant so randomized fill orders are reproducible.
    pub fn with_rng(
        window: TimeWindow,
        colors: ColorStop,
        mode: FillMode,
        width: u32,
        height: u32,
        mut rng: StdRng,
    ) -> Result<Self> {
        let order = FillOrder::generate(width, height, mode, &mut rng)?;
        let compositor = Compositor::new(width, height, &colors);
        let rate = rate_line(mode, compositor.total(), &window);
        tracing::debug!(
            width,
            height,
            mode = mode.as_ref(),
            duration_secs = window.duration().as_secs(),
            "render session created"
        );
        Ok(Session {
            window,
            colors,
            mode,
            key: OrderKey {
                width,
                height,
                colors,
                mode,
            },
            order,
            compositor,
            rate,
            rng,
        })
    }

    pub fn window(&self) -> &TimeWindow {
        &self.window
    }

    pub fn colors(&self) -> ColorStop {
        self.colors
    }

    pub fn mode(&self) -> FillMode {
        self.mode
    }

    pub fn surface(&self) -> &RgbaImage {
        self.compositor.surface()
    }

    pub fn filled(&self) -> usize {
        self.compositor.filled()
    }

    /// Advance the fill to `now` and report display state.
    pub fn step(&mut self, now: Instant) -> FrameReport {
        let eval = self.window.evaluate(now);
        let target = (eval.progress * self.compositor.total() as f64).floor() as usize;
        self.compositor.paint_to(&self.order, &self.colors, target);
        self.report_from(eval)
    }

    /// Report without painting; used while the host holds the
    /// animation paused and the surface frozen.
    pub fn report(&self, now: Instant) -> FrameReport {
        self.report_from(self.window.evaluate(now))
    }

    fn report_from(&self, eval: Evaluation) -> FrameReport {
        FrameReport {
            state: eval.state,
            progress: eval.progress,
            filled: self.compositor.filled(),
            percent: format!("{:.2}%", eval.progress * 100.0),
            remaining: clock::format_remaining(eval.remaining),
            rate: self.rate.clone(),
        }
    }

    /// Swap in a new surface size, preserving current visual progress:
    /// the committed count is recomputed from the progress fraction,
    /// never reset to zero.
    pub fn resize(&mut self, width: u32, height: u32, now: Instant) -> Result<()> {
        self.rebuild(width, height, self.colors, self.mode, now)
    }

    /// Change colors and/or fill mode mid-animation at the current size.
    pub fn reconfigure(&mut self, colors: ColorStop, mode: FillMode, now: Instant) -> Result<()> {
        self.rebuild(self.compositor.width(), self.compositor.height(), colors, mode, now)
    }

    fn rebuild(
        &mut self,
        width: u32,
        height: u32,
        colors: ColorStop,
        mode: FillMode,
        now: Instant,
    ) -> Result<()> {
        let key = OrderKey {
            width,
            height,
            colors,
            mode,
        };
        if key != self.key {
            self.order = FillOrder::generate(width, height, mode, &mut self.rng)?;
            self.key = key;
            tracing::debug!(width, height, mode = mode.as_ref(), "fill order regenerated");
        }

        self.colors = colors;
        self.mode = mode;
        self.compositor = Compositor::new(width, height, &colors);
        self.rate = rate_line(mode, self.compositor.total(), &self.window);

        // repaint up to the current progress so the swap is seamless
        let eval = self.window.evaluate(now);
        let target = (eval.progress * self.compositor.total() as f64).floor() as usize;
        self.compositor.paint_to(&self.order, &self.colors, target);
        Ok(())
    }
}

fn rate_line(mode: FillMode, total_pixels: usize, window: &TimeWindow) -> String {
    let (units, unit) = match mode {
        FillMode::Solid => (255, RateUnit::Shades),
        _ => (total_pixels as u64, RateUnit::Pixels),
    };
    rate::format_rate(units, window.duration(), unit)
}
