//! Pixel-fill countdown renderer
//!
//! A raster surface fills from a start color to an end color as a
//! wall-clock window elapses, following a configurable fill pattern:
//! - per-pixel orders (random, linear, spiral, wave, checkerboard)
//! - whole-surface interpolation (solid)
//!
//! The crate is split the way the animation works: a stateless clock
//! maps time to a progress fraction, a generated fill order says which
//! pixels go next, and a compositor commits them to the surface. A
//! [`Session`] owns all of that for one animation; a [`Driver`] steps
//! it behind a [`FrameScheduler`] so hosts decide how frames are
//! scheduled. The `pixelfill` binary is one such host; the control
//! socket lets `pixelfillctl` pause, resume or snapshot it.

pub mod cli;
pub mod clock;
pub mod color;
pub mod config;
pub mod driver;
pub mod error;
pub mod hud;
pub mod order;
pub mod raster;
pub mod rate;
pub mod session;
pub mod socket;

pub use clock::{Evaluation, TimeWindow, TimerState};
pub use color::{ColorStop, Rgb};
pub use driver::{Driver, FrameScheduler, IntervalScheduler, Outcome};
pub use error::{Error, Result};
pub use order::{FillMode, FillOrder};
pub use raster::Compositor;
pub use session::{FrameReport, Session};
