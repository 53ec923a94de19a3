use std::f64::consts::TAU;

use rand::Rng;
use rand::seq::SliceRandom;
use strum::{AsRefStr, EnumString, VariantNames};

use crate::error::{Error, Result};

/// Spatial pattern pixels follow while filling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, AsRefStr, VariantNames)]
#[strum(serialize_all = "snake_case")]
pub enum FillMode {
    /// Shuffled pixel order.
    #[default]
    Random,
    /// Row-major raster sweep.
    Linear,
    /// Whole surface steps through interpolated shades; no per-pixel order.
    Solid,
    /// Archimedean spiral from the center outward.
    Spiral,
    /// Left-to-right sweep hugging a sine wave.
    Wave,
    /// Alternating 20x20 blocks.
    Checkerboard,
}

/// Full rotations the spiral makes from center to corner.
const SPIRAL_TURNS: f64 = 3.0;
/// Complete waves across the surface width.
const WAVE_COUNT: f64 = 4.0;
/// Wave amplitude as a fraction of surface height.
const WAVE_AMPLITUDE: f64 = 0.3;
/// Checkerboard block edge in pixels.
const CHECKER_BLOCK: u32 = 20;

/// The order pixels transition from the start color to the end color:
/// a permutation of `0..width*height` in row-major pixel indices, or
/// no order at all for [`FillMode::Solid`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FillOrder {
    Solid,
    Ordered(Vec<u32>),
}

impl FillOrder {
    /// Generate the fill order for a surface. All modes except
    /// `Random` are pure functions of `(width, height)`.
    pub fn generate<R: Rng>(width: u32, height: u32, mode: FillMode, rng: &mut R) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::DegenerateSurface { width, height });
        }

        let order = match mode {
            FillMode::Solid => return Ok(FillOrder::Solid),
            FillMode::Linear => identity(width, height),
            FillMode::Random => {
                let mut order = identity(width, height);
                order.shuffle(rng);
                order
            }
            FillMode::Spiral => {
                let cx = f64::from(width / 2);
                let cy = f64::from(height / 2);
                // center-to-corner distance; 1x1 degenerates to the center itself
                let max_dist = (cx * cx + cy * cy).sqrt().max(1.0);
                sorted_by_key(width, height, |x, y| {
                    let dx = f64::from(x) - cx;
                    let dy = f64::from(y) - cy;
                    let dist = (dx * dx + dy * dy).sqrt();
                    let mut angle = dy.atan2(dx);
                    if angle < 0.0 {
                        angle += TAU;
                    }
                    (dist / max_dist) * SPIRAL_TURNS + angle / TAU
                })
            }
            FillMode::Wave => {
                let w = f64::from(width);
                let h = f64::from(height);
                sorted_by_key(width, height, |x, y| {
                    let x_progress = f64::from(x) / w;
                    let wave_center =
                        h / 2.0 + WAVE_AMPLITUDE * h * (TAU * WAVE_COUNT * x_progress).sin();
                    x_progress + (f64::from(y) - wave_center).abs() * (w / h)
                })
            }
            FillMode::Checkerboard => sorted_by_key(width, height, |x, y| {
                f64::from((x / CHECKER_BLOCK + y / CHECKER_BLOCK) % 2)
            }),
        };

        Ok(FillOrder::Ordered(order))
    }
}

fn identity(width: u32, height: u32) -> Vec<u32> {
    (0..width * height).collect()
}

/// Stable sort of the raster order by a per-pixel key; ties keep
/// row-major enumeration order, which makes every keyed mode
/// deterministic.
fn sorted_by_key(width: u32, height: u32, key: impl Fn(u32, u32) -> f64) -> Vec<u32> {
    let mut keyed: Vec<(f64, u32)> = Vec::with_capacity(width as usize * height as usize);
    for y in 0..height {
        for x in 0..width {
            keyed.push((key(x, y), y * width + x));
        }
    }
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
    keyed.into_iter().map(|(_, index)| index).collect()
}
