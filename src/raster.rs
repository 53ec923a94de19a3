use image::RgbaImage;
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

use crate::color::ColorStop;
use crate::order::FillOrder;

/// Divisor bounding how much of the surface one `paint_to` call may
/// re-examine: at most `total / 60` pixels behind the committed count.
const REPAINT_WINDOW_DIVISOR: usize = 60;

/// Owns the pixel buffer and commits fill progress into it.
///
/// Painting is monotonic within a session: pixels are never reverted,
/// and a target below the committed count is ignored.
#[derive(Debug)]
pub struct Compositor {
    surface: RgbaImage,
    filled: usize,
}

impl Compositor {
    /// Fresh surface, fully painted with the start color.
    pub fn new(width: u32, height: u32, colors: &ColorStop) -> Self {
        let mut compositor = Compositor {
            surface: RgbaImage::new(width, height),
            filled: 0,
        };
        compositor.reset(colors);
        compositor
    }

    pub fn width(&self) -> u32 {
        self.surface.width()
    }

    pub fn height(&self) -> u32 {
        self.surface.height()
    }

    /// Total pixel count of the surface.
    pub fn total(&self) -> usize {
        self.surface.width() as usize * self.surface.height() as usize
    }

    /// Units committed so far; the low-water mark for incremental painting.
    pub fn filled(&self) -> usize {
        self.filled
    }

    pub fn surface(&self) -> &RgbaImage {
        &self.surface
    }

    /// Repaint the whole surface with the start color and rewind the fill.
    pub fn reset(&mut self, colors: &ColorStop) {
        let (width, height) = self.surface.dimensions();
        draw_filled_rect_mut(
            &mut self.surface,
            Rect::at(0, 0).of_size(width, height),
            colors.start.to_rgba(),
        );
        self.filled = 0;
    }

    /// Paint forward so `target` units are committed.
    ///
    /// Ordered modes paint only the order slice between the low-water
    /// mark and `target`; solid recolors the whole surface with the
    /// shade interpolated at `target / total`. `order` must have been
    /// generated for this surface's dimensions.
    pub fn paint_to(&mut self, order: &FillOrder, colors: &ColorStop, target: usize) {
        let total = self.total();
        let target = target.min(total);
        if target < self.filled {
            // clock skew; backward correction is unsupported
            return;
        }

        match order {
            FillOrder::Solid => {
                let shade = colors.start.lerp(colors.end, target as f64 / total as f64);
                let (width, height) = self.surface.dimensions();
                draw_filled_rect_mut(
                    &mut self.surface,
                    Rect::at(0, 0).of_size(width, height),
                    shade.to_rgba(),
                );
            }
            FillOrder::Ordered(order) => {
                let width = self.surface.width();
                let low = self
                    .filled
                    .saturating_sub(total.div_ceil(REPAINT_WINDOW_DIVISOR));
                let end = colors.end.to_rgba();
                for &index in &order[low..target] {
                    self.surface.put_pixel(index % width, index / width, end);
                }
            }
        }

        self.filled = target;
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::color::Rgb;
    use crate::order::FillMode;

    fn colors() -> ColorStop {
        ColorStop {
            start: Rgb::parse_hex("#000000").unwrap(),
            end: Rgb::parse_hex("#ffffff").unwrap(),
        }
    }

    fn order(width: u32, height: u32, mode: FillMode) -> FillOrder {
        let mut rng = StdRng::seed_from_u64(3);
        FillOrder::generate(width, height, mode, &mut rng).unwrap()
    }

    fn count_matching(compositor: &Compositor, color: Rgb) -> usize {
        compositor
            .surface()
            .pixels()
            .filter(|p| **p == color.to_rgba())
            .count()
    }

    #[test]
    fn test_reset_paints_start_color() {
        let colors = colors();
        let compositor = Compositor::new(10, 10, &colors);
        assert_eq!(count_matching(&compositor, colors.start), 100);
        assert_eq!(compositor.filled(), 0);
    }

    #[test]
    fn test_linear_paints_raster_prefix() {
        let colors = colors();
        let mut compositor = Compositor::new(10, 10, &colors);
        compositor.paint_to(&order(10, 10, FillMode::Linear), &colors, 50);

        let end = colors.end.to_rgba();
        let start = colors.start.to_rgba();
        for (i, pixel) in compositor.surface().pixels().enumerate() {
            if i < 50 {
                assert_eq!(*pixel, end, "pixel {i} should be filled");
            } else {
                assert_eq!(*pixel, start, "pixel {i} should be untouched");
            }
        }
        assert_eq!(compositor.filled(), 50);
    }

    #[test]
    fn test_full_fill_reaches_end_color_for_every_mode() {
        let colors = colors();
        for mode in [
            FillMode::Random,
            FillMode::Linear,
            FillMode::Solid,
            FillMode::Spiral,
            FillMode::Wave,
            FillMode::Checkerboard,
        ] {
            let mut compositor = Compositor::new(12, 7, &colors);
            let order = order(12, 7, mode);
            compositor.paint_to(&order, &colors, compositor.total());
            assert_eq!(
                count_matching(&compositor, colors.end),
                84,
                "{mode:?} did not fill completely"
            );
        }
    }

    #[test]
    fn test_solid_midpoint_is_interpolated_gray() {
        let colors = colors();
        let mut compositor = Compositor::new(10, 10, &colors);
        compositor.paint_to(&FillOrder::Solid, &colors, 50);

        let gray = Rgb {
            r: 128,
            g: 128,
            b: 128,
        };
        assert_eq!(count_matching(&compositor, gray), 100);
    }

    #[test]
    fn test_incremental_calls_match_single_call() {
        let colors = colors();
        let order = order(9, 9, FillMode::Spiral);

        let mut incremental = Compositor::new(9, 9, &colors);
        for target in [7, 20, 33, 52, 81] {
            incremental.paint_to(&order, &colors, target);
        }

        let mut single = Compositor::new(9, 9, &colors);
        single.paint_to(&order, &colors, 81);

        assert_eq!(incremental.surface(), single.surface());
    }

    #[test]
    fn test_backward_target_is_a_noop() {
        let colors = colors();
        let order = order(10, 10, FillMode::Linear);
        let mut compositor = Compositor::new(10, 10, &colors);

        compositor.paint_to(&order, &colors, 60);
        compositor.paint_to(&order, &colors, 10);

        assert_eq!(compositor.filled(), 60);
        assert_eq!(count_matching(&compositor, colors.end), 60);
    }

    #[test]
    fn test_target_clamped_to_total() {
        let colors = colors();
        let order = order(5, 5, FillMode::Linear);
        let mut compositor = Compositor::new(5, 5, &colors);

        compositor.paint_to(&order, &colors, 10_000);
        assert_eq!(compositor.filled(), 25);
        assert_eq!(count_matching(&compositor, colors.end), 25);
    }
}
