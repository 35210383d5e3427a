use std::f64::consts::TAU;

use crate::config::Color;
use crate::geometry::Point;

/// 2D drawing primitives the clock renderer needs.
///
/// Angles follow the usual canvas convention: 0 points along +x and angles
/// grow clockwise because y grows downwards.
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Resets every pixel to transparent.
    fn clear(&mut self);

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color);

    fn stroke_line(&mut self, from: Point, to: Point, width: f64, color: Color);

    /// Strokes the arc running clockwise from `start_angle` to `end_angle`.
    fn stroke_arc(
        &mut self,
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        width: f64,
        color: Color,
    );

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color);
}

/// Clockwise sweep from `start` to `end`, in `[0, TAU]`.
pub fn clockwise_sweep(start: f64, end: f64) -> f64 {
    let sweep = end - start;
    if sweep >= TAU {
        TAU
    } else {
        sweep.rem_euclid(TAU)
    }
}

// ============================================================================
// RETAINED MODE
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    FillRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Color,
    },
    Line {
        from: Point,
        to: Point,
        width: f64,
        color: Color,
    },
    Arc {
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        width: f64,
        color: Color,
    },
    Circle {
        center: Point,
        radius: f64,
        color: Color,
    },
}

/// Records drawing calls so a frame can be inspected or replayed later.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    /// Drops recorded commands and adopts a new size.
    pub fn reset(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.commands.clear();
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn replay<S: Surface + ?Sized>(&self, target: &mut S) {
        for command in &self.commands {
            match *command {
                DrawCommand::Clear => target.clear(),
                DrawCommand::FillRect {
                    x,
                    y,
                    width,
                    height,
                    color,
                } => target.fill_rect(x, y, width, height, color),
                DrawCommand::Line {
                    from,
                    to,
                    width,
                    color,
                } => target.stroke_line(from, to, width, color),
                DrawCommand::Arc {
                    center,
                    radius,
                    start_angle,
                    end_angle,
                    width,
                    color,
                } => target.stroke_arc(center, radius, start_angle, end_angle, width, color),
                DrawCommand::Circle {
                    center,
                    radius,
                    color,
                } => target.fill_circle(center, radius, color),
            }
        }
    }
}

impl Surface for Scene {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
        self.commands.push(DrawCommand::FillRect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    fn stroke_line(&mut self, from: Point, to: Point, width: f64, color: Color) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            width,
            color,
        });
    }

    fn stroke_arc(
        &mut self,
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        width: f64,
        color: Color,
    ) {
        self.commands.push(DrawCommand::Arc {
            center,
            radius,
            start_angle,
            end_angle,
            width,
            color,
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }
}

// ============================================================================
// PIXEL FRAMEBUFFER
// ============================================================================

/// Anti-aliased rasterizer over an RGBA8 frame, as handed out by `pixels`.
pub struct Canvas<'a> {
    frame: &'a mut [u8],
    width: usize,
    height: usize,
}

impl<'a> Canvas<'a> {
    /// Rows that do not fit in `frame` are treated as off-surface.
    pub fn new(frame: &'a mut [u8], width: usize, height: usize) -> Self {
        let rows = if width == 0 {
            0
        } else {
            frame.len() / (width * 4)
        };
        Self {
            frame,
            width,
            height: height.min(rows),
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        let mut out = [0; 4];
        out.copy_from_slice(&self.frame[idx..idx + 4]);
        Some(out)
    }

    /// Source-over blend of `color` with the given coverage.
    fn blend(&mut self, x: i64, y: i64, color: Color, coverage: f32) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let alpha = (coverage.clamp(0.0, 1.0) * color.opacity()).clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }
        let idx = (y as usize * self.width + x as usize) * 4;
        let dst = &mut self.frame[idx..idx + 4];
        let src = [color.r as f32, color.g as f32, color.b as f32];
        for (channel, value) in dst.iter_mut().take(3).zip(src) {
            *channel = (value * alpha + *channel as f32 * (1.0 - alpha)).round() as u8;
        }
        let dst_alpha = dst[3] as f32 / 255.0;
        dst[3] = ((alpha + dst_alpha * (1.0 - alpha)) * 255.0).round() as u8;
    }

    /// Inclusive pixel range covering the box `min..max`, clipped to the
    /// canvas.
    fn bounds(&self, min: Point, max: Point) -> Option<(i64, i64, i64, i64)> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        if !(min.x.is_finite() && min.y.is_finite() && max.x.is_finite() && max.y.is_finite()) {
            return None;
        }
        let x0 = (min.x.floor() as i64).max(0);
        let y0 = (min.y.floor() as i64).max(0);
        let x1 = (max.x.ceil() as i64).min(self.width as i64 - 1);
        let y1 = (max.y.ceil() as i64).min(self.height as i64 - 1);
        (x0 <= x1 && y0 <= y1).then_some((x0, y0, x1, y1))
    }
}

fn pixel_center(x: i64, y: i64) -> Point {
    Point::new(x as f64 + 0.5, y as f64 + 0.5)
}

/// Coverage of a pixel whose center is `dist` away from a shape edge at
/// `half_width`, with a one pixel soft edge.
fn edge_coverage(dist: f64, half_width: f64) -> f32 {
    (1.0 - (dist - half_width).clamp(0.0, 1.0)) as f32
}

impl Surface for Canvas<'_> {
    fn width(&self) -> u32 {
        self.width as u32
    }

    fn height(&self) -> u32 {
        self.height as u32
    }

    fn clear(&mut self) {
        self.frame.fill(0);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
        let Some((x0, y0, x1, y1)) =
            self.bounds(Point::new(x, y), Point::new(x + width, y + height))
        else {
            return;
        };
        for py in y0..=y1 {
            for px in x0..=x1 {
                let c = pixel_center(px, py);
                if c.x >= x && c.x < x + width && c.y >= y && c.y < y + height {
                    self.blend(px, py, color, 1.0);
                }
            }
        }
    }

    fn stroke_line(&mut self, from: Point, to: Point, width: f64, color: Color) {
        let half = width / 2.0;
        let pad = half + 1.0;
        let Some((x0, y0, x1, y1)) = self.bounds(
            Point::new(from.x.min(to.x) - pad, from.y.min(to.y) - pad),
            Point::new(from.x.max(to.x) + pad, from.y.max(to.y) + pad),
        ) else {
            return;
        };

        let dx = to.x - from.x;
        let dy = to.y - from.y;
        let len_sq = dx * dx + dy * dy;
        for py in y0..=y1 {
            for px in x0..=x1 {
                let c = pixel_center(px, py);
                let t = if len_sq > 0.0 {
                    (((c.x - from.x) * dx + (c.y - from.y) * dy) / len_sq).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let nearest = Point::new(from.x + t * dx, from.y + t * dy);
                let aa = edge_coverage(c.distance(nearest), half);
                if aa > 0.01 {
                    self.blend(px, py, color, aa);
                }
            }
        }
    }

    fn stroke_arc(
        &mut self,
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        width: f64,
        color: Color,
    ) {
        let sweep = clockwise_sweep(start_angle, end_angle);
        if sweep.is_nan() || sweep <= 0.0 {
            return;
        }
        let half = width / 2.0;
        let reach = radius + half + 1.0;
        let Some((x0, y0, x1, y1)) = self.bounds(
            Point::new(center.x - reach, center.y - reach),
            Point::new(center.x + reach, center.y + reach),
        ) else {
            return;
        };

        for py in y0..=y1 {
            for px in x0..=x1 {
                let c = pixel_center(px, py);
                let angle = (c.y - center.y).atan2(c.x - center.x);
                let relative = (angle - start_angle).rem_euclid(TAU);
                if sweep < TAU && relative > sweep {
                    continue;
                }
                let aa = edge_coverage((c.distance(center) - radius).abs(), half);
                if aa > 0.01 {
                    self.blend(px, py, color, aa);
                }
            }
        }
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color) {
        let reach = radius + 1.0;
        let Some((x0, y0, x1, y1)) = self.bounds(
            Point::new(center.x - reach, center.y - reach),
            Point::new(center.x + reach, center.y + reach),
        ) else {
            return;
        };

        for py in y0..=y1 {
            for px in x0..=x1 {
                let aa = edge_coverage(pixel_center(px, py).distance(center), radius);
                if aa > 0.0 {
                    self.blend(px, py, color, aa);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    const RED: Color = Color::new(0xff, 0x00, 0x00);
    const WHITE: Color = Color::new(0xff, 0xff, 0xff);

    fn frame(width: usize, height: usize) -> Vec<u8> {
        vec![0; width * height * 4]
    }

    #[test]
    fn clear_makes_frame_transparent() {
        let mut buf = vec![7; 4 * 4 * 4];
        let mut canvas = Canvas::new(&mut buf, 4, 4);
        canvas.clear();
        assert_eq!(canvas.pixel(2, 2), Some([0, 0, 0, 0]));
    }

    #[test]
    fn fill_rect_covers_whole_canvas() {
        let mut buf = frame(8, 6);
        let mut canvas = Canvas::new(&mut buf, 8, 6);
        canvas.fill_rect(0.0, 0.0, 8.0, 6.0, WHITE);
        assert_eq!(canvas.pixel(0, 0), Some([0xff, 0xff, 0xff, 0xff]));
        assert_eq!(canvas.pixel(7, 5), Some([0xff, 0xff, 0xff, 0xff]));
        assert_eq!(canvas.pixel(8, 0), None);
    }

    #[test]
    fn short_frame_clips_rows() {
        let mut buf = frame(4, 2);
        let canvas = Canvas::new(&mut buf, 4, 10);
        assert_eq!(canvas.height(), 2);
    }

    #[test]
    fn line_colors_its_path_only() {
        let mut buf = frame(20, 20);
        let mut canvas = Canvas::new(&mut buf, 20, 20);
        canvas.stroke_line(Point::new(10.0, 10.0), Point::new(10.0, 0.0), 2.0, RED);
        assert_eq!(canvas.pixel(10, 5), Some([0xff, 0, 0, 0xff]));
        assert_eq!(canvas.pixel(15, 5), Some([0, 0, 0, 0]));
        assert_eq!(canvas.pixel(10, 15), Some([0, 0, 0, 0]));
    }

    #[test]
    fn degenerate_line_is_a_dot() {
        let mut buf = frame(10, 10);
        let mut canvas = Canvas::new(&mut buf, 10, 10);
        let p = Point::new(5.5, 5.5);
        canvas.stroke_line(p, p, 3.0, RED);
        assert_eq!(canvas.pixel(5, 5), Some([0xff, 0, 0, 0xff]));
        assert_eq!(canvas.pixel(0, 0), Some([0, 0, 0, 0]));
    }

    #[test]
    fn half_arc_from_twelve_covers_right_side() {
        let mut buf = frame(41, 41);
        let mut canvas = Canvas::new(&mut buf, 41, 41);
        let center = Point::new(20.5, 20.5);
        let start = 3.0 * FRAC_PI_2;
        canvas.stroke_arc(center, 15.0, start, start + PI, 3.0, RED);

        // 3 o'clock is inside the sweep, 9 o'clock is not
        assert_eq!(canvas.pixel(35, 20), Some([0xff, 0, 0, 0xff]));
        assert_eq!(canvas.pixel(5, 20), Some([0, 0, 0, 0]));
        // nothing near the center
        assert_eq!(canvas.pixel(20, 20), Some([0, 0, 0, 0]));
    }

    #[test]
    fn empty_sweep_draws_nothing() {
        let mut buf = frame(20, 20);
        let mut canvas = Canvas::new(&mut buf, 20, 20);
        let start = 3.0 * FRAC_PI_2;
        canvas.stroke_arc(Point::new(10.0, 10.0), 5.0, start, start, 2.0, RED);
        assert!(buf.iter().all(|&b| b == 0));
    }

    #[test]
    fn sweep_wraps_and_saturates() {
        assert_eq!(clockwise_sweep(1.0, 1.0), 0.0);
        assert!((clockwise_sweep(1.0, 0.5) - (TAU - 0.5)).abs() < 1e-12);
        assert_eq!(clockwise_sweep(0.0, 3.0 * TAU), TAU);
    }

    #[test]
    fn circle_fills_center() {
        let mut buf = frame(10, 10);
        let mut canvas = Canvas::new(&mut buf, 10, 10);
        canvas.fill_circle(Point::new(5.0, 5.0), 2.0, RED);
        assert_eq!(canvas.pixel(4, 4), Some([0xff, 0, 0, 0xff]));
        assert_eq!(canvas.pixel(0, 9), Some([0, 0, 0, 0]));
    }

    #[test]
    fn blending_half_transparent_over_white() {
        let mut buf = frame(2, 2);
        let mut canvas = Canvas::new(&mut buf, 2, 2);
        canvas.fill_rect(0.0, 0.0, 2.0, 2.0, WHITE);
        canvas.fill_rect(0.0, 0.0, 2.0, 2.0, Color::new(0, 0, 0).with_alpha(128));
        let [r, g, b, a] = canvas.pixel(0, 0).unwrap();
        assert_eq!((r, g, b, a), (127, 127, 127, 255));
    }

    #[test]
    fn scene_replays_in_order() {
        let mut scene = Scene::new(10, 10);
        scene.clear();
        scene.fill_rect(0.0, 0.0, 10.0, 10.0, WHITE);
        scene.fill_circle(Point::new(5.0, 5.0), 1.0, RED);
        assert_eq!(scene.commands().len(), 3);
        assert_eq!(scene.commands()[0], DrawCommand::Clear);

        let mut copy = Scene::new(10, 10);
        scene.replay(&mut copy);
        assert_eq!(copy.commands(), scene.commands());

        scene.reset(4, 4);
        assert!(scene.commands().is_empty());
        assert_eq!((scene.width(), scene.height()), (4, 4));
    }
}
