/// Point, line and triangle rasterization onto a [`Canvas`]
use nalgebra::Point2;
use tracing::trace;

use crate::canvas::Canvas;
use crate::geometry::Triangle;
use crate::projection::Camera;

/// Light the cell nearest to a screen-space point
///
/// Returns `false` when the rounded cell is off the canvas or the point is
/// not finite.
pub fn plot_point(canvas: &mut Canvas, point: &Point2<f64>) -> bool {
    if !point.x.is_finite() || !point.y.is_finite() {
        return false;
    }
    canvas.plot(point.x.round() as i64, point.y.round() as i64)
}

/// Draw a straight line between two cells, both endpoints included
///
/// Endpoints are ordered before stepping so both directions light the same
/// cells. Only the steps whose cells can land on the canvas are visited, and
/// each of those is bounds-checked.
pub fn draw_line(canvas: &mut Canvas, x0: i64, y0: i64, x1: i64, y1: i64) {
    let ((x0, y0), (x1, y1)) = if (x1, y1) < (x0, y0) {
        ((x1, y1), (x0, y0))
    } else {
        ((x0, y0), (x1, y1))
    };

    let width = canvas.width() as i64;
    let height = canvas.height() as i64;
    if (x0 < 0 && x1 < 0)
        || (x0 >= width && x1 >= width)
        || (y0 < 0 && y1 < 0)
        || (y0 >= height && y1 >= height)
    {
        return;
    }

    let walk = LineWalk::new(x0, y0, x1, y1);
    let limit = if walk.x_major {
        i128::from(width)
    } else {
        i128::from(height)
    };
    let Some((first, last)) = walk.visible_steps(limit) else {
        return;
    };

    for k in first..=last {
        let (x, y) = walk.cell(k);
        if let (Ok(x), Ok(y)) = (i64::try_from(x), i64::try_from(y)) {
            canvas.plot(x, y);
        }
    }
}

/// Integer Bresenham line addressable by step index
///
/// The error-term walk (`err = dx - dy`, step x while `2·err > -dy`, step y
/// while `2·err < dx`) advances the major axis on every step. After `k` steps
/// the minor axis has moved `k·minor / major` rounded to nearest, with exact
/// halves rounded down, so any step's cell can be computed directly.
struct LineWalk {
    x0: i128,
    y0: i128,
    sx: i128,
    sy: i128,
    major: u128,
    minor: u128,
    x_major: bool,
}

impl LineWalk {
    fn new(x0: i64, y0: i64, x1: i64, y1: i64) -> Self {
        let dx = (i128::from(x1) - i128::from(x0)).unsigned_abs();
        let dy = (i128::from(y1) - i128::from(y0)).unsigned_abs();
        Self {
            x0: x0.into(),
            y0: y0.into(),
            sx: if x0 < x1 { 1 } else { -1 },
            sy: if y0 < y1 { 1 } else { -1 },
            major: dx.max(dy),
            minor: dx.min(dy),
            x_major: dx >= dy,
        }
    }

    fn minor_steps(&self, k: u128) -> u128 {
        if self.major == 0 {
            return 0;
        }
        // k and minor are both below 2^64
        let product = k * self.minor;
        let (q, r) = (product / self.major, product % self.major);
        q + u128::from(2 * r > self.major)
    }

    fn cell(&self, k: u128) -> (i128, i128) {
        let m = self.minor_steps(k) as i128;
        let k = k as i128;
        if self.x_major {
            (self.x0 + self.sx * k, self.y0 + self.sy * m)
        } else {
            (self.x0 + self.sx * m, self.y0 + self.sy * k)
        }
    }

    /// Inclusive step range whose major-axis coordinate lies in `[0, limit)`
    fn visible_steps(&self, limit: i128) -> Option<(u128, u128)> {
        let (start, dir) = if self.x_major {
            (self.x0, self.sx)
        } else {
            (self.y0, self.sy)
        };
        let (lo, hi) = if dir > 0 {
            (-start, limit - 1 - start)
        } else {
            (start - limit + 1, start)
        };
        let lo = lo.max(0);
        let hi = hi.min(self.major as i128);
        (lo <= hi).then(|| (lo as u128, hi as u128))
    }
}

/// Project a triangle and draw its outline
///
/// Each projected vertex is plotted, then the edges 1→2, 2→3 and 3→1 are
/// drawn between the truncated coordinates. Returns `false` and draws
/// nothing when any vertex fails to project.
pub fn draw_triangle(canvas: &mut Canvas, camera: &Camera, triangle: &Triangle) -> bool {
    let width = canvas.width() as f64;
    let height = canvas.height() as f64;

    let mut projected = [Point2::origin(); 3];
    for (slot, vertex) in projected.iter_mut().zip(&triangle.points) {
        match camera.project(vertex, width, height) {
            Some(point) => *slot = point,
            None => {
                trace!(?vertex, "vertex behind near plane, skipping triangle");
                return false;
            }
        }
    }

    for point in &projected {
        plot_point(canvas, point);
    }

    let cells = projected.map(|p| (p.x as i64, p.y as i64));
    for i in 0..3 {
        let (x0, y0) = cells[i];
        let (x1, y1) = cells[(i + 1) % 3];
        draw_line(canvas, x0, y0, x1, y1);
    }
    true
}
