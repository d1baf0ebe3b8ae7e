// Hard-edged stroke rasterization onto a Surface.
//
// Pixel (i, j) is sampled at the point (i, j): a pointer at (10.0, 10.0)
// paints pixel (10, 10). A pixel is covered when its sample point lies inside
// (or on the edge of) the stroke outline. No anti-aliasing, so erasing the
// same path with an equal or wider eraser restores the background exactly.

use crate::surface::Surface;
use crate::tool::{Brush, LineCap, LineJoin};
use crate::types::{Color, Point};

/// Canvas-style miter limit, as a ratio of miter length to stroke width.
pub const MITER_LIMIT: f32 = 10.0;

/// Half-width below which a stroke could leave gaps between sample points.
const MIN_RADIUS: f32 = 0.5;

const EPS: f32 = 1e-4;

/// Paint one straight segment of a stroke, caps included.
/// A zero-length segment renders a dot so a bare click leaves a mark.
pub fn stroke_segment(surface: &mut Surface, from: Point, to: Point, brush: &Brush) {
    let r = radius(brush);
    if from.distance(to) <= EPS {
        stroke_dot(surface, from, brush);
        return;
    }
    match brush.cap {
        LineCap::Round => fill_capsule(surface, from, to, r, brush.color),
        LineCap::Butt => fill_convex(surface, &segment_quad(from, to, r, 0.0), brush.color),
        LineCap::Square => fill_convex(surface, &segment_quad(from, to, r, r), brush.color),
    }
}

/// Fill the outer wedge where segment `prev → vertex` meets `vertex → next`.
pub fn stroke_join(surface: &mut Surface, prev: Point, vertex: Point, next: Point, brush: &Brush) {
    let r = radius(brush);
    let (a, b) = (vertex - prev, next - vertex);
    if a.length() <= EPS || b.length() <= EPS {
        return;
    }
    if brush.join == LineJoin::Round {
        fill_disk(surface, vertex, r, brush.color);
        return;
    }

    let (d1, d2) = (a.scale(1.0 / a.length()), b.scale(1.0 / b.length()));
    let turn = d1.cross(d2);
    if turn.abs() <= EPS {
        // Straight continuation or a full reversal; the caps already meet.
        return;
    }
    // The outer side of the turn is opposite the turn direction.
    let side = if turn > 0.0 { -r } else { r };
    let p1 = vertex + d1.perp().scale(side);
    let p2 = vertex + d2.perp().scale(side);

    if brush.join == LineJoin::Miter {
        let bisector = d1.perp() + d2.perp();
        let half = bisector.length() / 2.0; // cos of the half angle at the tip
        if half > EPS && 1.0 / half <= MITER_LIMIT {
            let tip = vertex + bisector.scale(side / (bisector.length() * half));
            fill_convex(surface, &[vertex, p1, tip, p2], brush.color);
            return;
        }
    }
    fill_convex(surface, &[vertex, p1, p2], brush.color);
}

fn stroke_dot(surface: &mut Surface, at: Point, brush: &Brush) {
    let r = radius(brush);
    match brush.cap {
        LineCap::Round | LineCap::Butt => fill_disk(surface, at, r, brush.color),
        LineCap::Square => {
            let corners = [
                at + Point::new(-r, -r),
                at + Point::new(r, -r),
                at + Point::new(r, r),
                at + Point::new(-r, r),
            ];
            fill_convex(surface, &corners, brush.color);
        }
    }
    surface.put_pixel(at.x.round() as i32, at.y.round() as i32, brush.color);
}

#[inline]
fn radius(brush: &Brush) -> f32 {
    (brush.width / 2.0).max(MIN_RADIUS)
}

/// Rectangle around `from → to`, pushed out by `extend` past both ends.
fn segment_quad(from: Point, to: Point, r: f32, extend: f32) -> [Point; 4] {
    let d = (to - from).scale(1.0 / from.distance(to));
    let n = d.perp().scale(r);
    let a = from - d.scale(extend);
    let b = to + d.scale(extend);
    [a + n, b + n, b - n, a - n]
}

/// Inclusive pixel range covering [lo, hi], clipped to `0..limit`.
fn span(lo: f32, hi: f32, limit: usize) -> std::ops::Range<usize> {
    let start = lo.ceil().max(0.0) as usize;
    let end = (hi.floor() + 1.0).clamp(0.0, limit as f32) as usize;
    start..end.max(start)
}

fn fill_disk(surface: &mut Surface, c: Point, r: f32, color: Color) {
    let r2 = r * r;
    for y in span(c.y - r, c.y + r, surface.height) {
        for x in span(c.x - r, c.x + r, surface.width) {
            let q = Point::new(x as f32, y as f32) - c;
            if q.dot(q) <= r2 {
                surface.pixels[y * surface.width + x] = color.0;
            }
        }
    }
}

/// Every sample within `r` of the segment: a line with round caps.
fn fill_capsule(surface: &mut Surface, a: Point, b: Point, r: f32, color: Color) {
    let ab = b - a;
    let len2 = ab.dot(ab);
    let r2 = r * r;
    let ys = span(a.y.min(b.y) - r, a.y.max(b.y) + r, surface.height);
    let xs = span(a.x.min(b.x) - r, a.x.max(b.x) + r, surface.width);
    for y in ys {
        for x in xs.clone() {
            let p = Point::new(x as f32, y as f32);
            let t = ((p - a).dot(ab) / len2).clamp(0.0, 1.0);
            let q = p - (a + ab.scale(t));
            if q.dot(q) <= r2 {
                surface.pixels[y * surface.width + x] = color.0;
            }
        }
    }
}

/// Fill a convex polygon given in either winding order.
fn fill_convex(surface: &mut Surface, poly: &[Point], color: Color) {
    let (mut min, mut max) = (poly[0], poly[0]);
    for p in poly {
        min = Point::new(min.x.min(p.x), min.y.min(p.y));
        max = Point::new(max.x.max(p.x), max.y.max(p.y));
    }
    for y in span(min.y, max.y, surface.height) {
        for x in span(min.x, max.x, surface.width) {
            if contains(poly, Point::new(x as f32, y as f32)) {
                surface.pixels[y * surface.width + x] = color.0;
            }
        }
    }
}

fn contains(poly: &[Point], p: Point) -> bool {
    let (mut pos, mut neg) = (false, false);
    for (i, &a) in poly.iter().enumerate() {
        let b = poly[(i + 1) % poly.len()];
        let c = (b - a).cross(p - a);
        if c > EPS {
            pos = true;
        } else if c < -EPS {
            neg = true;
        }
        if pos && neg {
            return false;
        }
    }
    true
}
