//! Outline geometry for the non-circular particle shapes.
//!
//! Paths are plain data so they can be inspected without a canvas; the
//! renderer replays them onto whatever [`Surface`](super::render::Surface)
//! it is given.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// Star inner vertices sit at this fraction of the outer radius.
pub const STAR_INNER_RATIO: f64 = 0.4;
const STAR_POINTS: usize = 5;

/// One command of a fillable outline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathSegment {
	MoveTo(f64, f64),
	LineTo(f64, f64),
	/// Cubic bezier: two control points, then the end point.
	CubicTo((f64, f64), (f64, f64), (f64, f64)),
	Close,
}

/// Two-lobed heart whose notch sits at `(x, y + 0.3 * size)` and whose tip
/// is `size` below `y`.
pub fn heart(x: f64, y: f64, size: f64) -> [PathSegment; 6] {
	let notch = y + size * 0.3;
	let half = size / 2.0;
	let waist = y + (size + size * 0.3) / 2.0;
	[
		PathSegment::MoveTo(x, notch),
		PathSegment::CubicTo((x, y), (x - half, y), (x - half, notch)),
		PathSegment::CubicTo((x - half, waist), (x, waist), (x, y + size)),
		PathSegment::CubicTo((x, waist), (x + half, waist), (x + half, notch)),
		PathSegment::CubicTo((x + half, y), (x, y), (x, notch)),
		PathSegment::Close,
	]
}

/// Five-pointed star centred on `(x, y)`, rotated by `angle` radians.
///
/// With no rotation the first point faces straight up.
pub fn star(x: f64, y: f64, size: f64, angle: f64) -> Vec<PathSegment> {
	let inner = size * STAR_INNER_RATIO;
	let mut path = Vec::with_capacity(STAR_POINTS * 2 + 1);
	for i in 0..STAR_POINTS {
		let outer_angle = TAU * i as f64 / STAR_POINTS as f64 - FRAC_PI_2 + angle;
		let inner_angle = outer_angle + PI / STAR_POINTS as f64;
		let tip = (x + outer_angle.cos() * size, y + outer_angle.sin() * size);
		path.push(if i == 0 {
			PathSegment::MoveTo(tip.0, tip.1)
		} else {
			PathSegment::LineTo(tip.0, tip.1)
		});
		path.push(PathSegment::LineTo(
			x + inner_angle.cos() * inner,
			y + inner_angle.sin() * inner,
		));
	}
	path.push(PathSegment::Close);
	path
}
