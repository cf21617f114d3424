//! Drawing the particle field.
//!
//! Rendering goes through the [`Surface`] trait so the frame loop can be
//! driven against an in-memory surface in tests. The browser build draws on a
//! `CanvasRenderingContext2d`.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::particles::{Particle, Shape};
use super::shapes::{self, PathSegment};
use super::state::FieldState;

/// The minimal set of 2d drawing operations the field needs.
pub trait Surface {
	/// Erase the rectangle `(0, 0)`..`(width, height)`.
	fn clear(&self, width: f64, height: f64);
	/// Set the CSS color used by subsequent fills.
	fn set_fill(&self, css: &str);
	fn fill_circle(&self, x: f64, y: f64, radius: f64);
	fn fill_path(&self, path: &[PathSegment]);
}

impl Surface for CanvasRenderingContext2d {
	fn clear(&self, width: f64, height: f64) {
		self.clear_rect(0.0, 0.0, width, height);
	}

	fn set_fill(&self, css: &str) {
		self.set_fill_style_str(css);
	}

	fn fill_circle(&self, x: f64, y: f64, radius: f64) {
		self.begin_path();
		let _ = self.arc(x, y, radius, 0.0, PI * 2.0);
		self.fill();
	}

	fn fill_path(&self, path: &[PathSegment]) {
		self.begin_path();
		for seg in path {
			match *seg {
				PathSegment::MoveTo(x, y) => self.move_to(x, y),
				PathSegment::LineTo(x, y) => self.line_to(x, y),
				PathSegment::CubicTo((c1x, c1y), (c2x, c2y), (x, y)) => {
					self.bezier_curve_to(c1x, c1y, c2x, c2y, x, y)
				}
				PathSegment::Close => self.close_path(),
			}
		}
		self.fill();
	}
}

/// Clears the surface and draws every particle at its current alpha.
pub fn render<S: Surface + ?Sized>(field: &FieldState, surface: &S) {
	surface.clear(field.width(), field.height());
	for p in &field.system.particles {
		draw_particle(surface, p);
	}
}

fn draw_particle<S: Surface + ?Sized>(surface: &S, p: &Particle) {
	surface.set_fill(&p.color.to_css(p.alpha));
	match p.shape {
		Shape::Heart => surface.fill_path(&shapes::heart(p.x, p.y, p.size)),
		Shape::Star => surface.fill_path(&shapes::star(p.x, p.y, p.size, p.angle)),
		Shape::Dot => surface.fill_circle(p.x, p.y, p.size / 2.0),
	}
}
