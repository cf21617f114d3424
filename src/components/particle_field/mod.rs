//! Ambient particle background.
//!
//! Draws a full-viewport field of drifting hearts, stars and dots on an HTML
//! canvas with:
//! - A population sized to the viewport area when the component mounts
//! - Gentle attraction and brightening around the pointer
//! - Perpetual twinkle from a re-rolled opacity target
//! - Toroidal wraparound at the viewport edges
//!
//! # Example
//!
//! ```ignore
//! use particle_field::ParticleBackground;
//!
//! view! {
//!     <main>
//!         <ParticleBackground />
//!         <div class="content-layer">/* page */</div>
//!     </main>
//! }
//! ```

mod component;
pub mod config;
mod frame_loop;
mod particles;
mod render;
mod shapes;
mod state;
pub mod theme;

pub use component::ParticleBackground;
pub use config::{ConfigError, FieldConfig, LoadError, ShapeWeights};
pub use frame_loop::{CancelToken, FieldRuntime};
pub use particles::{Particle, ParticleSystem, Shape};
pub use render::{Surface, render};
pub use shapes::PathSegment;
pub use state::{FieldState, PointerState};
pub use theme::{Hsl, Palette};
