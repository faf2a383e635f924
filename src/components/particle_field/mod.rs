//! Animated particle-field background.
//!
//! Renders a field of slowly drifting particles on an HTML canvas with:
//! - Straight-line motion that wraps around the surface edges
//! - Fading lines between every pair of particles closer than a threshold
//! - Light/dark palettes that can be swapped without disturbing motion
//! - Tunable population, size, speed and link parameters
//!
//! # Example
//!
//! ```ignore
//! use particle_field::{FieldConfig, ParticleFieldCanvas, ThemeMode};
//!
//! let theme = RwSignal::new(ThemeMode::Dark);
//! view! { <ParticleFieldCanvas theme=theme config=FieldConfig::sparse() /> }
//! ```

mod component;
pub mod config;
pub mod engine;
pub mod links;
pub mod particles;
pub mod surface;
pub mod theme;

pub use component::ParticleFieldCanvas;
pub use config::{ConfigError, FieldConfig, LinkStrategy};
pub use engine::{EngineState, FrameStats, ParticleFieldEngine};
pub use theme::ThemeMode;
