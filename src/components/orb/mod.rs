//! Particle-field orb: the assistant's animated avatar.
//!
//! Each orb is a sphere of droplets laid out on a Fibonacci spiral, rotating
//! and breathing on a 2D canvas. Droplets drift through a three-colour
//! palette, optionally tinted by the user's mood. All orbs on the page share
//! one listening flag and one mood preset, which switch them between calm
//! and energetic motion together.
//!
//! # Example
//!
//! ```ignore
//! use orb_field::components::orb::{engine, OrbCanvas};
//!
//! engine().set_listening(true);
//! engine().set_mood_preset("calm");
//!
//! view! { <OrbCanvas size=56.0 name="orb-container-mini" /> }
//! ```

mod component;
pub mod config;
mod engine;
pub mod error;
mod instance;
pub mod mood;
pub mod particle;
pub mod preset;
mod registry;
mod render;
pub mod state;
pub mod theme;

pub use component::OrbCanvas;
pub use config::OrbConfig;
pub use engine::{OrbEngine, OrbInstance, engine};
pub use instance::OrbHandle;
pub use preset::MoodPreset;
pub use registry::{Lifecycle, OrbRegistry};
pub use state::{Modulation, ModulationCell, OrbState};
pub use theme::{Color, OrbStyle};
