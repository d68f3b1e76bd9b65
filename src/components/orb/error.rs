//! Errors raised while setting up an orb on the page.
//!
//! None of these reach callers of the public API: the engine logs them and
//! degrades to a no-op.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum OrbError {
	/// No global `window` (not running in a browser).
	NoWindow,
	/// The window has no document.
	NoDocument,
	/// No element with the given id.
	ContainerMissing(String),
	/// `document.createElement("canvas")` failed.
	CanvasCreation(String),
	/// The canvas refused to hand out a 2D context.
	NoContext,
}

impl fmt::Display for OrbError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			OrbError::NoWindow => write!(f, "no window available"),
			OrbError::NoDocument => write!(f, "window has no document"),
			OrbError::ContainerMissing(id) => write!(f, "container #{} not found", id),
			OrbError::CanvasCreation(msg) => write!(f, "failed to create canvas: {}", msg),
			OrbError::NoContext => write!(f, "2d canvas context unavailable"),
		}
	}
}

impl std::error::Error for OrbError {}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn messages_name_the_failure() {
		assert_eq!(
			OrbError::ContainerMissing("nav-orb".into()).to_string(),
			"container #nav-orb not found"
		);
		assert_eq!(OrbError::NoContext.to_string(), "2d canvas context unavailable");
	}
}
