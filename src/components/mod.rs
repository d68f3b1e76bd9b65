//! UI components.

pub mod orb;
