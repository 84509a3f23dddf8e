//! Rendering module
//!
//! Read-only views of an `Engine`. Nothing here mutates simulation state.

pub mod text;

pub use text::{TextFrame, render_frame};
