//! Browser rendering
//!
//! Plain Canvas 2D; effects that outlive a frame (explosions, messages) are
//! CSS animations driven by the presenter in `main.rs`.

pub mod canvas;

pub use canvas::CanvasRenderer;
