//! Contracts between the runtime loop and applications.
//!
//! Applications implement [`App`] and receive a [`FrameCtx`] each frame; they
//! never touch winit's event loop directly.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
