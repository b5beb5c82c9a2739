//! Comet engine crate.
//!
//! Smoothed, camera-facing ribbon trails ([`trail`]) driven by scripted
//! movers ([`motion`]), plus the platform and GPU runtime used to show them.

pub mod coords;
pub mod logging;
pub mod motion;
pub mod paint;
pub mod time;
pub mod trail;

pub mod core;
pub mod device;
pub mod input;
pub mod render;
pub mod window;
