//! Rendering of magnitudes for display.

pub mod bytes;
pub mod duration;
pub mod number;

pub use bytes::format_bytes;
pub use duration::{format_duration_approx, format_duration_exact};
pub use number::format_number;
