//! Animation engines: everything that moves.
//!
//! Each engine is tick-driven from the app loop and owns no timers of its
//! own; construction and teardown are explicit.

pub mod cursor;
pub mod easing;
pub mod reveal;
pub mod scroll;
pub mod stars;
pub mod typewriter;
