//! Frame composition and theming.

pub mod theme;

mod frame;

pub use frame::render;
