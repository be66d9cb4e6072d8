pub mod clipboard;
pub mod terminal_modes;
pub mod time_source;
pub mod timers;
pub mod tracing_setup;
