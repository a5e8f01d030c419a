/// Theme colors as they appear in configuration files.
pub mod color;
/// Engine configuration and theme.
pub mod config;
/// Decorative element state.
pub mod element;
