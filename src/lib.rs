//! Timeline ruler for a video editor: tick layout, playhead placement,
//! middle-button panning and scroll mirroring across timeline panels.

/// Application directory resolution.
pub mod app_dirs;
/// Persisted ruler settings.
pub mod config;
/// egui views and the controller they drive.
pub mod egui_app;
/// Tracing subscriber setup.
pub mod logging;
/// Seconds-to-timecode formatting.
pub mod timecode;
/// Headless ruler, scroll and playhead logic.
pub mod timeline;
