//! Headless timeline ruler core.
//! Scale math, tick layout, scroll mirroring, panning and playhead motion are
//! kept free of painting so the egui layer stays thin.

pub mod pan;
pub mod playhead;
pub mod relayout;
pub mod scale;
pub mod scroll_sync;
pub mod ticks;

pub use pan::{PanState, ScrollBounds};
pub use playhead::{Playhead, PlayheadCommands, PlayheadMotion};
pub use relayout::{DeferredRelayout, LayoutKey};
pub use scale::{MAX_RENDER_WIDTH, TimeScale};
pub use scroll_sync::{
    HostBridge, JsonHostBridge, RegionId, ScrollEvent, ScrollOutcome, ScrollSync,
    ScrollbarReport,
};
pub use ticks::{LabelWindow, Tick, TickLabel, TickLayout};
