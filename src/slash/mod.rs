//! Slash-command palette: trigger detection, filtering and the palette state
//! machine that turns `/h2` + Enter into an edit.

pub mod catalog;
pub mod menu;
pub mod trigger;

pub use catalog::{catalog, filter_commands, Effect, SlashCommand};
pub use menu::{KeyDisposition, PaletteKey, PaletteState, SlashMenu, SlashOutcome};
pub use trigger::{detect_in, detect_trigger, TriggerMatch, TRIGGER_WINDOW};
