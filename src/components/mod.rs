pub mod footer;
pub mod header;
pub mod modals;
pub mod slash_palette;
