pub mod editor;
pub mod notes;
pub mod ui;
