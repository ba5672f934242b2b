use crate::app::command::Command;
use crate::domain::models::{Format, ImageData};
use crate::slash::PaletteKey;
use crossterm::event::KeyEvent;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub enum UpdateResult {
    Handled(Option<Command>),
    NotHandled,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // --- System / Terminal ---
    Tick,
    Resize(u16, u16),
    Quit, // Ctrl+Q, asks twice when dirty

    // --- Editing ---
    EditorInput(KeyEvent), // Default editing for a key nothing else claimed
    Paste(String),         // Bracketed paste (text or an image path)
    ApplyFormat(Format),   // Direct shortcut, bypasses the palette

    // --- Slash Palette ---
    SlashKey(PaletteKey), // Up/Down/Enter/Escape while the palette is open
    SlashActivate(usize), // Pointer activation of a visible candidate

    // --- UI Mode Transitions ---
    ToggleFocusMode,
    ToggleHelp,
    CycleTheme,
    CancelMode,   // ESC outside the palette (close modal/prompt)
    DismissError, // Acknowledge the error modal

    // --- File Intents ---
    SaveIntent,                // Save, or ask for a path first
    SaveAsIntent,              // Always ask for a path
    OpenIntent,                // Ask for a path to open
    InsertImageIntent,         // Ask for an image path
    PromptInput(KeyEvent),     // Edit the prompt line
    PromptSubmit,              // Enter in the prompt

    // --- Async Results ---
    NoteLoaded(PathBuf, String),
    NoteSaved(PathBuf, u64), // Path, document generation that was saved
    ImageLoaded(ImageData),
    OperationStarted(String),
    OperationCompleted(String, Result<String, String>), // Task label, outcome
    ErrorOccurred(String),
}
