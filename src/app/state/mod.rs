use super::keymap::KeyMap;
use super::persistence::Preferences;
use crate::domain::document::{DocumentEngine, DocumentEvent, Subscription};
use crate::infrastructure::TextAreaDocument;
use crate::slash::SlashMenu;
use crate::theme::{PaletteType, Theme};
use ratatui::layout::Rect;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

pub mod error;
pub mod input;
pub mod prompt;

// Re-exports
pub use error::{ErrorSeverity, ErrorState};
pub use input::AppTextArea;
pub use prompt::{PromptKind, PromptState};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AppMode {
    Editing, // Typing into the note; the slash palette lives here
    Prompt,  // A path prompt owns the keyboard
    Help,    // Showing the help overlay
}

pub struct AppState<'a> {
    // --- Connectivity & Status ---
    pub should_quit: bool,
    pub quit_armed: bool, // First Ctrl+Q on a dirty note
    pub mode: AppMode,
    pub last_error: Option<ErrorState>,
    pub status_message: Option<String>, // "Saved notes.md"
    pub status_clear_time: Option<Instant>,
    pub active_tasks: Vec<String>,

    // --- Document (the "Source of Truth") ---
    pub document: TextAreaDocument<'a>,
    pub slash: SlashMenu,
    pub changes: Subscription,
    pub file_path: Option<PathBuf>,
    pub is_dirty: bool,
    pub revision: u64,                // Bumped on every content change
    pub saving_revision: Option<u64>, // Revision handed to the last save
    pub generation: u64,              // Bumped each time a note replaces the document

    // --- Input Handling ---
    pub prompt: Option<PromptState<'a>>,

    // --- Layout ---
    pub focus_mode: bool,
    pub palette_area: Option<Rect>, // Where the slash palette was last drawn
    pub palette_offset: usize,      // First candidate shown in the palette
    pub editor_scroll: (u16, u16),  // Top row and left column of the editor viewport

    // --- Animation ---
    pub frame_count: u64,
    pub spinner: String,

    // --- Config ---
    pub keymap: Arc<KeyMap>,
    pub palette_type: PaletteType,
    pub theme: Theme,
    pub recent_files: Vec<PathBuf>,
    pub recent_files_path: Option<PathBuf>, // None keeps the list in memory only
}

impl AppState<'_> {
    #[must_use]
    pub fn new(prefs: &Preferences) -> Self {
        let recent_files_path =
            super::persistence::config_dir().map(|d| d.join("recent_files.toml"));
        let mut state = Self {
            keymap: Arc::new(KeyMap::from_config(&prefs.keys)),
            focus_mode: prefs.focus_mode,
            recent_files: recent_files_path
                .as_deref()
                .map(super::persistence::load_recent_files_from)
                .unwrap_or_default(),
            recent_files_path,
            ..Default::default()
        };
        state.set_palette(prefs.theme);
        state
    }

    pub fn set_palette(&mut self, palette: PaletteType) {
        self.palette_type = palette;
        self.theme = Theme::from_palette_type(palette);
        self.document.apply_theme(&self.theme);
    }

    /// Swaps in a new document and rebinds every listener to it.
    pub fn load_document(&mut self, text: &str, path: Option<PathBuf>) {
        self.document = TextAreaDocument::from_text(text);
        self.document.apply_theme(&self.theme);
        self.slash.reattach(&self.document);
        self.changes = self.document.subscribe();
        self.file_path = path;
        self.is_dirty = false;
        self.quit_armed = false;
        self.saving_revision = None;
        self.generation = self.generation.wrapping_add(1);
        self.editor_scroll = (0, 0);
    }

    /// Drains queued document notifications: marks the note dirty and lets
    /// the palette recompute.
    pub fn sync_document(&mut self) {
        if self
            .changes
            .drain()
            .iter()
            .any(|e| *e == DocumentEvent::Changed)
        {
            self.is_dirty = true;
            self.quit_armed = false;
            self.revision = self.revision.wrapping_add(1);
        }
        self.slash.sync(&self.document);
    }

    #[must_use]
    pub fn file_name(&self) -> Option<String> {
        self.file_path
            .as_deref()
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().into_owned())
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
        self.status_clear_time = Some(Instant::now());
    }
}

impl Default for AppState<'_> {
    fn default() -> Self {
        let theme = Theme::default();
        let mut document = TextAreaDocument::default();
        document.apply_theme(&theme);
        let slash = SlashMenu::attach(&document);
        let changes = document.subscribe();
        Self {
            should_quit: false,
            quit_armed: false,
            mode: AppMode::Editing,
            last_error: None,
            status_message: None,
            status_clear_time: None,
            active_tasks: Vec::new(),
            document,
            slash,
            changes,
            file_path: None,
            is_dirty: false,
            revision: 0,
            saving_revision: None,
            generation: 0,
            prompt: None,
            focus_mode: false,
            palette_area: None,
            palette_offset: 0,
            editor_scroll: (0, 0),
            frame_count: 0,
            spinner: "⠋".to_string(),
            keymap: Arc::new(KeyMap::default()),
            palette_type: PaletteType::default(),
            theme,
            recent_files: Vec::new(),
            recent_files_path: None,
        }
    }
}
