use super::catalog::{catalog, filter_commands, EffectOutcome, SlashCommand};
use super::trigger::detect_in;
use crate::domain::document::{DocumentEngine, Subscription};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PaletteState {
    #[default]
    Closed,
    /// `candidates` holds catalog indices and is never empty.
    Open {
        candidates: Vec<usize>,
        selected: usize,
    },
}

impl PaletteState {
    #[must_use]
    pub fn for_query(query: &str, catalog: &[SlashCommand]) -> Self {
        let candidates = filter_commands(query, catalog);
        if candidates.is_empty() {
            Self::Closed
        } else {
            Self::Open {
                candidates,
                selected: 0,
            }
        }
    }

    #[must_use]
    pub fn for_document(doc: &dyn DocumentEngine, catalog: &[SlashCommand]) -> Self {
        match detect_in(doc) {
            Some(trigger) => Self::for_query(&trigger.query, catalog),
            None => Self::Closed,
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }

    #[must_use]
    pub fn candidates(&self) -> &[usize] {
        match self {
            Self::Open { candidates, .. } => candidates,
            Self::Closed => &[],
        }
    }

    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        match self {
            Self::Open { selected, .. } => Some(*selected),
            Self::Closed => None,
        }
    }

    /// Catalog index of the highlighted candidate.
    #[must_use]
    pub fn selected_command(&self) -> Option<usize> {
        match self {
            Self::Open {
                candidates,
                selected,
            } => candidates.get(*selected).copied(),
            Self::Closed => None,
        }
    }

    fn select_next(&mut self) {
        if let Self::Open {
            candidates,
            selected,
        } = self
        {
            *selected = (*selected + 1) % candidates.len();
        }
    }

    fn select_prev(&mut self) {
        if let Self::Open {
            candidates,
            selected,
        } = self
        {
            let len = candidates.len();
            *selected = (*selected + len - 1) % len;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteKey {
    Up,
    Down,
    Enter,
    Escape,
}

impl PaletteKey {
    #[must_use]
    pub fn from_key_event(key: &KeyEvent) -> Option<Self> {
        if key.modifiers != KeyModifiers::NONE {
            return None;
        }
        match key.code {
            KeyCode::Up => Some(Self::Up),
            KeyCode::Down => Some(Self::Down),
            KeyCode::Enter => Some(Self::Enter),
            KeyCode::Esc => Some(Self::Escape),
            _ => None,
        }
    }

    /// The plain key this palette key came from, for pass-through editing.
    #[must_use]
    pub fn key_event(self) -> KeyEvent {
        let code = match self {
            Self::Up => KeyCode::Up,
            Self::Down => KeyCode::Down,
            Self::Enter => KeyCode::Enter,
            Self::Escape => KeyCode::Esc,
        };
        KeyEvent::new(code, KeyModifiers::NONE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlashOutcome {
    Applied(&'static str),
    /// The trigger span was removed; the host must ask for an image path.
    PickImage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDisposition {
    PassThrough,
    Consumed,
    Executed(SlashOutcome),
}

/// Slash-command palette bound to one document engine.
pub struct SlashMenu {
    catalog: &'static [SlashCommand],
    state: PaletteState,
    subscription: Option<Subscription>,
}

impl SlashMenu {
    pub fn attach(doc: &dyn DocumentEngine) -> Self {
        Self::with_catalog(doc, catalog())
    }

    pub fn with_catalog(doc: &dyn DocumentEngine, catalog: &'static [SlashCommand]) -> Self {
        Self {
            catalog,
            state: PaletteState::Closed,
            subscription: Some(doc.subscribe()),
        }
    }

    /// Moves the menu to another engine. The old registration is released.
    pub fn reattach(&mut self, doc: &dyn DocumentEngine) {
        self.subscription = Some(doc.subscribe());
        self.state = PaletteState::Closed;
    }

    pub fn detach(&mut self) {
        self.subscription = None;
        self.state = PaletteState::Closed;
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    /// Processes queued change notifications. Returns whether the palette
    /// was recomputed.
    pub fn sync(&mut self, doc: &dyn DocumentEngine) -> bool {
        let Some(subscription) = &mut self.subscription else {
            return false;
        };
        if subscription.drain().is_empty() {
            return false;
        }
        self.refresh(doc);
        true
    }

    pub fn refresh(&mut self, doc: &dyn DocumentEngine) {
        self.state = PaletteState::for_document(doc, self.catalog);
    }

    pub fn handle_key(&mut self, key: PaletteKey, doc: &mut dyn DocumentEngine) -> KeyDisposition {
        if !self.state.is_open() {
            return KeyDisposition::PassThrough;
        }
        match key {
            PaletteKey::Down => {
                self.state.select_next();
                KeyDisposition::Consumed
            }
            PaletteKey::Up => {
                self.state.select_prev();
                KeyDisposition::Consumed
            }
            PaletteKey::Escape => {
                self.state = PaletteState::Closed;
                KeyDisposition::Consumed
            }
            PaletteKey::Enter => match self.state.selected_command() {
                Some(command) => KeyDisposition::Executed(self.execute(command, doc)),
                None => KeyDisposition::Consumed,
            },
        }
    }

    /// Pointer activation of the `index`-th visible candidate.
    pub fn activate(&mut self, index: usize, doc: &mut dyn DocumentEngine) -> Option<SlashOutcome> {
        let command = *self.state.candidates().get(index)?;
        Some(self.execute(command, doc))
    }

    fn execute(&mut self, command_index: usize, doc: &mut dyn DocumentEngine) -> SlashOutcome {
        let command = self.catalog[command_index];

        // The caret may have moved since the palette was computed.
        if let Some(trigger) = detect_in(&*doc) {
            doc.delete_range(trigger.start, trigger.end());
        }
        let outcome = match command.effect.apply(doc) {
            EffectOutcome::Applied => SlashOutcome::Applied(command.trigger),
            EffectOutcome::NeedsImage => SlashOutcome::PickImage,
        };

        self.state = PaletteState::Closed;
        // Our own edits must not reopen the palette.
        if let Some(subscription) = &mut self.subscription {
            subscription.drain();
        }
        tracing::debug!(trigger = command.trigger, ?outcome, "slash command executed");
        outcome
    }

    #[must_use]
    pub fn state(&self) -> &PaletteState {
        &self.state
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// Visible candidates with their highlight flag, in display order.
    pub fn visible(&self) -> impl Iterator<Item = (&'static SlashCommand, bool)> + '_ {
        let selected = self.state.selected();
        let catalog = self.catalog;
        self.state
            .candidates()
            .iter()
            .enumerate()
            .map(move |(i, &idx)| (&catalog[idx], Some(i) == selected))
    }
}

impl std::fmt::Debug for SlashMenu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlashMenu")
            .field("state", &self.state)
            .field("attached", &self.is_attached())
            .finish()
    }
}
