use std::collections::HashMap;

use crate::images::ImageEvent;
use crate::recipes::{DraftFields, Field, RecipeStore};
use crate::tui::state::{AppState, Focus, ImageSlot, RecipeRow};
use crate::tui::Command;

/// Follow-up work the engine loop must perform after a transition. The
/// session itself never spawns or aborts tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reaction {
    None,
    Quit,
    StartLoad { key: String, url: String },
    CancelLoad { key: String },
}

/// The screen's entire mutable state: store, drafts, focus, selection,
/// status, notice, and per-entry image slots. Every user intent is one
/// synchronous `apply`; every image outcome is one `on_image_event`.
#[derive(Debug)]
pub struct Session {
    store: RecipeStore,
    drafts: DraftFields,
    focus: Focus,
    selected: usize,
    status: String,
    notice: Option<String>,
    slots: HashMap<String, ImageSlot>,
    thumb_cols: u16,
    thumb_rows: u16,
}

impl Session {
    pub fn new(thumb_cols: u16, thumb_rows: u16) -> Self {
        Self {
            store: RecipeStore::new(),
            drafts: DraftFields::new(),
            focus: Focus::NameInput,
            selected: 0,
            status: String::new(),
            notice: None,
            slots: HashMap::new(),
            thumb_cols,
            thumb_rows,
        }
    }

    pub fn apply(&mut self, command: Command) -> Reaction {
        match command {
            Command::SetFocus(focus) => {
                if focus != Focus::List || !self.store.is_empty() {
                    self.focus = focus;
                }
                Reaction::None
            }
            Command::FocusNext => {
                self.cycle_focus(true);
                Reaction::None
            }
            Command::FocusPrev => {
                self.cycle_focus(false);
                Reaction::None
            }
            Command::Type(c) => {
                if !c.is_control() {
                    if let Some(field) = self.focused_field() {
                        self.drafts.push_char(field, c);
                    }
                }
                Reaction::None
            }
            Command::Backspace => {
                if let Some(field) = self.focused_field() {
                    self.drafts.backspace(field);
                }
                Reaction::None
            }
            Command::Submit => self.submit(),
            Command::SelectUp => {
                if self.focus == Focus::List {
                    self.selected = self.selected.saturating_sub(1);
                }
                Reaction::None
            }
            Command::SelectDown => {
                if self.focus == Focus::List && !self.store.is_empty() {
                    self.selected = (self.selected + 1).min(self.store.len() - 1);
                }
                Reaction::None
            }
            Command::RemoveSelected => {
                if self.focus == Focus::List {
                    self.remove_index(self.selected)
                } else {
                    Reaction::None
                }
            }
            Command::RemoveAt(index) => self.remove_index(index),
            Command::Quit => Reaction::Quit,
        }
    }

    /// Resolve one entry's image slot. Events for entries removed while the
    /// load was in flight are dropped. Returns true when the transient
    /// notice was (re)armed.
    pub fn on_image_event(&mut self, event: ImageEvent) -> bool {
        match event {
            ImageEvent::Loaded { key, thumbnail } => {
                if let Some(slot) = self.slots.get_mut(&key) {
                    *slot = ImageSlot::Ready(thumbnail);
                }
                false
            }
            ImageEvent::Failed { key, message } => match self.slots.get_mut(&key) {
                Some(slot) => {
                    *slot = ImageSlot::Failed;
                    self.notice = Some(format!("No se pudo cargar la imagen: {}", message));
                    true
                }
                None => false,
            },
        }
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    pub fn snapshot(&self) -> AppState {
        AppState {
            name_draft: self.drafts.name().to_string(),
            url_draft: self.drafts.url().to_string(),
            can_submit: self.drafts.can_submit(),
            focus: self.focus,
            selected: self.selected,
            status: self.status.clone(),
            notice: self.notice.clone(),
            rows: self
                .store
                .iter()
                .map(|recipe| RecipeRow {
                    name: recipe.name.clone(),
                    slot: self
                        .slots
                        .get(&recipe.key())
                        .cloned()
                        .unwrap_or(ImageSlot::Loading),
                })
                .collect(),
            thumb_cols: self.thumb_cols,
            thumb_rows: self.thumb_rows,
        }
    }

    fn focused_field(&self) -> Option<Field> {
        match self.focus {
            Focus::NameInput => Some(Field::Name),
            Focus::UrlInput => Some(Field::Url),
            Focus::List => None,
        }
    }

    fn cycle_focus(&mut self, forward: bool) {
        let has_rows = !self.store.is_empty();
        self.focus = match (self.focus, forward) {
            (Focus::NameInput, true) => Focus::UrlInput,
            (Focus::UrlInput, true) if has_rows => Focus::List,
            (Focus::UrlInput, true) => Focus::NameInput,
            (Focus::List, true) => Focus::NameInput,
            (Focus::NameInput, false) if has_rows => Focus::List,
            (Focus::NameInput, false) => Focus::UrlInput,
            (Focus::UrlInput, false) => Focus::NameInput,
            (Focus::List, false) => Focus::UrlInput,
        };
    }

    /// Submit is gated by the form's enable predicate (which owns the
    /// https check); the store then applies its own empty/duplicate rules.
    fn submit(&mut self) -> Reaction {
        if !self.drafts.can_submit() {
            return Reaction::None;
        }
        match self.store.add(self.drafts.name(), self.drafts.url()) {
            Ok(recipe) => {
                let key = recipe.key();
                self.drafts.reset();
                self.status = "Receta agregada.".to_string();
                self.slots.insert(key.clone(), ImageSlot::Loading);
                Reaction::StartLoad {
                    key,
                    url: recipe.image_url,
                }
            }
            Err(error) => {
                self.status = error.to_string();
                Reaction::None
            }
        }
    }

    fn remove_index(&mut self, index: usize) -> Reaction {
        let Some(recipe) = self.store.remove_at(index) else {
            return Reaction::None;
        };
        let key = recipe.key();
        self.slots.remove(&key);
        self.status = format!("Eliminada: {}", recipe.name);
        if self.selected >= self.store.len() {
            self.selected = self.store.len().saturating_sub(1);
        }
        if self.store.is_empty() && self.focus == Focus::List {
            self.focus = Focus::NameInput;
        }
        Reaction::CancelLoad { key }
    }
}
