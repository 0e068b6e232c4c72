use crate::images::Thumbnail;

/// Which part of the screen receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    NameInput,
    UrlInput,
    List,
}

/// Per-entry presentation state for the remote image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSlot {
    Loading,
    Ready(Thumbnail),
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeRow {
    pub name: String,
    pub slot: ImageSlot,
}

/// Immutable render snapshot published by the engine loop after every
/// mutation. The TUI task clones it out of the watch channel and draws.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub name_draft: String,
    pub url_draft: String,
    pub can_submit: bool,
    pub focus: Focus,
    pub selected: usize,
    pub status: String,
    pub notice: Option<String>,
    pub rows: Vec<RecipeRow>,
    pub thumb_cols: u16,
    pub thumb_rows: u16,
}

impl AppState {
    pub fn any_loading(&self) -> bool {
        self.rows.iter().any(|r| r.slot == ImageSlot::Loading)
    }
}
