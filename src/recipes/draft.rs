/// Which input buffer an edit applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Url,
}

/// The two not-yet-submitted input buffers. Pure field updates only; the
/// store remains the authoritative gate for duplicates and empties at
/// submit time.
#[derive(Debug, Default, Clone)]
pub struct DraftFields {
    name: String,
    url: String,
}

impl DraftFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn set_name(&mut self, value: impl Into<String>) {
        self.name = value.into();
    }

    pub fn set_url(&mut self, value: impl Into<String>) {
        self.url = value.into();
    }

    pub fn push_char(&mut self, field: Field, c: char) {
        self.buffer_mut(field).push(c);
    }

    pub fn backspace(&mut self, field: Field) {
        self.buffer_mut(field).pop();
    }

    /// Derived enable predicate for the submit control: non-blank name AND
    /// trimmed URL starting with `https://`. The scheme check exists only
    /// here, never in the store.
    pub fn can_submit(&self) -> bool {
        !self.name.trim().is_empty() && self.url.trim().starts_with("https://")
    }

    /// Clears both buffers after a successful add.
    pub fn reset(&mut self) {
        self.name.clear();
        self.url.clear();
    }

    fn buffer_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Url => &mut self.url,
        }
    }
}
