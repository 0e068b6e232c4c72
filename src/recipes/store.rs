use thiserror::Error;

/// One user-added recipe: display name plus the remote image URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub name: String,
    pub image_url: String,
}

impl Recipe {
    /// Identity key within the store. Names are unique case-insensitively,
    /// so the lowercase name doubles as the list/render key.
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AddError {
    #[error("Completa nombre y URL.")]
    EmptyField,
    #[error("Esa receta ya existe.")]
    DuplicateName,
}

/// Ordered collection of recipes. Insertion order of successful adds is
/// iteration order; removals of other entries never reorder.
#[derive(Debug, Default)]
pub struct RecipeStore {
    recipes: Vec<Recipe>,
}

impl RecipeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trims both inputs and appends a new recipe. Empty fields are rejected
    /// before the duplicate check; the URL scheme is deliberately NOT
    /// validated here (the form's enable predicate owns that check).
    pub fn add(&mut self, name: &str, url: &str) -> Result<Recipe, AddError> {
        let name = name.trim();
        let url = url.trim();
        if name.is_empty() || url.is_empty() {
            return Err(AddError::EmptyField);
        }
        if self.contains(name) {
            return Err(AddError::DuplicateName);
        }
        let recipe = Recipe {
            name: name.to_string(),
            image_url: url.to_string(),
        };
        self.recipes.push(recipe.clone());
        Ok(recipe)
    }

    /// Removes the first entry whose name matches case-insensitively.
    /// No-op when absent.
    pub fn remove(&mut self, recipe: &Recipe) {
        let key = recipe.key();
        if let Some(index) = self.recipes.iter().position(|r| r.key() == key) {
            self.recipes.remove(index);
        }
    }

    /// Removes by position, returning the removed recipe. `None` when out of
    /// range.
    pub fn remove_at(&mut self, index: usize) -> Option<Recipe> {
        if index < self.recipes.len() {
            Some(self.recipes.remove(index))
        } else {
            None
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        let key = name.trim().to_lowercase();
        self.recipes.iter().any(|r| r.key() == key)
    }

    pub fn get(&self, index: usize) -> Option<&Recipe> {
        self.recipes.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.iter()
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_retrieve() {
        let mut store = RecipeStore::new();
        let recipe = store.add("Tea", "https://img/tea.png").unwrap();
        assert_eq!(recipe.name, "Tea");
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(0).unwrap().image_url, "https://img/tea.png");
    }

    #[test]
    fn test_add_trims_whitespace() {
        let mut store = RecipeStore::new();
        let recipe = store.add(" Kale Salad ", " https://img/kale.png ").unwrap();
        assert_eq!(recipe.name, "Kale Salad");
        assert_eq!(recipe.image_url, "https://img/kale.png");
    }

    #[test]
    fn test_add_rejects_empty_fields() {
        let mut store = RecipeStore::new();
        assert_eq!(store.add("", "https://x"), Err(AddError::EmptyField));
        assert_eq!(store.add("x", ""), Err(AddError::EmptyField));
        assert_eq!(store.add("   ", "https://x"), Err(AddError::EmptyField));
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_rejects_duplicate_case_insensitive() {
        let mut store = RecipeStore::new();
        store.add("Tea", "https://t").unwrap();
        assert_eq!(store.add("tea", "https://u"), Err(AddError::DuplicateName));
        assert_eq!(store.add("TEA", "https://v"), Err(AddError::DuplicateName));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(0).unwrap().image_url, "https://t");
    }

    #[test]
    fn test_add_accepts_non_https_url() {
        // The store never checks the scheme; that gate lives in the form.
        let mut store = RecipeStore::new();
        assert!(store.add("Soup", "http://plain").is_ok());
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut store = RecipeStore::new();
        store.add("Tea", "https://t").unwrap();
        let ghost = Recipe {
            name: "Coffee".to_string(),
            image_url: "https://c".to_string(),
        };
        store.remove(&ghost);
        assert_eq!(store.len(), 1);
        assert_eq!(store.remove_at(5), None);
    }

    #[test]
    fn test_remove_preserves_order_of_others() {
        let mut store = RecipeStore::new();
        store.add("A", "https://a").unwrap();
        store.add("B", "https://b").unwrap();
        store.add("C", "https://c").unwrap();

        let removed = store.remove_at(1).unwrap();
        assert_eq!(removed.name, "B");

        let names: Vec<&str> = store.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["A", "C"]);
    }

    #[test]
    fn test_remove_by_entry_matches_name() {
        let mut store = RecipeStore::new();
        let tea = store.add("Tea", "https://t").unwrap();
        store.remove(&tea);
        assert!(store.is_empty());
    }

    #[test]
    fn test_no_sequence_of_adds_creates_duplicates() {
        let mut store = RecipeStore::new();
        for name in ["Tea", "tea", "TeA", "Soup", "soup", "Tea "] {
            let _ = store.add(name, "https://x");
        }
        let mut keys: Vec<String> = store.iter().map(|r| r.key()).collect();
        let total = keys.len();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), total);
        assert_eq!(total, 2);
    }
}
