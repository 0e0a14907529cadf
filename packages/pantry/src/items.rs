//! Scanned pantry items, kept in memory for the lifetime of the page.

use crate::catalog::resolve;

/// One scanned (or manually entered) product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PantryItem {
    /// `"{barcode}-{unix millis}"`.
    pub id: String,
    pub barcode: String,
    pub title: String,
    pub brand: String,
}

impl PantryItem {
    fn matches(&self, needle: &str) -> bool {
        format!("{} {} {}", self.title, self.brand, self.barcode)
            .to_lowercase()
            .contains(needle)
    }
}

/// Newest-first list of scanned items. Holds at most one item per id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PantryList {
    items: Vec<PantryItem>,
}

impl PantryList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[PantryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Resolve `code` and put the result at the top of the list.
    pub fn add_item(&mut self, code: &str) -> PantryItem {
        self.add_item_at(code, now_millis())
    }

    fn add_item_at(&mut self, code: &str, millis: u64) -> PantryItem {
        let found = resolve(code);
        let item = PantryItem {
            id: format!("{code}-{millis}"),
            barcode: code.to_string(),
            title: found.title,
            brand: found.brand,
        };
        self.items.retain(|existing| existing.id != item.id);
        self.items.insert(0, item.clone());
        tracing::debug!(id = %item.id, title = %item.title, "pantry item added");
        item
    }

    /// Add a code typed by hand. Blank input is ignored.
    pub fn add_manual(&mut self, input: &str) -> Option<PantryItem> {
        let code = input.trim();
        if code.is_empty() {
            return None;
        }
        Some(self.add_item(code))
    }

    /// Drop the item with `id`, if present.
    pub fn remove_item(&mut self, id: &str) {
        self.items.retain(|item| item.id != id);
    }

    /// Items whose title, brand or barcode contain `query`, ignoring case.
    pub fn search(&self, query: &str) -> Vec<&PantryItem> {
        let needle = query.to_lowercase();
        self.items
            .iter()
            .filter(|item| item.matches(&needle))
            .collect()
    }
}

fn now_millis() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now() as u64
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}
