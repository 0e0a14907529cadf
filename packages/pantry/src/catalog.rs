//! Barcode → product lookup.
//!
//! A handful of known products stand in for a real product database. Any
//! other code still resolves, to a generic record named after its last four
//! characters.

/// What the pantry shows for a scanned code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupResult {
    pub title: String,
    pub brand: String,
}

pub const UNKNOWN_BRAND: &str = "Unknown Brand";

const KNOWN_PRODUCTS: &[(&str, &str, &str)] = &[
    ("012345678905", "Spaghetti Pasta", "Barilla"),
    ("04963406", "Tomato Sauce", "Hunt's"),
    ("036000291452", "All-Purpose Flour", "King Arthur"),
];

/// Look up `code`. Never fails.
pub fn resolve(code: &str) -> LookupResult {
    if let Some((_, title, brand)) = KNOWN_PRODUCTS.iter().find(|(known, _, _)| *known == code) {
        return LookupResult {
            title: (*title).to_string(),
            brand: (*brand).to_string(),
        };
    }

    let chars: Vec<char> = code.chars().collect();
    let last4: String = chars[chars.len().saturating_sub(4)..].iter().collect();
    LookupResult {
        title: format!("Item {last4}"),
        brand: UNKNOWN_BRAND.to_string(),
    }
}
