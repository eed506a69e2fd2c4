use serde::{Deserialize, Serialize};

/// A collection endpoint response.
///
/// List endpoints answer with a bare array, or with a paginated envelope
/// once pagination is switched on server-side. Both decode to the same items.
/// Any other body is kept as [`Listing::Unrecognized`] and yields no items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Bare(Vec<T>),
    Paginated {
        results: Vec<T>,
        #[serde(default)]
        count: Option<u64>,
        #[serde(default)]
        next: Option<String>,
    },
    /// Must stay last: untagged variants are tried in order.
    Unrecognized(serde_json::Value),
}

impl<T> Listing<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            Listing::Bare(items) => items,
            Listing::Paginated { results, .. } => results,
            Listing::Unrecognized(_) => Vec::new(),
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Listing::Unrecognized(_))
    }
}

impl<T> From<Listing<T>> for Vec<T> {
    fn from(listing: Listing<T>) -> Self {
        listing.into_items()
    }
}
