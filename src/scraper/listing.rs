//! Wire shape of one listing page.
//!
//! Only the envelope is typed; items are mapped into records by the caller.

use serde::Deserialize;
use serde_json::Value;

/// Top-level listing envelope: `{"kind": "Listing", "data": {...}}`
#[derive(Debug, Default, Deserialize)]
pub struct Listing {
    /// Page payload, absent on some error bodies
    #[serde(default)]
    pub data: Option<ListingData>,
}

/// Page payload
///
/// Children stay as raw JSON so a single malformed item can be skipped without
/// rejecting the whole page.
#[derive(Debug, Default, Deserialize)]
pub struct ListingData {
    /// Raw items on this page
    #[serde(default)]
    pub children: Option<Vec<Value>>,
    /// Cursor for the next page
    #[serde(default)]
    pub after: Option<String>,
}

impl Listing {
    /// Items on this page; empty when `data` or `children` is missing or null
    pub fn children(&self) -> &[Value] {
        self.data
            .as_ref()
            .and_then(|d| d.children.as_deref())
            .unwrap_or(&[])
    }

    /// Cursor for the next page, if the API reported a non-empty one
    pub fn next_cursor(&self) -> Option<&str> {
        self.data
            .as_ref()
            .and_then(|d| d.after.as_deref())
            .filter(|after| !after.is_empty())
    }
}
