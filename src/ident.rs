//! Prefixed unique identifiers for board elements.
//!
//! Element ids are strings like `rect_1f0a9c...` so a saved document stays
//! readable and the element kind is obvious in exports and logs.

#[cfg(test)]
#[path = "ident_test.rs"]
mod ident_test;

use uuid::Uuid;

/// Mint a fresh element id with a kind prefix, e.g. `rect_<uuid>`.
#[must_use]
pub fn element_id(prefix: &str) -> String {
    format!("{prefix}_{}", Uuid::new_v4().simple())
}
