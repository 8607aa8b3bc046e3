//! Dashboard listing: search, delete, and summary stats over the in-memory list.

use serde::Serialize;

use crate::state::{Assistant, AssistantStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total: usize,
    pub published: usize,
    pub total_views: u64,
}

/// Ordered list of assistants, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssistantList {
    items: Vec<Assistant>,
}

impl AssistantList {
    #[must_use]
    pub fn new(items: Vec<Assistant>) -> Self {
        Self { items }
    }

    #[cfg(test)]
    #[must_use]
    pub fn all(&self) -> &[Assistant] {
        &self.items
    }

    #[cfg(test)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[cfg(test)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Case-insensitive substring match on name or description.
    /// A blank query matches everything.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Assistant> {
        if query.trim().is_empty() {
            return self.items.iter().collect();
        }
        let needle = query.to_lowercase();
        self.items
            .iter()
            .filter(|a| matches_query(a, &needle))
            .collect()
    }

    /// Remove the entry with `id`. Returns whether anything was removed;
    /// removing a missing id is a no-op.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|a| a.id != id);
        before != self.items.len()
    }

    pub fn append(&mut self, assistant: Assistant) {
        self.items.push(assistant);
    }

    #[must_use]
    pub fn stats(&self) -> DashboardStats {
        DashboardStats {
            total: self.items.len(),
            published: self
                .items
                .iter()
                .filter(|a| a.status == AssistantStatus::Published)
                .count(),
            total_views: self.items.iter().map(|a| a.views).sum(),
        }
    }
}

/// `needle` must already be lowercased.
fn matches_query(assistant: &Assistant, needle: &str) -> bool {
    assistant.name.to_lowercase().contains(needle)
        || assistant.description.to_lowercase().contains(needle)
}

#[cfg(test)]
#[path = "listing_test.rs"]
mod tests;
