use crate::domain::value::{ContactSid, ListId};

/// One entry of a v2 batch response (`response[]`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedItem {
    /// Per-item HTTP-like code (`200`, `409`, ...).
    pub code: u16,
    pub status: Option<String>,
    /// `data.sid` of the created or referenced resource.
    pub sid: Option<String>,
    /// `data.list_id`, present in add-contacts-to-list responses.
    pub list_id: Option<String>,
    pub error_description: Option<String>,
}

impl CreatedItem {
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.code)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchMetadata {
    pub total: u64,
    pub success: u64,
    pub failed: u64,
}

/// Typed view of the v2 batch envelope returned by contacts and lists endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreatedItems {
    pub items: Vec<CreatedItem>,
    pub metadata: BatchMetadata,
}

impl CreatedItems {
    /// Append another batch, summing metadata counters.
    pub fn merge(&mut self, other: CreatedItems) {
        self.items.extend(other.items);
        self.metadata.total += other.metadata.total;
        self.metadata.success += other.metadata.success;
        self.metadata.failed += other.metadata.failed;
    }

    /// SIDs of the items that carry one, in response order.
    pub fn sids(&self) -> impl Iterator<Item = &str> {
        self.items.iter().filter_map(|item| item.sid.as_deref())
    }
}

/// Result of creating a list and filling it with freshly created contacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListWithContacts {
    pub list_id: ListId,
    pub contact_sids: Vec<ContactSid>,
    /// Merged responses of every add-contacts-to-list call.
    pub added: CreatedItems,
}
