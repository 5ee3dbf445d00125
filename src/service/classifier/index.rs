//! Audit index: which category (and group) owns each referenced audit.

use std::collections::HashMap;

use crate::domain::models::{AuditIndexEntry, RawCategory};

/// Audit id → owning category, in first-seen order.
///
/// An audit referenced by several categories belongs to the last one that
/// references it but keeps the position where it was first seen.
#[derive(Debug, Clone, Default)]
pub struct AuditIndex {
    entries: Vec<AuditIndexEntry>,
    positions: HashMap<String, usize>,
}

impl AuditIndex {
    pub fn build(categories: &[RawCategory]) -> Self {
        let mut index = Self::default();
        for category in categories {
            for audit_ref in &category.audit_refs {
                index.record(AuditIndexEntry {
                    audit_id: audit_ref.id.clone(),
                    category_key: category.key.clone(),
                    group_key: audit_ref.group.clone(),
                });
            }
        }
        index
    }

    fn record(&mut self, entry: AuditIndexEntry) {
        match self.positions.get(&entry.audit_id) {
            Some(&pos) => self.entries[pos] = entry,
            None => {
                self.positions.insert(entry.audit_id.clone(), self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &AuditIndexEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
