//! The state template shared by every domain.

use std::sync::Arc;

use grocer_commerce::Entity;

/// Which operation class a loading flag belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Fetch of the whole collection.
    Collection,
    /// Fetch of a single record.
    Selected,
    /// Add, update or delete.
    Mutation,
}

/// Cached records of one kind plus the flags describing requests in flight.
///
/// Transitions never edit a state in place. Each helper below returns the
/// next state; records that did not change keep their `Arc`.
#[derive(Debug, PartialEq)]
pub struct ResourceState<E> {
    /// Cached list, in server order (newest first for added records).
    pub collection: Vec<Arc<E>>,
    /// Currently focused record.
    pub selected: Option<Arc<E>>,
    pub collection_loading: bool,
    pub selected_loading: bool,
    pub mutation_loading: bool,
    /// Last failure message; cleared by the next start of any operation.
    pub error: Option<String>,
}

impl<E> Default for ResourceState<E> {
    fn default() -> Self {
        Self {
            collection: Vec::new(),
            selected: None,
            collection_loading: false,
            selected_loading: false,
            mutation_loading: false,
            error: None,
        }
    }
}

impl<E> Clone for ResourceState<E> {
    fn clone(&self) -> Self {
        Self {
            collection: self.collection.clone(),
            selected: self.selected.clone(),
            collection_loading: self.collection_loading,
            selected_loading: self.selected_loading,
            mutation_loading: self.mutation_loading,
            error: self.error.clone(),
        }
    }
}

impl<E: Entity> ResourceState<E> {
    /// Check if any request is in flight.
    pub fn is_loading(&self) -> bool {
        self.collection_loading || self.selected_loading || self.mutation_loading
    }

    /// Loading flag of one operation class.
    pub fn loading(&self, slot: Slot) -> bool {
        match slot {
            Slot::Collection => self.collection_loading,
            Slot::Selected => self.selected_loading,
            Slot::Mutation => self.mutation_loading,
        }
    }

    /// Find a cached record by id.
    pub fn find(&self, id: &E::Id) -> Option<&Arc<E>> {
        self.collection.iter().find(|record| record.id() == id)
    }

    /// A request of class `slot` started. Data is kept.
    pub fn started(&self, slot: Slot) -> Self {
        let mut next = self.clone();
        next.set_loading(slot, true);
        next.error = None;
        next
    }

    /// The collection arrived; it replaces the cached one.
    pub fn collection_loaded(&self, records: &[Arc<E>]) -> Self {
        Self {
            collection: records.to_vec(),
            collection_loading: false,
            error: None,
            ..self.clone()
        }
    }

    pub fn collection_failed(&self, message: &str) -> Self {
        Self {
            collection: Vec::new(),
            collection_loading: false,
            error: Some(message.to_string()),
            ..self.clone()
        }
    }

    pub fn item_loaded(&self, record: &Arc<E>) -> Self {
        Self {
            selected: Some(Arc::clone(record)),
            selected_loading: false,
            error: None,
            ..self.clone()
        }
    }

    pub fn item_failed(&self, message: &str) -> Self {
        Self {
            selected: None,
            selected_loading: false,
            error: Some(message.to_string()),
            ..self.clone()
        }
    }

    /// A created record goes to the front of the collection.
    pub fn added(&self, record: &Arc<E>) -> Self {
        let collection = std::iter::once(Arc::clone(record))
            .chain(self.collection.iter().cloned())
            .collect();
        Self {
            collection,
            mutation_loading: false,
            error: None,
            ..self.clone()
        }
    }

    /// Replace the entry with the record's id and focus the record.
    ///
    /// An id that is not cached leaves the collection as it was.
    pub fn updated(&self, record: &Arc<E>) -> Self {
        let collection = self
            .collection
            .iter()
            .map(|entry| {
                if entry.id() == record.id() {
                    Arc::clone(record)
                } else {
                    Arc::clone(entry)
                }
            })
            .collect();
        Self {
            collection,
            selected: Some(Arc::clone(record)),
            mutation_loading: false,
            error: None,
            ..self.clone()
        }
    }

    /// Drop the deleted record.
    ///
    /// Without an explicit `target` the focused record is the one removed.
    /// With neither, the collection is unchanged.
    pub fn deleted(&self, target: Option<&E::Id>) -> Self {
        let target = target.or_else(|| self.selected.as_ref().map(|record| record.id()));
        let collection = match target {
            Some(id) => self
                .collection
                .iter()
                .filter(|entry| entry.id() != id)
                .cloned()
                .collect(),
            None => self.collection.clone(),
        };
        let selected = match (&self.selected, target) {
            (Some(focused), Some(id)) if focused.id() == id => None,
            (focused, _) => focused.clone(),
        };
        Self {
            collection,
            selected,
            mutation_loading: false,
            error: None,
            ..self.clone()
        }
    }

    /// Add, update or delete failed. Data is kept.
    pub fn mutation_failed(&self, message: &str) -> Self {
        Self {
            mutation_loading: false,
            error: Some(message.to_string()),
            ..self.clone()
        }
    }

    /// Focus a cached record, or clear the focus.
    ///
    /// An id that is not cached clears the focus.
    pub fn focused(&self, id: Option<&E::Id>) -> Self {
        Self {
            selected: id.and_then(|id| self.find(id)).cloned(),
            ..self.clone()
        }
    }

    fn set_loading(&mut self, slot: Slot, value: bool) {
        match slot {
            Slot::Collection => self.collection_loading = value,
            Slot::Selected => self.selected_loading = value,
            Slot::Mutation => self.mutation_loading = value,
        }
    }
}
