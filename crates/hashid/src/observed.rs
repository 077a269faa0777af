use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

/// Analysis ids this process has issued or accepted.
///
/// Grows only. Every operation takes the lock, so a membership check and the
/// insert that follows it can be made atomic with [`ObservedIds::insert_if_absent`].
#[derive(Debug, Default)]
pub struct ObservedIds {
    ids: Mutex<HashSet<String>>,
}

impl ObservedIds {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        // A panic elsewhere cannot leave a HashSet half-inserted.
        self.ids.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.lock().contains(id)
    }

    /// Returns true if the id was not already present.
    pub fn insert(&self, id: &str) -> bool {
        self.lock().insert(id.to_string())
    }

    pub fn insert_if_absent(&self, id: &str) -> bool {
        let mut ids = self.lock();
        if ids.contains(id) {
            return false;
        }
        ids.insert(id.to_string())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ObservedIds {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        ObservedIds {
            ids: Mutex::new(iter.into_iter().map(Into::into).collect()),
        }
    }
}
