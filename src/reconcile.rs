use crate::models::ListingMap;

/// Outcome of comparing a scan against the persisted listings
#[derive(Debug, Default, PartialEq)]
pub struct Reconciliation {
    /// Scanned listings whose id was not persisted yet
    pub new: ListingMap,
    /// Persisted listings with every scanned listing written over them
    pub persisted: ListingMap,
}

impl Reconciliation {
    pub fn has_new(&self) -> bool {
        !self.new.is_empty()
    }
}

/// Split a scan into new listings and refresh the persisted copy.
///
/// Newness is decided by id alone. Previously seen ids still get their stored
/// record replaced by the latest scan.
pub fn reconcile(scanned: &ListingMap, mut persisted: ListingMap) -> Reconciliation {
    let mut new = ListingMap::new();

    for (id, listing) in scanned {
        if !persisted.contains_key(id) {
            new.insert(id.clone(), listing.clone());
        }
        persisted.insert(id.clone(), listing.clone());
    }

    Reconciliation { new, persisted }
}
