//! Read-only catalog port.

use crate::catalog::{BlogPost, Method, ScamEntry};

/// Static catalog boundary: three collections indexed by id. Lookup is
/// infallible at the transport level; a missing id is just `None`.
pub trait CatalogPort: Send + Sync {
    fn methods(&self) -> &[Method];
    fn scams(&self) -> &[ScamEntry];
    fn posts(&self) -> &[BlogPost];

    fn method_by_id(&self, id: &str) -> Option<&Method> {
        self.methods().iter().find(|m| m.id == id)
    }

    fn scam_by_id(&self, id: &str) -> Option<&ScamEntry> {
        self.scams().iter().find(|s| s.id == id)
    }

    fn post_by_id(&self, id: &str) -> Option<&BlogPost> {
        self.posts().iter().find(|p| p.id == id)
    }
}
