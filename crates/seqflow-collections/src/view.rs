//! Keyed read access shared by the persistent collections.

use seqflow_core::error::{Error, Result};

/// Index-style lookup on a read-only view.
///
/// Writes through a view are always rejected; build a new value with the
/// collection's own `add`/`set`/`remove` operations instead.
pub trait IndexedView<K: ?Sized> {
    type Output;

    fn view_name(&self) -> &'static str;

    fn lookup(&self, key: &K) -> Result<Self::Output>;

    fn has_key(&self, key: &K) -> bool {
        self.lookup(key).is_ok()
    }

    fn assign(&self, _key: &K, _value: Self::Output) -> Result<()> {
        Err(Error::UnsupportedOperation(format!(
            "{} is immutable; index assignment is not allowed",
            self.view_name()
        )))
    }

    fn unassign(&self, _key: &K) -> Result<()> {
        Err(Error::UnsupportedOperation(format!(
            "{} is immutable; index removal is not allowed",
            self.view_name()
        )))
    }
}
