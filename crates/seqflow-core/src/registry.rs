//! Process-wide registry of named extension operations.
//!
//! Extensions are attached per public type (identified by a `TypeTag`) under a
//! name. Each one is a typed callable `Fn(&Self, A) -> R`; a call made with a
//! different argument or return type than the one registered is rejected at
//! dispatch time. Built-in operations never go through here.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TypeTag {
    Sequence,
    Collection,
    Set,
    Dictionary,
    GroupedCollection,
    Grouping,
}

impl TypeTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeTag::Sequence => "sequence",
            TypeTag::Collection => "collection",
            TypeTag::Set => "set",
            TypeTag::Dictionary => "dictionary",
            TypeTag::GroupedCollection => "grouped_collection",
            TypeTag::Grouping => "grouping",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type Entry = Arc<dyn Any + Send + Sync>;
type Body<S, A, R> = Box<dyn Fn(&S, A) -> R + Send + Sync>;

static REGISTRY: Lazy<RwLock<HashMap<(TypeTag, String), Entry>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

fn read() -> RwLockReadGuard<'static, HashMap<(TypeTag, String), Entry>> {
    REGISTRY.read().unwrap_or_else(PoisonError::into_inner)
}

fn write() -> RwLockWriteGuard<'static, HashMap<(TypeTag, String), Entry>> {
    REGISTRY.write().unwrap_or_else(PoisonError::into_inner)
}

/// A public type that accepts named extension operations.
///
/// ```ignore
/// Sequence::<i64>::extend("sum_plus", |s: &Sequence<i64>, k: i64| s.fold(k, |a, x| a + x));
/// let total: i64 = seq.invoke("sum_plus", 10_i64)?;
/// ```
pub trait Extensible: Sized + 'static {
    const TAG: TypeTag;

    /// Attach `body` under `name`, replacing any previous extension of that name.
    fn extend<A, R, F>(name: &str, body: F)
    where
        A: 'static,
        R: 'static,
        F: Fn(&Self, A) -> R + Send + Sync + 'static,
    {
        let body: Body<Self, A, R> = Box::new(body);
        let entry: Entry = Arc::new(body);
        write().insert((Self::TAG, name.to_string()), entry);
    }

    /// Detach `name`. Returns whether it was registered.
    fn unextend(name: &str) -> bool {
        write().remove(&(Self::TAG, name.to_string())).is_some()
    }

    fn is_extended(name: &str) -> bool {
        read().contains_key(&(Self::TAG, name.to_string()))
    }

    /// Dispatch `name` on `self` with `arg`.
    fn invoke<A, R>(&self, name: &str, arg: A) -> Result<R>
    where
        A: 'static,
        R: 'static,
    {
        // Clone the entry out so the lock is released before the body runs.
        let entry = read()
            .get(&(Self::TAG, name.to_string()))
            .cloned()
            .ok_or_else(|| Error::UnknownExtension {
                tag: Self::TAG,
                name: name.to_string(),
            })?;
        let body = entry.downcast_ref::<Body<Self, A, R>>().ok_or_else(|| {
            Error::invalid(format!(
                "extension `{name}` on {} called with a mismatched signature",
                Self::TAG
            ))
        })?;
        Ok(body(self, arg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Gadget(i32);

    impl Extensible for Gadget {
        const TAG: TypeTag = TypeTag::Collection;
    }

    #[test]
    fn test_extend_invoke_unextend() {
        Gadget::extend("registry_unit_add", |p: &Gadget, k: i32| p.0 + k);
        assert!(Gadget::is_extended("registry_unit_add"));
        assert_eq!(Gadget(2).invoke::<i32, i32>("registry_unit_add", 3), Ok(5));

        let mismatch = Gadget(2).invoke::<&'static str, i32>("registry_unit_add", "x");
        assert!(matches!(mismatch, Err(Error::InvalidArgument(_))));

        assert!(Gadget::unextend("registry_unit_add"));
        assert!(!Gadget::unextend("registry_unit_add"));
        assert_eq!(
            Gadget(2).invoke::<i32, i32>("registry_unit_add", 3),
            Err(Error::UnknownExtension {
                tag: TypeTag::Collection,
                name: "registry_unit_add".into()
            })
        );
    }
}
