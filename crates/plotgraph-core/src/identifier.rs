//! Interned identifiers for story nodes.
//!
//! Node identifiers are read from attribute values and compared over and over
//! during edge inference, so they are stored in a global string interner and
//! handed around as the small [`Id`] handle.

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock, PoisonError},
};

use serde::{Serialize, Serializer};
use string_interner::{DefaultStringInterner, DefaultSymbol};

static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

/// Locks the global interner.
///
/// The interner is only ever appended to, so a poisoned lock still holds a
/// usable table.
fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Interned node identifier.
///
/// Two `Id`s are equal exactly when the strings they were created from are
/// equal. Identifiers that never name a registered node (dangling edge
/// targets) are ordinary `Id`s as well.
///
/// # Examples
///
/// ```
/// use plotgraph_core::identifier::Id;
///
/// let intro = Id::new("intro");
/// assert_eq!(intro, "intro");
/// assert_eq!(Id::synthetic("chapter", 2), "chapter_2");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Interns `name` and returns its handle.
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }

    /// Creates the identifier of a synthesized node: `<tag>_<index>`.
    ///
    /// # Arguments
    ///
    /// * `tag` - Tag name of the element the node was synthesized from.
    /// * `index` - Position of that element among its siblings.
    pub fn synthetic(tag: &str, index: usize) -> Self {
        Self::new(&format!("{tag}_{index}"))
    }

    /// Runs `f` on the interned string.
    fn with_str<R>(self, f: impl FnOnce(&str) -> R) -> R {
        let interner = interner();
        // Every symbol was produced by this interner.
        f(interner.resolve(self.0).unwrap_or_default())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.with_str(|name| f.write_str(name))
    }
}

impl Serialize for Id {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.with_str(|name| serializer.serialize_str(name))
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        self.with_str(|name| name == other)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}
