//! Interned identifiers for nodes and lanes.
//!
//! Node and lane keys are compared constantly while links are rewritten, so
//! they are interned once and handled as small `Copy` symbols afterwards.

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner shared by every [`Id`].
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn with_interner<R>(f: impl FnOnce(&mut DefaultStringInterner) -> R) -> R {
    let mut interner = INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .expect("Failed to acquire interner lock");
    f(&mut interner)
}

/// Identifier of a node or lane.
///
/// # Examples
///
/// ```
/// use rungs_core::identifier::Id;
///
/// let contact = Id::new("XIC_1");
/// assert_eq!(contact, "XIC_1");
///
/// let generated = Id::indexed("rung", 3);
/// assert_eq!(generated, "rung_3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Interns `name` and returns its identifier.
    pub fn new(name: &str) -> Self {
        Self(with_interner(|interner| interner.get_or_intern(name)))
    }

    /// Creates an identifier of the form `{prefix}_{idx}`.
    ///
    /// Used for lanes and nodes that are created without an explicit key.
    pub fn indexed(prefix: &str, idx: usize) -> Self {
        Self::new(&format!("{prefix}_{idx}"))
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = with_interner(|interner| {
            interner
                .resolve(self.0)
                .map(str::to_owned)
                .expect("Symbol should exist in interner")
        });
        f.write_str(&name)
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        with_interner(|interner| interner.resolve(self.0) == Some(other))
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}
