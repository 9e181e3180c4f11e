use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

/// Global string interner for element IDs — fast comparisons, low memory.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// A lightweight, interned identifier for nodes and lines in the diagram.
/// Internally a `Spur` index — 4 bytes, Copy, Eq, Hash in O(1).
///
/// IDs carry a kind prefix (`stn_`, `misc_node_`, `line_`) so that a bare
/// ID string is enough to tell what family of element it names.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(Spur);

impl ElementId {
    /// Intern a new string as an ElementId, or return existing if already interned.
    pub fn intern(s: &str) -> Self {
        ElementId(INTERNER.get_or_intern(s))
    }

    /// Resolve back to a string slice.
    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }

    /// Generate a fresh station ID (`stn_<n>`).
    pub fn station() -> Self {
        Self::with_prefix("stn")
    }

    /// Generate a fresh miscellaneous-node ID (`misc_node_<n>`).
    pub fn misc_node() -> Self {
        Self::with_prefix("misc_node")
    }

    /// Generate a fresh line ID (`line_<n>`).
    pub fn line() -> Self {
        Self::with_prefix("line")
    }

    /// Generate a unique ID with a kind prefix.
    pub fn with_prefix(prefix: &str) -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        Self::intern(&format!("{prefix}_{n}"))
    }

    /// Whether this ID carries the given kind prefix.
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.as_str().starts_with(prefix)
    }
}

impl fmt::Debug for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for ElementId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ElementId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(ElementId::intern(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_roundtrip() {
        let a = ElementId::intern("stn_central");
        let b = ElementId::intern("stn_central");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "stn_central");
    }

    #[test]
    fn fresh_ids_are_unique_and_prefixed() {
        let a = ElementId::station();
        let b = ElementId::station();
        assert_ne!(a, b);
        assert!(a.has_prefix("stn_"));
        assert!(ElementId::line().has_prefix("line_"));
        assert!(ElementId::misc_node().has_prefix("misc_node_"));
    }
}
