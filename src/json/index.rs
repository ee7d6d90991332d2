use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A position in one of the document's top-level arrays, tagged with the
/// element type it refers to. Serialized as a bare integer.
pub struct Index<T>(u32, PhantomData<fn() -> T>);

impl<T> Index<T> {
    pub fn new(value: u32) -> Self {
        Index(value, PhantomData)
    }

    pub fn value(&self) -> usize {
        self.0 as usize
    }

    /// Append `item` and return its index.
    pub fn push(items: &mut Vec<T>, item: T) -> Self {
        let index = Self::new(items.len() as u32);
        items.push(item);
        index
    }

    pub fn get<'a>(&self, items: &'a [T]) -> Option<&'a T> {
        items.get(self.value())
    }
}

impl<T> Clone for Index<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Index<T> {}

impl<T> PartialEq for Index<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for Index<T> {}

impl<T> PartialOrd for Index<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Index<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl<T> Hash for Index<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<T> fmt::Debug for Index<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Index({})", self.0)
    }
}

impl<T> fmt::Display for Index<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<T> Serialize for Index<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.0)
    }
}

impl<'de, T> Deserialize<'de> for Index<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u32::deserialize(deserializer).map(Index::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Thing;

    #[test]
    fn push_returns_position() {
        let mut things = vec![Thing];
        let ix = Index::push(&mut things, Thing);
        assert_eq!(ix.value(), 1);
        assert!(ix.get(&things).is_some());
        assert!(Index::<Thing>::new(2).get(&things).is_none());
    }

    #[test]
    fn serializes_as_bare_integer() {
        let ix: Index<Thing> = Index::new(7);
        assert_eq!(serde_json::to_string(&ix).unwrap(), "7");
        let back: Index<Thing> = serde_json::from_str("7").unwrap();
        assert_eq!(back, ix);
        assert!(serde_json::from_str::<Index<Thing>>("-1").is_err());
    }
}
