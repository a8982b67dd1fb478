//! Identity-keyed results of fan-out and collection operations.

use std::{
    borrow::Borrow,
    collections::BTreeMap,
    fmt::{self, Display},
    ops::Index,
};

use serde::{Serialize, Serializer, ser::SerializeMap as _};

use crate::StatError;

/// An ordered mapping from an identity to a statistic value.
///
/// Entries keep the order in which their keys were first inserted, which for
/// engine results is the traversal order of the input. Inserting a key that
/// is already present replaces its value in place.
///
/// # Example
///
/// ```
/// use platestats_engine::ResultMap;
///
/// let mut results = ResultMap::new();
/// results.insert("b".to_owned(), 2);
/// results.insert("a".to_owned(), 1);
/// results.insert("b".to_owned(), 3);
///
/// assert_eq!(results.keys().map(String::as_str).collect::<Vec<_>>(), ["b", "a"]);
/// assert_eq!(results["b"], 3);
/// assert!(results.try_get("c").is_err());
/// ```
#[derive(Clone, PartialEq)]
pub struct ResultMap<K, V> {
    entries: Vec<(K, V)>,
    index: BTreeMap<K, usize>,
}

impl<K, V> ResultMap<K, V> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    pub fn keys(&self) -> impl ExactSizeIterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl ExactSizeIterator<Item = &V> {
        self.entries.iter().map(|(_, v)| v)
    }
}

impl<K, V> ResultMap<K, V>
where
    K: Ord + Clone,
{
    /// Inserts a value, returning the one it replaced.
    ///
    /// A replaced key keeps its original position.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&i) = self.index.get(&key) {
            return Some(std::mem::replace(&mut self.entries[i].1, value));
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
        None
    }

    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    /// Like [`get`](Self::get), but a missing key is an
    /// [`UnknownIdentity`](StatError::UnknownIdentity) error.
    pub fn try_get<Q>(&self, key: &Q) -> Result<&V, StatError>
    where
        K: Borrow<Q>,
        Q: Ord + Display + ?Sized,
    {
        self.get(key).ok_or_else(|| StatError::UnknownIdentity {
            key: key.to_string(),
        })
    }

    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.index.contains_key(key)
    }
}

impl<K, V> Default for ResultMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for ResultMap<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, Q> Index<&Q> for ResultMap<K, V>
where
    K: Ord + Clone + Borrow<Q>,
    Q: Ord + Display + ?Sized,
{
    type Output = V;

    /// Panics if `key` is not present.
    fn index(&self, key: &Q) -> &V {
        match self.get(key) {
            Some(value) => value,
            None => panic!("no result for '{key}'"),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for ResultMap<K, V>
where
    K: Ord + Clone,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K, V> Extend<(K, V)> for ResultMap<K, V>
where
    K: Ord + Clone,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V> IntoIterator for ResultMap<K, V> {
    type Item = (K, V);
    type IntoIter = std::vec::IntoIter<(K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a, K, V> IntoIterator for &'a ResultMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Borrowing iterator over the entries of a [`ResultMap`], in entry order.
#[derive(Debug, Clone)]
pub struct Iter<'a, K, V> {
    inner: std::slice::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

/// Serialized as a map in entry order.
impl<K, V> Serialize for ResultMap<K, V>
where
    K: Serialize,
    V: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use platestats_model::WellId;

    use super::*;

    #[test]
    fn test_keeps_first_insertion_order() {
        let map: ResultMap<WellId, usize> = [
            (WellId::new(1, 0), 1),
            (WellId::new(0, 0), 2),
            (WellId::new(1, 0), 3),
        ]
        .into_iter()
        .collect();
        assert_eq!(map.len(), 2);
        assert_eq!(
            map.iter().map(|(k, v)| (*k, *v)).collect::<Vec<_>>(),
            [(WellId::new(1, 0), 3), (WellId::new(0, 0), 2)]
        );
    }

    #[test]
    fn test_try_get_unknown() {
        let map: ResultMap<WellId, f64> = [(WellId::new(0, 0), 1.5)].into_iter().collect();
        assert_eq!(map.try_get(&WellId::new(0, 0)), Ok(&1.5));
        assert_eq!(
            map.try_get(&WellId::new(3, 3)),
            Err(StatError::UnknownIdentity {
                key: "D4".to_owned()
            })
        );
        assert!(!map.contains_key(&WellId::new(3, 3)));
    }

    #[test]
    #[should_panic(expected = "no result for 'missing'")]
    fn test_index_panics_on_unknown() {
        let map: ResultMap<String, f64> = ResultMap::new();
        let _ = &map["missing"];
    }

    #[test]
    fn test_serializes_in_entry_order() {
        let map: ResultMap<String, usize> = [("z".to_owned(), 1), ("a".to_owned(), 2)]
            .into_iter()
            .collect();
        assert_eq!(serde_json::to_string(&map).unwrap(), r#"{"z":1,"a":2}"#);
    }

    #[test]
    fn test_debug_as_map() {
        let map: ResultMap<WellId, usize> = [(WellId::new(0, 0), 3)].into_iter().collect();
        assert_eq!(format!("{map:?}"), "{WellId { row: 0, column: 0 }: 3}");
    }
}
