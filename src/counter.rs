use indexmap::IndexMap;

/// Signed occurrence counter over class tokens.
///
/// Entries keep insertion order, which later becomes the stylesheet's rule
/// order. A count may legitimately pass through zero while a batch is being
/// folded; zero entries are only dropped by an explicit [`CountMap::prune_zeros`]
/// pass once the batch has settled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountMap {
    entries: IndexMap<String, i64>,
}

impl CountMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `delta` (which may be negative) to the count for `key`.
    /// Returns `&mut self` so calls can be chained.
    pub fn increase(&mut self, key: &str, delta: i64) -> &mut Self {
        match self.entries.get_mut(key) {
            Some(value) => *value += delta,
            None => {
                self.entries.insert(key.to_string(), delta);
            }
        }
        self
    }

    /// Current count for `key`, zero if absent.
    pub fn count(&self, key: &str) -> i64 {
        self.entries.get(key).copied().unwrap_or(0)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Remove the entry for `key`, preserving the order of the rest.
    pub fn remove(&mut self, key: &str) -> Option<i64> {
        self.entries.shift_remove(key)
    }

    /// Drop every entry whose net count is exactly zero.
    pub fn prune_zeros(&mut self) {
        self.entries.retain(|_, value| *value != 0);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), *value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, i64)> for CountMap {
    fn from_iter<I: IntoIterator<Item = (S, i64)>>(iter: I) -> Self {
        let mut map = CountMap::new();
        for (key, delta) in iter {
            let key: String = key.into();
            map.increase(&key, delta);
        }
        map
    }
}
