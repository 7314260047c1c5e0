//! Insertion-ordered map from node name to per-host data.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Node name to host entry, kept in insertion order.
///
/// Both artifacts list hosts in input order, so this is a plain vector of
/// pairs rather than a hash map. Inserting an existing name replaces its
/// value in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostMap<H> {
    entries: Vec<(String, H)>,
}

impl<H> Default for HostMap<H> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<H> HostMap<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, host: H) {
        let name = name.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = host,
            None => self.entries.push((name, host)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&H> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, host)| host)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &H)> {
        self.entries.iter().map(|(name, host)| (name.as_str(), host))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<H: Serialize> Serialize for HostMap<H> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, host) in &self.entries {
            map.serialize_entry(name, host)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preserves_insertion_order() {
        let mut map = HostMap::new();
        map.insert("worker-3", 3);
        map.insert("worker-1", 1);
        map.insert("worker-2", 2);

        let names: Vec<&str> = map.names().collect();
        assert_eq!(names, vec!["worker-3", "worker-1", "worker-2"]);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut map = HostMap::new();
        map.insert("a", 1);
        map.insert("b", 2);
        map.insert("a", 10);

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("a"), Some(&10));
        assert_eq!(map.names().next(), Some("a"));
    }

    #[test]
    fn test_serializes_as_ordered_mapping() {
        let mut map = HostMap::new();
        map.insert("zeta", "z");
        map.insert("alpha", "a");

        let yaml = serde_yaml::to_string(&map).unwrap();
        assert_eq!(yaml, "zeta: z\nalpha: a\n");
    }

    #[test]
    fn test_empty_map_serializes_as_empty_mapping() {
        let map: HostMap<u32> = HostMap::new();
        assert!(map.is_empty());
        assert_eq!(serde_yaml::to_string(&map).unwrap(), "{}\n");
    }
}
