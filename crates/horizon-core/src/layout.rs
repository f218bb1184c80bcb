// crates/horizon-core/src/layout.rs
//
// Resolved 2D coordinates keyed by node name.
//
// A `Layout` is what the embedding engine returns and what a snapshot stores
// under `embed`. A `PriorCoords` is the read side: the previous snapshot's
// layout, looked up by name when aligning the next one.

use std::collections::HashMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Previous snapshot's coordinates, looked up by node name.
pub type PriorCoords = HashMap<String, [f64; 2]>;

/// Node name → (x, y), in node order.
///
/// Serializes as a JSON object `{"name": [x, y], ...}` whose key order
/// follows insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    entries: Vec<(String, [f64; 2])>,
}

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Append a coordinate. Later entries for an existing name replace it in place.
    pub fn insert(&mut self, name: impl Into<String>, point: [f64; 2]) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = point,
            None => self.entries.push((name, point)),
        }
    }

    pub fn get(&self, name: &str) -> Option<[f64; 2]> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, p)| *p)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, [f64; 2])> {
        self.entries.iter().map(|(n, p)| (n.as_str(), *p))
    }

    /// Convert into the lookup form consumed by the next snapshot.
    pub fn to_prior(&self) -> PriorCoords {
        self.entries.iter().cloned().collect()
    }
}

impl FromIterator<(String, [f64; 2])> for Layout {
    fn from_iter<I: IntoIterator<Item = (String, [f64; 2])>>(iter: I) -> Self {
        let mut layout = Layout::new();
        for (name, point) in iter {
            layout.insert(name, point);
        }
        layout
    }
}

impl Serialize for Layout {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, point) in &self.entries {
            map.serialize_entry(name, point)?;
        }
        map.end()
    }
}

struct LayoutVisitor;

impl<'de> Visitor<'de> for LayoutVisitor {
    type Value = Layout;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of node name to [x, y]")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Layout, A::Error> {
        let mut layout = Layout::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((name, point)) = access.next_entry::<String, [f64; 2]>()? {
            layout.insert(name, point);
        }
        Ok(layout)
    }
}

impl<'de> Deserialize<'de> for Layout {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(LayoutVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_preserves_order() {
        let mut layout = Layout::new();
        layout.insert("C", [1.0, 0.0]);
        layout.insert("A", [-1.0, 0.0]);
        let names: Vec<&str> = layout.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["C", "A"]);

        layout.insert("C", [2.0, 0.0]);
        assert_eq!(layout.len(), 2);
        assert_eq!(layout.get("C"), Some([2.0, 0.0]));
    }

    #[test]
    fn test_serializes_as_ordered_object() {
        let layout: Layout = vec![
            ("B".to_string(), [0.5, -0.25]),
            ("A".to_string(), [0.0, 1.0]),
        ]
        .into_iter()
        .collect();
        let json = serde_json::to_string(&layout).unwrap();
        assert_eq!(json, r#"{"B":[0.5,-0.25],"A":[0.0,1.0]}"#);
    }

    #[test]
    fn test_deserialize_and_to_prior() {
        let layout: Layout = serde_json::from_str(r#"{"A":[1.5,2.0],"B":[0.0,-3.0]}"#).unwrap();
        assert_eq!(layout.len(), 2);
        let prior = layout.to_prior();
        assert_eq!(prior.get("B"), Some(&[0.0, -3.0]));
    }

    #[test]
    fn test_deserialize_rejects_bad_points() {
        let bad: Result<Layout, _> = serde_json::from_str(r#"{"A":[1.5]}"#);
        assert!(bad.is_err());
    }
}
