use super::{Category, ProtocolDescriptor};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// Descriptor fields shown when comparing protocols side by side
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProtocolView {
    pub category: Category,
    pub complexity: u8,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub use_cases: Vec<String>,
    #[serde(serialize_with = "serialize_pairs")]
    pub compatibility: Vec<(String, String)>,
}

impl From<&ProtocolDescriptor> for ProtocolView {
    fn from(desc: &ProtocolDescriptor) -> Self {
        Self {
            category: desc.category,
            complexity: desc.complexity_base,
            pros: to_owned(desc.pros),
            cons: to_owned(desc.cons),
            use_cases: to_owned(desc.typical_use_cases),
            compatibility: desc
                .compatibility_notes
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

/// One comparison slot: either the protocol's view or an error marker
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ComparisonEntry {
    Found(ProtocolView),
    NotFound { error: String },
}

impl ComparisonEntry {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Insertion-ordered map of name to comparison entry.
///
/// Serializes as a JSON object whose keys keep the order the names were
/// given in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Comparison {
    entries: Vec<(String, ComparisonEntry)>,
}

impl Comparison {
    /// Insert or replace; a replaced entry keeps its original position.
    pub fn insert(&mut self, name: String, entry: ComparisonEntry) {
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = entry,
            None => self.entries.push((name, entry)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ComparisonEntry> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, entry)| entry)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ComparisonEntry)> {
        self.entries.iter().map(|(n, e)| (n.as_str(), e))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Comparison {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, entry) in &self.entries {
            map.serialize_entry(name, entry)?;
        }
        map.end()
    }
}

fn serialize_pairs<S: Serializer>(
    pairs: &[(String, String)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(pairs.len()))?;
    for (k, v) in pairs {
        map.serialize_entry(k, v)?;
    }
    map.end()
}

fn to_owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
