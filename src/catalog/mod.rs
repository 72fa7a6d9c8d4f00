//! Protocol catalog
//!
//! The catalog is the immutable registry of every protocol protomap knows
//! about: its category, baseline complexity, dependencies, trade-offs and the
//! weighted patterns the scanner looks for. It is built once and handed to the
//! scanner, ranker and advisor by reference; nothing mutates it afterwards.
//!
//! Iteration order is fixed (see [`builtin`]) and is observable: substring
//! name resolution, ranking tie-breaks and the order of detected protocols in
//! a report all follow it.

pub mod builtin;
mod compare;

pub use compare::{Comparison, ComparisonEntry, ProtocolView};

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Broad communication style of a protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Realtime,
    RequestResponse,
    Streaming,
    Rpc,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Realtime,
        Category::RequestResponse,
        Category::Streaming,
        Category::Rpc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Realtime => "realtime",
            Category::RequestResponse => "request-response",
            Category::Streaming => "streaming",
            Category::Rpc => "rpc",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown protocol category: {s}"))
    }
}

/// One weighted detection pattern.
///
/// `pattern` is a regular expression matched case-insensitively against a
/// single source line; `confidence` is how strongly a hit implies real use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DetectionPattern {
    pub pattern: &'static str,
    pub confidence: f64,
}

/// Static description of a known protocol
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProtocolDescriptor {
    /// Canonical lowercase id, e.g. `socket.io`
    pub key: &'static str,
    pub name: &'static str,
    pub category: Category,
    /// Baseline complexity in `1..=10`
    pub complexity_base: u8,
    pub dependencies: &'static [&'static str],
    pub pros: &'static [&'static str],
    pub cons: &'static [&'static str],
    pub typical_use_cases: &'static [&'static str],
    pub compatibility_notes: &'static [(&'static str, &'static str)],
    pub patterns: &'static [DetectionPattern],
}

/// Immutable, ordered registry of protocol descriptors
#[derive(Debug, Clone)]
pub struct Catalog {
    descriptors: Vec<ProtocolDescriptor>,
}

impl Catalog {
    /// The built-in catalog of eight protocols.
    pub fn builtin() -> Self {
        Self {
            descriptors: builtin::descriptors(),
        }
    }

    /// Build a catalog from explicit descriptors, enforcing the invariants
    /// every consumer relies on.
    pub fn from_descriptors(descriptors: Vec<ProtocolDescriptor>) -> Result<Self> {
        let catalog = Self { descriptors };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Check confidence ranges, complexity bounds, key uniqueness and that
    /// every protocol has at least one pattern.
    pub fn validate(&self) -> Result<()> {
        for (idx, desc) in self.descriptors.iter().enumerate() {
            if desc.key.is_empty() || desc.key != desc.key.to_lowercase() {
                return Err(Error::Catalog(format!(
                    "key '{}' must be non-empty lowercase",
                    desc.key
                )));
            }
            if self.descriptors[..idx].iter().any(|d| d.key == desc.key) {
                return Err(Error::Catalog(format!("duplicate key '{}'", desc.key)));
            }
            if !(1..=10).contains(&desc.complexity_base) {
                return Err(Error::Catalog(format!(
                    "{}: base complexity {} outside 1..=10",
                    desc.key, desc.complexity_base
                )));
            }
            if desc.patterns.is_empty() {
                return Err(Error::Catalog(format!("{}: no detection patterns", desc.key)));
            }
            if let Some(bad) = desc
                .patterns
                .iter()
                .find(|p| !(0.0..=1.0).contains(&p.confidence))
            {
                return Err(Error::Catalog(format!(
                    "{}: confidence {} for '{}' outside [0, 1]",
                    desc.key, bad.confidence, bad.pattern
                )));
            }
        }
        Ok(())
    }

    pub fn lookup(&self, key: &str) -> Option<&ProtocolDescriptor> {
        self.descriptors.iter().find(|d| d.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    /// Descriptors in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &ProtocolDescriptor> {
        self.descriptors.iter()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Resolve a user-supplied protocol name to its canonical key.
    ///
    /// The input is lower-cased and spaces/hyphens become underscores. Then,
    /// in order:
    /// 1. exact key match,
    /// 2. the same text with underscores turned into dots (`socket_io` -> `socket.io`),
    /// 3. substring containment in either direction, first key in catalog order.
    ///
    /// Returns `None` when nothing matches; callers report that as data.
    pub fn resolve_name(&self, text: &str) -> Option<&'static str> {
        let normalized = normalize_name(text);
        if normalized.is_empty() {
            return None;
        }

        if let Some(desc) = self.lookup(&normalized) {
            return Some(desc.key);
        }

        let dotted = normalized.replace('_', ".");
        if let Some(desc) = self.lookup(&dotted) {
            return Some(desc.key);
        }

        // Ambiguous when one key contains another; catalog order decides.
        self.descriptors
            .iter()
            .find(|d| d.key.contains(normalized.as_str()) || normalized.contains(d.key))
            .map(|d| d.key)
    }

    /// Resolve a name straight to its descriptor
    pub fn resolve(&self, text: &str) -> Option<&ProtocolDescriptor> {
        self.resolve_name(text).and_then(|key| self.lookup(key))
    }

    /// Descriptors sorted by key, optionally restricted to one category
    pub fn list(&self, category: Option<Category>) -> Vec<&ProtocolDescriptor> {
        let mut listed: Vec<_> = self
            .descriptors
            .iter()
            .filter(|d| category.map_or(true, |c| d.category == c))
            .collect();
        listed.sort_by_key(|d| d.key);
        listed
    }

    /// Side-by-side view of the named protocols.
    ///
    /// Never fails: names that do not resolve become error entries keyed by
    /// the raw input.
    pub fn compare<S: AsRef<str>>(&self, names: &[S]) -> Comparison {
        let mut comparison = Comparison::default();
        for name in names {
            let name = name.as_ref();
            match self.resolve(name) {
                Some(desc) => comparison.insert(
                    desc.name.to_string(),
                    ComparisonEntry::Found(ProtocolView::from(desc)),
                ),
                None => comparison.insert(
                    name.to_string(),
                    ComparisonEntry::NotFound {
                        error: "Protocol not found in database".to_string(),
                    },
                ),
            }
        }
        comparison
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn normalize_name(text: &str) -> String {
    text.trim().to_lowercase().replace([' ', '-'], "_")
}
