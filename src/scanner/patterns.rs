use crate::catalog::Catalog;
use crate::errors::Result;
use regex::{RegexSet, RegexSetBuilder};

/// One catalog pattern, flattened with the protocol it belongs to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatternEntry {
    pub protocol: &'static str,
    pub pattern: &'static str,
    pub confidence: f64,
}

/// Every detection pattern of the catalog compiled into one case-insensitive
/// `RegexSet`.
///
/// Entries are laid out protocol by protocol, pattern by pattern, in catalog
/// order, so a set index identifies both. `regex` guarantees linear-time
/// matching, which bounds the cost of pathological lines.
#[derive(Debug, Clone)]
pub struct PatternTable {
    entries: Vec<PatternEntry>,
    set: RegexSet,
}

impl PatternTable {
    pub fn compile(catalog: &Catalog) -> Result<Self> {
        let entries: Vec<PatternEntry> = catalog
            .iter()
            .flat_map(|desc| {
                desc.patterns.iter().map(move |p| PatternEntry {
                    protocol: desc.key,
                    pattern: p.pattern,
                    confidence: p.confidence,
                })
            })
            .collect();

        let set = RegexSetBuilder::new(entries.iter().map(|e| e.pattern))
            .case_insensitive(true)
            .build()?;

        Ok(Self { entries, set })
    }

    /// Indices of every entry matching `line`, ascending
    pub fn matching(&self, line: &str) -> impl Iterator<Item = usize> {
        self.set.matches(line).into_iter()
    }

    pub fn entry(&self, index: usize) -> &PatternEntry {
        &self.entries[index]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Case-insensitive set over a fixed list of role patterns
pub(crate) fn compile_set(patterns: &[&str]) -> Result<RegexSet> {
    Ok(RegexSetBuilder::new(patterns)
        .case_insensitive(true)
        .build()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_covers_every_catalog_pattern() {
        let catalog = Catalog::builtin();
        let table = PatternTable::compile(&catalog).unwrap();
        let expected: usize = catalog.iter().map(|d| d.patterns.len()).sum();
        assert_eq!(table.len(), expected);
        assert_eq!(table.entry(0).protocol, "websocket");
        assert_eq!(table.entry(table.len() - 1).protocol, "mqtt");
    }

    #[test]
    fn matching_is_case_insensitive() {
        let table = PatternTable::compile(&Catalog::builtin()).unwrap();
        let hits: Vec<_> = table
            .matching("IMPORT WEBSOCKET")
            .map(|i| table.entry(i).protocol)
            .collect();
        assert!(hits.contains(&"websocket"));
    }

    #[test]
    fn matching_indices_are_ascending() {
        let table = PatternTable::compile(&Catalog::builtin()).unwrap();
        let hits: Vec<_> = table
            .matching("const ws = new WebSocket('wss://x'); socket.emit('a'); fetch('/poll')")
            .collect();
        assert!(hits.len() > 3);
        assert!(hits.windows(2).all(|w| w[0] < w[1]));
    }
}
