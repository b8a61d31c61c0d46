//! Number → display name aliases

use std::collections::HashMap;
use tracing::warn;

/// Maps raw extension numbers to the names shown in the channel and on the
/// dashboard. Built once at startup and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    names: HashMap<String, String>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an `id1:name1,id2:name2` list.
    ///
    /// Pairs that do not split into exactly two fields are skipped with a
    /// warning. Blank entries (an empty setting, a trailing comma) are ignored.
    pub fn parse(spec: &str) -> Self {
        let mut names = HashMap::new();
        for pair in spec.split(',') {
            let pair = pair.trim();
            if pair.is_empty() {
                continue;
            }
            let fields: Vec<&str> = pair.split(':').collect();
            match fields.as_slice() {
                [id, name] => {
                    names.insert(id.trim().to_string(), name.trim().to_string());
                }
                _ => warn!(pair = %pair, "user number mapping not a pair, skipping"),
            }
        }
        Self { names }
    }

    /// Display name for `raw`, or `raw` itself when there is no alias
    pub fn resolve<'a>(&'a self, raw: &'a str) -> &'a str {
        self.names.get(raw).map(String::as_str).unwrap_or(raw)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for AliasTable
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}
