//! The symbol-to-code map produced by `encode` and consumed by `decode`.
//!
//! Entries are kept in a fixed presentation order: ascending by code length,
//! then by code string. The order never changes which code belongs to which
//! symbol. Serialized as a JSON object in that order:
//!
//! ```text
//! {"A": "0", "B": "10", "C": "11"}
//! ```

use std::collections::HashMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CodecError;

/// Ordered mapping from symbol to code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodingMap {
    entries: Vec<(String, String)>,
    // symbol -> position in `entries`; rebuilt whenever entries move
    index: HashMap<String, usize>,
}

impl EncodingMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map from `(symbol, code)` pairs, sorted into canonical order.
    ///
    /// A repeated symbol keeps its last code.
    pub fn from_pairs<I, S, C>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, C)>,
        S: Into<String>,
        C: Into<String>,
    {
        let mut map = Self::new();
        for (symbol, code) in pairs {
            map.insert(symbol.into(), code.into());
        }
        map.sort_canonical();
        map
    }

    /// Wrap entries already known to have distinct symbols, sorting them.
    pub(crate) fn from_distinct(entries: Vec<(String, String)>) -> Self {
        let mut map = Self {
            entries,
            index: HashMap::new(),
        };
        map.sort_canonical();
        map
    }

    /// Insert or replace the code for `symbol`, keeping insertion position.
    pub fn insert(&mut self, symbol: String, code: String) {
        match self.index.get(&symbol) {
            Some(&position) => self.entries[position].1 = code,
            None => {
                self.index.insert(symbol.clone(), self.entries.len());
                self.entries.push((symbol, code));
            }
        }
    }

    /// Re-order entries by (code length, code).
    pub fn sort_canonical(&mut self) {
        self.entries
            .sort_by(|(_, a), (_, b)| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
        self.index = self
            .entries
            .iter()
            .enumerate()
            .map(|(position, (symbol, _))| (symbol.clone(), position))
            .collect();
    }

    /// Code assigned to `symbol`.
    pub fn get(&self, symbol: &str) -> Option<&str> {
        self.index
            .get(symbol)
            .map(|&position| self.entries[position].1.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(symbol, code)` pairs in map order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(s, c)| (s.as_str(), c.as_str()))
    }

    /// Symbol -> code lookup table for encoding.
    pub fn lookup(&self) -> HashMap<&str, &str> {
        self.iter().collect()
    }

    /// Code -> symbol table for decoding.
    ///
    /// # Errors
    /// `CodecError::DuplicateCode` if two symbols share a code.
    pub fn invert(&self) -> Result<HashMap<&str, &str>, CodecError> {
        let mut inverted: HashMap<&str, &str> = HashMap::with_capacity(self.entries.len());
        for (symbol, code) in self.iter() {
            if let Some(first) = inverted.insert(code, symbol) {
                return Err(CodecError::DuplicateCode {
                    code: code.to_string(),
                    first: first.to_string(),
                    second: symbol.to_string(),
                });
            }
        }
        Ok(inverted)
    }

    /// Whether no code is a proper prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let mut codes: Vec<&str> = self.entries.iter().map(|(_, c)| c.as_str()).collect();
        codes.sort_unstable();
        // In sorted order a prefix lands directly before some code it prefixes
        codes
            .windows(2)
            .all(|w| w[0] == w[1] || !w[1].starts_with(w[0]))
    }
}

impl Serialize for EncodingMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (symbol, code) in &self.entries {
            map.serialize_entry(symbol, code)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for EncodingMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(EncodingMapVisitor)
    }
}

struct EncodingMapVisitor;

impl<'de> Visitor<'de> for EncodingMapVisitor {
    type Value = EncodingMap;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of symbol to code strings")
    }

    // Document order is preserved; the map is not re-sorted on input.
    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = EncodingMap::new();
        if let Some(len) = access.size_hint() {
            map.entries.reserve(len);
            map.index.reserve(len);
        }
        while let Some((symbol, code)) = access.next_entry::<String, String>()? {
            map.insert(symbol, code);
        }
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_order() {
        let map = EncodingMap::from_pairs([("C", "11"), ("A", "0"), ("B", "10")]);
        let order: Vec<_> = map.iter().collect();
        assert_eq!(order, vec![("A", "0"), ("B", "10"), ("C", "11")]);
    }

    #[test]
    fn test_insert_replaces() {
        let mut map = EncodingMap::new();
        map.insert("a".into(), "0".into());
        map.insert("a".into(), "1".into());
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("a"), Some("1"));
        assert_eq!(map.get("b"), None);
    }

    #[test]
    fn test_invert() {
        let map = EncodingMap::from_pairs([("A", "0"), ("B", "1")]);
        let inverted = map.invert().unwrap();
        assert_eq!(inverted.get("0"), Some(&"A"));
        assert_eq!(inverted.get("1"), Some(&"B"));
    }

    #[test]
    fn test_invert_rejects_duplicate_codes() {
        let map = EncodingMap::from_pairs([("A", "0"), ("B", "0")]);
        assert_eq!(
            map.invert(),
            Err(CodecError::DuplicateCode {
                code: "0".into(),
                first: "A".into(),
                second: "B".into(),
            })
        );
    }

    #[test]
    fn test_prefix_free() {
        assert!(EncodingMap::from_pairs([("A", "0"), ("B", "10"), ("C", "11")]).is_prefix_free());
        assert!(!EncodingMap::from_pairs([("A", "1"), ("B", "10")]).is_prefix_free());
        assert!(!EncodingMap::from_pairs([("A", "0"), ("B", "10"), ("C", "011")]).is_prefix_free());
    }

    #[test]
    fn test_json_keeps_order() {
        let map = EncodingMap::from_pairs([("b", "1"), ("a", "0"), ("ñ", "10")]);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"a":"0","b":"1","ñ":"10"}"#);

        let parsed: EncodingMap = serde_json::from_str(r#"{"z":"1","y":"0"}"#).unwrap();
        let order: Vec<_> = parsed.iter().collect();
        assert_eq!(order, vec![("z", "1"), ("y", "0")]);
    }

    #[test]
    fn test_json_large_map() {
        let n = 100_000;
        let mut json = String::from("{");
        for i in 0..n {
            if i > 0 {
                json.push(',');
            }
            json.push_str(&format!(r#""s{i}":"{i:b}""#));
        }
        json.push('}');

        let start = std::time::Instant::now();
        let map: EncodingMap = serde_json::from_str(&json).unwrap();
        assert!(start.elapsed() < std::time::Duration::from_secs(10));

        assert_eq!(map.len(), n);
        assert_eq!(map.get("s0"), Some("0"));
        assert_eq!(map.get("s99999"), Some(format!("{:b}", 99_999).as_str()));
        assert_eq!(map.iter().nth(5), Some(("s5", "101")));
    }

    #[test]
    fn test_get_after_sort() {
        let mut map = EncodingMap::new();
        map.insert("c".into(), "11".into());
        map.insert("a".into(), "0".into());
        map.sort_canonical();
        map.insert("a".into(), "10".into());
        assert_eq!(map.get("a"), Some("10"));
        assert_eq!(map.get("c"), Some("11"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_json_rejects_non_string_codes() {
        assert!(serde_json::from_str::<EncodingMap>(r#"{"a":0}"#).is_err());
        assert!(serde_json::from_str::<EncodingMap>(r#"["a","0"]"#).is_err());
    }
}
