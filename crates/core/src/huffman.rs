//! Huffman text codec.
//!
//! # Pipeline
//!
//! ```text
//! text ─tokenize─▶ symbols ─frequencies─▶ [(symbol, count)] ─build_tree─▶ Node
//!      ─assign_codes─▶ EncodingMap ─map every symbol─▶ "0 10 11 ..."
//! ```
//!
//! Decoding skips the tree entirely: it inverts the map and looks each
//! space-separated code up.
//!
//! # Determinism
//!
//! Ties are resolved by list order, never by a separate priority structure:
//! - the frequency table is sorted by count descending, ties in
//!   first-occurrence order (stable sort)
//! - the tree builder always merges the two *last* entries and re-sorts
//!   stably, so a merged entry lands after existing entries of equal weight
//! - the first child of an internal node is the `1` branch, the second is `0`
//!
//! The same input therefore always produces the same map.

use std::collections::HashMap;
use std::sync::Arc;

use crate::codebook::EncodingMap;
use crate::codec::{Encoded, TextCodec};
use crate::error::{CodecError, Result};
use crate::syllable::{Syllabifier, SpanishSyllabifier};
use crate::tokenizer::{tokenize, TokenizeMode};

/// What to do when the input has exactly one distinct symbol.
///
/// The bare algorithm would give that symbol the empty code, which cannot
/// survive a whitespace split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DegeneratePolicy {
    /// Give the lone symbol the code `"0"`.
    #[default]
    OneBitCode,
    /// Fail with `CodecError::DegenerateAlphabet`.
    Reject,
}

/// Huffman tree node. Each internal node owns its two children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf(String),
    Internal { first: Box<Node>, second: Box<Node> },
}

/// Count symbol occurrences.
///
/// Sorted by count descending; equal counts keep first-occurrence order.
/// An empty sequence yields an empty table.
pub fn frequencies<S: AsRef<str>>(symbols: &[S]) -> Vec<(String, usize)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for symbol in symbols {
        let symbol = symbol.as_ref();
        match index.get(symbol) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(symbol, counts.len());
                counts.push((symbol.to_string(), 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Greedily merge the two lightest entries until one root remains.
///
/// `weighted` must already be sorted by weight descending (as returned by
/// [`frequencies`]). A single entry is returned as a bare leaf.
///
/// # Errors
/// `CodecError::EmptyInput` if `weighted` is empty.
pub fn build_tree(weighted: Vec<(String, usize)>) -> std::result::Result<Node, CodecError> {
    let mut nodes: Vec<(Node, usize)> = weighted
        .into_iter()
        .map(|(symbol, weight)| (Node::Leaf(symbol), weight))
        .collect();

    while nodes.len() > 1 {
        let (Some((first, w1)), Some((second, w2))) = (nodes.pop(), nodes.pop()) else {
            break;
        };
        nodes.push((
            Node::Internal {
                first: Box::new(first),
                second: Box::new(second),
            },
            w1 + w2,
        ));
        nodes.sort_by(|a, b| b.1.cmp(&a.1));
    }

    nodes
        .pop()
        .map(|(root, _)| root)
        .ok_or(CodecError::EmptyInput)
}

/// Walk the tree and collect every leaf's code.
///
/// The first child of each internal node appends `'1'`, the second `'0'`.
/// The resulting map is in canonical (length, code) order.
///
/// # Errors
/// `CodecError::DegenerateAlphabet` if the root is a leaf and `policy` is
/// [`DegeneratePolicy::Reject`].
pub fn assign_codes(
    root: &Node,
    policy: DegeneratePolicy,
) -> std::result::Result<EncodingMap, CodecError> {
    if let Node::Leaf(symbol) = root {
        return match policy {
            DegeneratePolicy::OneBitCode => Ok(EncodingMap::from_distinct(vec![(
                symbol.clone(),
                "0".to_string(),
            )])),
            DegeneratePolicy::Reject => Err(CodecError::DegenerateAlphabet {
                symbol: symbol.clone(),
            }),
        };
    }

    let mut entries = Vec::new();
    let mut prefix = String::new();
    collect_codes(root, &mut prefix, &mut entries);
    Ok(EncodingMap::from_distinct(entries))
}

fn collect_codes(node: &Node, prefix: &mut String, out: &mut Vec<(String, String)>) {
    match node {
        Node::Leaf(symbol) => out.push((symbol.clone(), prefix.clone())),
        Node::Internal { first, second } => {
            prefix.push('1');
            collect_codes(first, prefix, out);
            prefix.pop();

            prefix.push('0');
            collect_codes(second, prefix, out);
            prefix.pop();
        }
    }
}

/// Frequency table, tree and code assignment in one step.
pub fn build_encoding_map<S: AsRef<str>>(
    symbols: &[S],
    policy: DegeneratePolicy,
) -> std::result::Result<EncodingMap, CodecError> {
    let table = frequencies(symbols);
    log::debug!("frequency table: {} distinct symbols", table.len());
    let root = build_tree(table)?;
    assign_codes(&root, policy)
}

/// Huffman implementation of [`TextCodec`].
///
/// Holds only immutable configuration, so one instance can serve any
/// number of concurrent callers.
#[derive(Clone)]
pub struct HuffmanCodec {
    policy: DegeneratePolicy,
    syllabifier: Arc<dyn Syllabifier>,
}

impl HuffmanCodec {
    /// Create a codec with the given degenerate-input policy and syllabifier.
    pub fn new(policy: DegeneratePolicy, syllabifier: Arc<dyn Syllabifier>) -> Self {
        Self {
            policy,
            syllabifier,
        }
    }
}

impl Default for HuffmanCodec {
    fn default() -> Self {
        Self::new(DegeneratePolicy::default(), Arc::new(SpanishSyllabifier))
    }
}

impl std::fmt::Debug for HuffmanCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HuffmanCodec")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

/// Replace each symbol with its code, joined by single spaces.
fn apply_map(
    symbols: &[String],
    encoding_map: &EncodingMap,
) -> std::result::Result<String, CodecError> {
    let lookup = encoding_map.lookup();
    let codes = symbols
        .iter()
        .map(|symbol| {
            lookup
                .get(symbol.as_str())
                .copied()
                .ok_or_else(|| CodecError::MissingCode {
                    symbol: symbol.clone(),
                })
        })
        .collect::<std::result::Result<Vec<&str>, CodecError>>()?;
    Ok(codes.join(" "))
}

impl TextCodec for HuffmanCodec {
    fn name(&self) -> &'static str {
        "huffman"
    }

    fn encode(&self, text: &str, separate_syllables: bool) -> Result<Encoded> {
        let mode = TokenizeMode::from_flag(separate_syllables);
        let symbols = tokenize(text, mode, self.syllabifier.as_ref());
        log::debug!("tokenized {} bytes into {} symbols ({:?})", text.len(), symbols.len(), mode);

        let encoding_map = build_encoding_map(&symbols, self.policy)?;
        let encoded_text = apply_map(&symbols, &encoding_map)?;

        Ok(Encoded {
            encoding_map,
            encoded_text,
        })
    }

    fn decode(&self, encoded_text: &str, encoding_map: &EncodingMap) -> Result<String> {
        let inverted = encoding_map.invert()?;

        let mut decoded = String::with_capacity(encoded_text.len());
        for (position, token) in encoded_text.split_whitespace().enumerate() {
            let symbol = inverted
                .get(token)
                .ok_or_else(|| CodecError::DecodeLookupFailure {
                    token: token.to_string(),
                    position,
                })?;
            decoded.push_str(symbol);
        }

        log::debug!("decoded {} bytes of codes into {} bytes", encoded_text.len(), decoded.len());
        Ok(decoded)
    }
}
