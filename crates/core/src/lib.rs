//! huffman-text-core: Huffman text codec with printable bit-string codes
//!
//! This library turns text into a stream of variable-length binary codes
//! plus the map needed to invert them, and reconstructs the text from that
//! pair:
//! - Tokenizes text per character, or per Spanish syllable
//! - Builds a Huffman tree with a fully reproducible tie-break policy
//! - Assigns codes and presents the map in canonical (length, code) order
//! - Decodes by inverting the map, failing atomically on unknown codes
//!
//! # Architecture
//!
//! The system is designed around clear module boundaries:
//! - `tokenizer`: text -> symbol sequence
//! - `syllable`: word -> syllables (Spanish rules, pluggable)
//! - `huffman`: frequency table, tree builder, code assigner, codec
//! - `codebook`: the ordered, serializable encoding map
//! - `codec`: codec trait, algorithm selection, configuration
//! - `service`: request/response types for a transport layer
//! - `stats`: observable codec behavior
//!
//! # Example
//!
//! ```
//! use huffman_text_core::service::{CodecService, EncodeRequest};
//!
//! let service = CodecService::default();
//! let response = service.encode(&EncodeRequest::new("AAAB")).unwrap();
//! assert_eq!(response.encoded_text, "0 0 0 1");
//!
//! let decoded = service.decode(&response.into()).unwrap();
//! assert_eq!(decoded.decoded_text, "AAAB");
//! ```
//!
//! # Design Principles
//!
//! - **No panics**: All errors are structured and recoverable
//! - **Stateless**: Every call builds and drops its own tree and maps
//! - **Deterministic**: The same input always yields the same map

pub mod codebook;
pub mod codec;
pub mod error;
pub mod huffman;
pub mod service;
pub mod stats;
pub mod syllable;
pub mod tokenizer;

// Re-export commonly used types
pub use codebook::EncodingMap;
pub use codec::{Algorithm, CodecConfig, Encoded, TextCodec};
pub use error::{CodecError, Error, Result};
pub use huffman::{DegeneratePolicy, HuffmanCodec};
pub use service::{CodecService, DecodeRequest, DecodeResponse, EncodeRequest, EncodeResponse};
