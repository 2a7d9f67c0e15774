//! Codec interface, algorithm selection and configuration.
//!
//! Algorithms form a closed set ([`Algorithm`]) behind one capability
//! interface ([`TextCodec`]). Which algorithms are available, and how they
//! behave, is decided by an explicitly constructed [`CodecConfig`] that is
//! never mutated after it is built.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::codebook::EncodingMap;
use crate::error::{Error, Result};
use crate::huffman::{DegeneratePolicy, HuffmanCodec};
use crate::syllable::{Syllabifier, SpanishSyllabifier};

/// Output of [`TextCodec::encode`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encoded {
    /// Symbol -> code map needed to invert `encoded_text`
    pub encoding_map: EncodingMap,

    /// One code per symbol occurrence, joined by single spaces
    pub encoded_text: String,
}

/// A text encoder/decoder pair.
pub trait TextCodec: Send + Sync {
    /// Registered name of the algorithm.
    fn name(&self) -> &'static str;

    /// Encode `text`, splitting words into syllables when
    /// `separate_syllables` is set.
    fn encode(&self, text: &str, separate_syllables: bool) -> Result<Encoded>;

    /// Reconstruct text from space-separated codes and their map.
    fn decode(&self, encoded_text: &str, encoding_map: &EncodingMap) -> Result<String>;
}

/// Every algorithm this crate knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Huffman,
}

impl Algorithm {
    pub const ALL: [Algorithm; 1] = [Algorithm::Huffman];

    /// Name used in requests.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Huffman => "huffman",
        }
    }

    /// Build the codec for this algorithm under `config`.
    pub fn build(self, config: &CodecConfig) -> Box<dyn TextCodec> {
        match self {
            Algorithm::Huffman => Box::new(HuffmanCodec::new(
                config.degenerate_policy,
                Arc::clone(&config.syllabifier),
            )),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        Algorithm::ALL
            .into_iter()
            .find(|a| a.name() == name)
            .ok_or_else(|| Error::UnknownAlgorithm {
                name: name.to_string(),
            })
    }
}

/// Immutable codec configuration.
///
/// # Example
/// ```
/// use huffman_text_core::codec::CodecConfig;
/// use huffman_text_core::huffman::DegeneratePolicy;
///
/// let config = CodecConfig::default().with_degenerate_policy(DegeneratePolicy::Reject);
/// let codec = config.codec("huffman").unwrap();
/// assert!(codec.encode("aaaa", false).is_err());
/// ```
#[derive(Clone)]
pub struct CodecConfig {
    algorithms: Vec<Algorithm>,
    default_algorithm: Algorithm,
    degenerate_policy: DegeneratePolicy,
    syllabifier: Arc<dyn Syllabifier>,
}

impl CodecConfig {
    /// Configuration with only `algorithm` registered, used as the default.
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithms: vec![algorithm],
            default_algorithm: algorithm,
            degenerate_policy: DegeneratePolicy::default(),
            syllabifier: Arc::new(SpanishSyllabifier),
        }
    }

    pub fn with_degenerate_policy(mut self, policy: DegeneratePolicy) -> Self {
        self.degenerate_policy = policy;
        self
    }

    pub fn with_syllabifier(mut self, syllabifier: Arc<dyn Syllabifier>) -> Self {
        self.syllabifier = syllabifier;
        self
    }

    /// Register an additional algorithm.
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        if !self.algorithms.contains(&algorithm) {
            self.algorithms.push(algorithm);
        }
        self
    }

    /// Make `algorithm` the default, registering it if necessary.
    pub fn with_default_algorithm(self, algorithm: Algorithm) -> Self {
        let mut config = self.with_algorithm(algorithm);
        config.default_algorithm = algorithm;
        config
    }

    pub fn algorithms(&self) -> &[Algorithm] {
        &self.algorithms
    }

    pub fn default_algorithm(&self) -> Algorithm {
        self.default_algorithm
    }

    pub fn degenerate_policy(&self) -> DegeneratePolicy {
        self.degenerate_policy
    }

    /// Resolve a request's algorithm name against the registered set.
    ///
    /// # Errors
    /// `Error::UnknownAlgorithm` if the name is not a known algorithm or
    /// is not registered in this configuration.
    pub fn resolve(&self, name: &str) -> Result<Algorithm> {
        let algorithm: Algorithm = name.parse()?;
        if self.algorithms.contains(&algorithm) {
            Ok(algorithm)
        } else {
            Err(Error::UnknownAlgorithm {
                name: name.to_string(),
            })
        }
    }

    /// Resolve `name` and build its codec.
    pub fn codec(&self, name: &str) -> Result<Box<dyn TextCodec>> {
        Ok(self.resolve(name)?.build(self))
    }

    /// Build the codec for `name`, or for the default algorithm when absent.
    pub fn codec_or_default(&self, name: Option<&str>) -> Result<Box<dyn TextCodec>> {
        match name {
            Some(name) => self.codec(name),
            None => Ok(self.default_algorithm.build(self)),
        }
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self::new(Algorithm::Huffman)
    }
}

impl fmt::Debug for CodecConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodecConfig")
            .field("algorithms", &self.algorithms)
            .field("default_algorithm", &self.default_algorithm)
            .field("degenerate_policy", &self.degenerate_policy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_names() {
        assert_eq!("huffman".parse::<Algorithm>().unwrap(), Algorithm::Huffman);
        assert_eq!(Algorithm::Huffman.to_string(), "huffman");
    }

    #[test]
    fn test_unknown_algorithm() {
        let err = "Huffman".parse::<Algorithm>().unwrap_err();
        assert!(matches!(err, Error::UnknownAlgorithm { ref name } if name == "Huffman"));

        let err = CodecConfig::default().codec("invalid").err().unwrap();
        assert!(matches!(err, Error::UnknownAlgorithm { .. }));
    }

    #[test]
    fn test_default_config() {
        let config = CodecConfig::default();
        assert_eq!(config.algorithms(), &[Algorithm::Huffman]);
        assert_eq!(config.default_algorithm(), Algorithm::Huffman);
        assert_eq!(config.degenerate_policy(), DegeneratePolicy::OneBitCode);
    }

    #[test]
    fn test_codec_or_default() {
        let config = CodecConfig::default().with_default_algorithm(Algorithm::Huffman);
        assert_eq!(config.codec_or_default(None).unwrap().name(), "huffman");
        assert_eq!(config.codec_or_default(Some("huffman")).unwrap().name(), "huffman");
        assert!(matches!(
            config.codec_or_default(Some("lz77")),
            Err(Error::UnknownAlgorithm { .. })
        ));
    }

    #[test]
    fn test_with_algorithm_is_idempotent() {
        let config = CodecConfig::default()
            .with_algorithm(Algorithm::Huffman)
            .with_default_algorithm(Algorithm::Huffman);
        assert_eq!(config.algorithms().len(), 1);
    }

    #[test]
    fn test_built_codec_uses_config() {
        let codec = CodecConfig::default()
            .with_degenerate_policy(DegeneratePolicy::Reject)
            .codec("huffman")
            .unwrap();
        assert_eq!(codec.name(), "huffman");
        assert!(codec.encode("zz", false).is_err());
        assert!(codec.encode("zy", false).is_ok());
    }

    #[test]
    fn test_custom_syllabifier() {
        struct Whole;
        impl Syllabifier for Whole {
            fn syllabify(&self, word: &str) -> Vec<String> {
                vec![word.to_string()]
            }
        }

        let codec = CodecConfig::default()
            .with_syllabifier(Arc::new(Whole))
            .codec("huffman")
            .unwrap();
        let encoded = codec.encode("casa casa", true).unwrap();
        assert_eq!(encoded.encoding_map.len(), 2);
        assert!(encoded.encoding_map.get("casa").is_some());
    }
}
