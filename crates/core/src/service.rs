//! Request/response boundary consumed by a transport layer.
//!
//! ```text
//! EncodeRequest  { text, algorithm?, separate_syllables = false }
//! EncodeResponse { encoding_map, encoded_text }
//! DecodeRequest  { encoded_text, encoding_map, algorithm? }
//! DecodeResponse { decoded_text }
//! ```
//!
//! The service is stateless: each call resolves its algorithm against the
//! configuration, builds a codec, runs it and drops it. A request without an
//! `algorithm` uses the configuration's default algorithm.

use serde::{Deserialize, Serialize};

use crate::codebook::EncodingMap;
use crate::codec::{CodecConfig, Encoded};
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodeRequest {
    pub text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<String>,

    #[serde(default)]
    pub separate_syllables: bool,
}

impl EncodeRequest {
    /// Request with the configured default algorithm, per-character tokenization.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            algorithm: None,
            separate_syllables: false,
        }
    }

    pub fn with_syllables(mut self, separate_syllables: bool) -> Self {
        self.separate_syllables = separate_syllables;
        self
    }

    pub fn with_algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.algorithm = Some(algorithm.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodeResponse {
    pub encoding_map: EncodingMap,
    pub encoded_text: String,
}

impl From<Encoded> for EncodeResponse {
    fn from(encoded: Encoded) -> Self {
        Self {
            encoding_map: encoded.encoding_map,
            encoded_text: encoded.encoded_text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeRequest {
    pub encoded_text: String,
    pub encoding_map: EncodingMap,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<String>,
}

impl DecodeRequest {
    pub fn new(encoded_text: impl Into<String>, encoding_map: EncodingMap) -> Self {
        Self {
            encoded_text: encoded_text.into(),
            encoding_map,
            algorithm: None,
        }
    }

    pub fn with_algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.algorithm = Some(algorithm.into());
        self
    }
}

impl From<EncodeResponse> for DecodeRequest {
    fn from(response: EncodeResponse) -> Self {
        Self::new(response.encoded_text, response.encoding_map)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeResponse {
    pub decoded_text: String,
}

/// Stateless front door to the codecs registered in a [`CodecConfig`].
#[derive(Debug, Clone, Default)]
pub struct CodecService {
    config: CodecConfig,
}

impl CodecService {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Encode the request's text with the requested algorithm.
    ///
    /// # Errors
    /// - `Error::UnknownAlgorithm` for an unregistered algorithm name
    /// - `CodecError::EmptyInput` for empty text
    /// - `CodecError::DegenerateAlphabet` under the rejecting policy
    pub fn encode(&self, request: &EncodeRequest) -> Result<EncodeResponse> {
        let codec = self.config.codec_or_default(request.algorithm.as_deref())?;
        log::debug!(
            "encode: algorithm={} separate_syllables={} text_bytes={}",
            codec.name(),
            request.separate_syllables,
            request.text.len()
        );
        let encoded = codec.encode(&request.text, request.separate_syllables)?;
        Ok(encoded.into())
    }

    /// Decode the request's codes with the requested algorithm.
    ///
    /// # Errors
    /// - `Error::UnknownAlgorithm` for an unregistered algorithm name
    /// - `CodecError::DecodeLookupFailure` for a code missing from the map
    /// - `CodecError::DuplicateCode` for a map that is not bijective
    pub fn decode(&self, request: &DecodeRequest) -> Result<DecodeResponse> {
        let codec = self.config.codec_or_default(request.algorithm.as_deref())?;
        log::debug!(
            "decode: algorithm={} map_entries={}",
            codec.name(),
            request.encoding_map.len()
        );
        let decoded_text = codec.decode(&request.encoded_text, &request.encoding_map)?;
        Ok(DecodeResponse { decoded_text })
    }
}
