//! Statistics collection and reporting for encode/decode runs.
//!
//! This module makes codec behavior observable:
//! - Input size, symbol count and alphabet size
//! - Encoded size in bits and average code length
//! - Shannon entropy of the symbol distribution (the lower bound the
//!   average code length is compared against)
//! - Round-trip verification and timing
//!
//! # Thread Safety
//!
//! `CodecStats` is plain data updated by one caller. Concurrent runs should
//! each keep their own instance.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::codebook::EncodingMap;

/// Statistics for one encode (and optional decode) run.
#[derive(Debug, Clone)]
pub struct CodecStats {
    // === Timing ===
    /// When the run started
    pub start_time: Instant,

    /// When the run ended (set on completion)
    pub end_time: Option<Instant>,

    // === Input ===
    /// UTF-8 bytes of the input text
    pub input_bytes: u64,

    /// Symbols produced by the tokenizer (occurrences, not distinct)
    pub symbols: u64,

    // === Encoding ===
    /// Entries in the encoding map
    pub distinct_symbols: u64,

    /// Sum of the lengths of all emitted codes
    pub encoded_bits: u64,

    /// Shannon entropy of the symbol distribution, bits per symbol
    pub entropy_bits: f64,

    // === Decoding ===
    /// UTF-8 bytes of the decoded text
    pub decoded_bytes: u64,

    /// Decoded text equals the input (None until checked)
    pub verified: Option<bool>,
}

impl CodecStats {
    /// Create new stats with start time set to now.
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            end_time: None,
            input_bytes: 0,
            symbols: 0,
            distinct_symbols: 0,
            encoded_bits: 0,
            entropy_bits: 0.0,
            decoded_bytes: 0,
            verified: None,
        }
    }

    /// Record the result of an encode call.
    ///
    /// Symbol counts are recovered from `encoded_text` and the map, so this
    /// works for any codec output, not just one produced in-process.
    pub fn record_encode(&mut self, text: &str, encoding_map: &EncodingMap, encoded_text: &str) {
        let mut code_counts: HashMap<&str, u64> = HashMap::new();
        for code in encoded_text.split_whitespace() {
            *code_counts.entry(code).or_insert(0) += 1;
        }

        self.input_bytes = text.len() as u64;
        self.distinct_symbols = encoding_map.len() as u64;
        self.symbols = code_counts.values().sum();
        self.encoded_bits = code_counts
            .iter()
            .map(|(code, count)| code.len() as u64 * count)
            .sum();
        self.entropy_bits = entropy(code_counts.values().copied(), self.symbols);
    }

    /// Record the result of a decode call and verify it against `original`.
    pub fn record_decode(&mut self, original: &str, decoded: &str) {
        self.decoded_bytes = decoded.len() as u64;
        self.verified = Some(original == decoded);
    }

    /// Mark the run as complete.
    pub fn complete(&mut self) {
        self.end_time = Some(Instant::now());
    }

    /// Get total duration (or current elapsed if not complete).
    pub fn duration(&self) -> Duration {
        match self.end_time {
            Some(end) => end.duration_since(self.start_time),
            None => self.start_time.elapsed(),
        }
    }

    /// Average code length in bits per symbol.
    ///
    /// Returns 0.0 if nothing was encoded.
    pub fn average_code_length(&self) -> f64 {
        if self.symbols == 0 {
            0.0
        } else {
            self.encoded_bits as f64 / self.symbols as f64
        }
    }

    /// Compute compression ratio (encoded bits / raw UTF-8 bits).
    pub fn compression_ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            self.encoded_bits as f64 / (self.input_bytes * 8) as f64
        }
    }

    /// Average code length over entropy; 1.0 is optimal.
    pub fn efficiency(&self) -> f64 {
        let average = self.average_code_length();
        if average == 0.0 {
            0.0
        } else {
            self.entropy_bits / average
        }
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("\n=== Codec Summary ===");
        println!("Duration: {} ms", self.duration().as_millis());
        println!();

        println!("=== Input ===");
        println!("Input: {} bytes", self.input_bytes);
        println!("Symbols: {} ({} distinct)", self.symbols, self.distinct_symbols);
        println!();

        println!("=== Encoding ===");
        println!("Encoded: {} bits ({:.1} bytes if packed)", self.encoded_bits, self.encoded_bits as f64 / 8.0);
        println!("Average code length: {:.3} bits/symbol", self.average_code_length());
        println!("Entropy: {:.3} bits/symbol", self.entropy_bits);
        println!("Efficiency: {:.1}%", self.efficiency() * 100.0);
        println!("Ratio: {:.1}%", self.compression_ratio() * 100.0);
        println!();

        match self.verified {
            Some(true) => println!("Verification: PASSED ✓ ({} bytes decoded)", self.decoded_bytes),
            Some(false) => println!("Verification: FAILED ✗ ({} bytes decoded)", self.decoded_bytes),
            None => println!("Verification: not run"),
        }
    }

    /// Export stats as a simple text format (for parsing/testing).
    pub fn export_text(&self) -> String {
        format!(
            "duration_ms={}\n\
             input_bytes={}\n\
             symbols={}\n\
             distinct_symbols={}\n\
             encoded_bits={}\n\
             average_code_length={:.4}\n\
             entropy_bits={:.4}\n\
             compression_ratio={:.4}\n\
             decoded_bytes={}\n\
             verified={}\n",
            self.duration().as_millis(),
            self.input_bytes,
            self.symbols,
            self.distinct_symbols,
            self.encoded_bits,
            self.average_code_length(),
            self.entropy_bits,
            self.compression_ratio(),
            self.decoded_bytes,
            self.verified.map_or("unknown".to_string(), |v| v.to_string()),
        )
    }
}

impl Default for CodecStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Shannon entropy in bits of a distribution given as occurrence counts.
pub fn entropy(counts: impl IntoIterator<Item = u64>, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    counts
        .into_iter()
        .filter(|&c| c > 0)
        .map(|c| {
            let p = c as f64 / total;
            -p * p.log2()
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aabc_map() -> EncodingMap {
        EncodingMap::from_pairs([("A", "0"), ("B", "10"), ("C", "11")])
    }

    #[test]
    fn test_stats_creation() {
        let stats = CodecStats::new();
        assert!(stats.end_time.is_none());
        assert!(stats.verified.is_none());
        assert!(stats.duration().as_millis() < 100);
    }

    #[test]
    fn test_record_encode() {
        let mut stats = CodecStats::new();
        stats.record_encode("AABC", &aabc_map(), "0 0 10 11");

        assert_eq!(stats.input_bytes, 4);
        assert_eq!(stats.symbols, 4);
        assert_eq!(stats.distinct_symbols, 3);
        assert_eq!(stats.encoded_bits, 6);
        assert_eq!(stats.average_code_length(), 1.5);
        assert!((stats.entropy_bits - 1.5).abs() < 1e-9);
        assert!((stats.efficiency() - 1.0).abs() < 1e-9);
        assert_eq!(stats.compression_ratio(), 6.0 / 32.0);
    }

    #[test]
    fn test_record_decode() {
        let mut stats = CodecStats::new();
        stats.record_decode("AABC", "AABC");
        assert_eq!(stats.verified, Some(true));
        assert_eq!(stats.decoded_bytes, 4);

        stats.record_decode("AABC", "AAB");
        assert_eq!(stats.verified, Some(false));
    }

    #[test]
    fn test_empty_stats_ratios() {
        let stats = CodecStats::new();
        assert_eq!(stats.average_code_length(), 0.0);
        assert_eq!(stats.compression_ratio(), 0.0);
        assert_eq!(stats.efficiency(), 0.0);
    }

    #[test]
    fn test_entropy() {
        assert_eq!(entropy([4], 4), 0.0);
        assert!((entropy([1, 1], 2) - 1.0).abs() < 1e-9);
        assert_eq!(entropy(Vec::new(), 0), 0.0);
    }

    #[test]
    fn test_export_text() {
        let mut stats = CodecStats::new();
        stats.record_encode("AABC", &aabc_map(), "0 0 10 11");
        stats.record_decode("AABC", "AABC");
        stats.complete();

        let text = stats.export_text();
        assert!(text.contains("input_bytes=4"));
        assert!(text.contains("encoded_bits=6"));
        assert!(text.contains("distinct_symbols=3"));
        assert!(text.contains("verified=true"));
    }
}
