//! Configuration for the huffman-text application.
//!
//! Handles parsing command-line arguments and resolving sensible defaults
//! (including a sample text that is reproducible with a seed).
//!
//! # Philosophy
//!
//! `encode` and `roundtrip` work with ZERO arguments, generating their own
//! input. The resolved configuration can be printed so runs are reproducible.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::PathBuf;

use huffman_text_core::{Algorithm, CodecConfig, DegeneratePolicy, Error, Result};

use crate::input_gen::generate_sample_text;

/// huffman-text: Huffman text codec with per-syllable tokenization
#[derive(clap::Parser, Debug)]
#[command(name = "huffman-text", version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Flags shared by every subcommand.
#[derive(clap::Args, Debug, Clone)]
pub struct CommonArgs {
    /// Log level (error, warn, info, debug, trace); RUST_LOG overrides
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Print resolved configuration
    #[arg(long, global = true)]
    pub print_config: bool,

    /// Don't print the stats summary
    #[arg(long, global = true)]
    pub no_stats: bool,

    /// Fail on input with a single distinct symbol instead of coding it as "0"
    #[arg(long, global = true)]
    pub reject_degenerate: bool,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Encode text and write the encoding map and codes as JSON
    Encode {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Decode a JSON document holding `encoded_text` and `encoding_map`
    Decode {
        /// Input JSON file; "-" or absent reads stdin
        #[arg(long)]
        input: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Encode, decode and verify the result
    Roundtrip {
        #[command(flatten)]
        source: SourceArgs,
    },
}

/// Where the text to encode comes from.
#[derive(clap::Args, Debug, Clone)]
pub struct SourceArgs {
    /// Text to encode
    #[arg(long, conflicts_with = "input")]
    pub text: Option<String>,

    /// Input text file; "-" reads stdin
    #[arg(long)]
    pub input: Option<String>,

    /// Split words into syllables instead of characters
    #[arg(long)]
    pub syllables: bool,

    /// Encoding algorithm
    #[arg(long, default_value = "huffman")]
    pub algorithm: String,

    /// Random seed for the generated sample text (default: time-based)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Words in the generated sample text
    #[arg(long, default_value_t = 120)]
    pub sample_words: usize,
}

/// Output argument group.
#[derive(clap::Args, Debug, Clone)]
pub struct OutputArgs {
    /// Output file; "-" or absent writes stdout
    #[arg(long)]
    pub output: Option<String>,
}

/// Resolved text source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextSource {
    Inline,
    Stdin,
    File(PathBuf),
    /// `generated` is set when the seed came from the clock
    Sample { seed: u64, words: usize, generated: bool },
}

/// Complete configuration for a run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Where the input text came from
    pub source: TextSource,

    /// The text to encode (empty for `decode`)
    pub text: String,

    /// Algorithm name as requested
    pub algorithm: String,

    /// Per-syllable tokenization
    pub separate_syllables: bool,

    /// Policy for single-symbol input
    pub degenerate_policy: DegeneratePolicy,

    /// Output file path (None = stdout)
    pub output_file: Option<PathBuf>,

    /// Whether to print detailed config
    pub print_config: bool,

    /// Whether to print the stats summary
    pub print_stats: bool,
}

fn squash_standard_io(path: Option<&str>) -> Option<PathBuf> {
    match path {
        Some("-") | None => None,
        Some(p) => Some(PathBuf::from(p)),
    }
}

impl Config {
    /// Resolve the text to encode and the shared flags.
    ///
    /// With neither `--text` nor `--input`, generates sample text from
    /// `--seed`, or from a time-based seed when none is given.
    pub fn for_source(source: &SourceArgs, output: Option<&OutputArgs>, common: &CommonArgs) -> Result<Self> {
        let (source_kind, text) = match (&source.text, &source.input) {
            (Some(text), _) => (TextSource::Inline, text.clone()),
            (None, Some(input)) => match squash_standard_io(Some(input.as_str())) {
                None => (TextSource::Stdin, read_to_string(None)?),
                Some(path) => {
                    let text = read_to_string(Some(&path))?;
                    (TextSource::File(path), text)
                }
            },
            (None, None) => {
                let seed = source.seed.unwrap_or_else(time_seed);
                let text = generate_sample_text(seed, source.sample_words);
                (
                    TextSource::Sample {
                        seed,
                        words: source.sample_words,
                        generated: source.seed.is_none(),
                    },
                    text,
                )
            }
        };

        Ok(Config {
            source: source_kind,
            text,
            algorithm: source.algorithm.clone(),
            separate_syllables: source.syllables,
            degenerate_policy: policy(common),
            output_file: output.and_then(|o| squash_standard_io(o.output.as_deref())),
            print_config: common.print_config,
            print_stats: !common.no_stats,
        })
    }

    /// Resolve configuration for `decode`; the document is read separately.
    pub fn for_decode(input: &Option<String>, output: &OutputArgs, common: &CommonArgs) -> Self {
        let source = match squash_standard_io(input.as_deref()) {
            None => TextSource::Stdin,
            Some(path) => TextSource::File(path),
        };

        Config {
            source,
            text: String::new(),
            algorithm: Algorithm::Huffman.name().to_string(),
            separate_syllables: false,
            degenerate_policy: policy(common),
            output_file: squash_standard_io(output.output.as_deref()),
            print_config: common.print_config,
            print_stats: !common.no_stats,
        }
    }

    /// Codec configuration for this run.
    pub fn codec_config(&self) -> CodecConfig {
        CodecConfig::default().with_degenerate_policy(self.degenerate_policy)
    }

    /// Read the decode input document.
    pub fn read_source(&self) -> Result<String> {
        match &self.source {
            TextSource::File(path) => read_to_string(Some(path)),
            TextSource::Stdin => read_to_string(None),
            TextSource::Inline | TextSource::Sample { .. } => Ok(self.text.clone()),
        }
    }

    /// Open a writer for the output.
    pub fn open_writer(&self) -> Result<Box<dyn Write>> {
        Ok(match &self.output_file {
            Some(path) => Box::new(BufWriter::new(File::create(path)?)),
            None => Box::new(BufWriter::new(std::io::stdout().lock())),
        })
    }

    /// Line to report a clock-derived sample seed, so the text can be regenerated.
    pub fn seed_notice(&self) -> Option<String> {
        match self.source {
            TextSource::Sample {
                seed,
                words,
                generated: true,
            } => Some(format!(
                "sample text: seed {seed} ({words} words); rerun with --seed {seed} to reproduce"
            )),
            _ => None,
        }
    }

    /// Print the configuration in human-readable form.
    ///
    /// Goes to stderr so it never mixes with JSON on stdout.
    pub fn print(&self) {
        eprintln!("=== Configuration ===");
        match &self.source {
            TextSource::Inline => eprintln!("Input: --text ({} bytes)", self.text.len()),
            TextSource::Stdin => eprintln!("Input: stdin"),
            TextSource::File(path) => eprintln!("Input: {}", path.display()),
            TextSource::Sample { seed, words, .. } => {
                eprintln!("Input: generated sample ({} words)", words);
                eprintln!("Seed: {}", seed);
            }
        }
        eprintln!(
            "Output: {}",
            self.output_file
                .as_ref()
                .map_or("stdout".to_string(), |p| p.display().to_string())
        );
        eprintln!();
        eprintln!("=== Codec ===");
        eprintln!("Algorithm: {}", self.algorithm);
        eprintln!("Separate syllables: {}", self.separate_syllables);
        eprintln!("Degenerate policy: {:?}", self.degenerate_policy);
        eprintln!();
    }
}

fn policy(common: &CommonArgs) -> DegeneratePolicy {
    if common.reject_degenerate {
        DegeneratePolicy::Reject
    } else {
        DegeneratePolicy::OneBitCode
    }
}

fn time_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis() as u64)
}

fn read_to_string(path: Option<&PathBuf>) -> Result<String> {
    let mut text = String::new();
    match path {
        Some(path) => {
            File::open(path)?.read_to_string(&mut text)?;
        }
        None => {
            std::io::stdin().lock().read_to_string(&mut text)?;
        }
    }
    Ok(text)
}

/// Parse a log level name for the logger.
pub fn parse_log_level(level: &str) -> Result<log::LevelFilter> {
    level
        .parse()
        .map_err(|_| Error::Config(format!("invalid log level: {level:?}")))
}
