//! huffman-text: encode, decode and round-trip text through the Huffman codec.
//!
//! ```text
//! huffman-text encode --text "Hola, mundo" --syllables > encoded.json
//! huffman-text decode --input encoded.json
//! huffman-text roundtrip --seed 42 --syllables
//! ```

mod config;
mod input_gen;

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use huffman_text_core::stats::CodecStats;
use huffman_text_core::{CodecService, DecodeRequest, EncodeRequest, Result};

use config::{parse_log_level, Args, Command, Config};

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(err) = init_logging(&args.common.log_level) {
        eprintln!("error: {err}");
        return ExitCode::FAILURE;
    }

    match run(args) {
        Ok(code) => code,
        Err(err) => {
            log::debug!("run failed: {err:?}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(level: &str) -> Result<()> {
    env_logger::Builder::new()
        .filter_level(parse_log_level(level)?)
        .parse_default_env()
        .init();
    Ok(())
}

fn run(args: Args) -> Result<ExitCode> {
    match &args.command {
        Command::Encode { source, output } => {
            let config = Config::for_source(source, Some(output), &args.common)?;
            report_seed(&config);
            run_encode(&config)
        }
        Command::Decode { input, output } => {
            let config = Config::for_decode(input, output, &args.common);
            run_decode(&config)
        }
        Command::Roundtrip { source } => {
            let config = Config::for_source(source, None, &args.common)?;
            report_seed(&config);
            run_roundtrip(&config)
        }
    }
}

// stdout may carry the JSON document
fn report_seed(config: &Config) {
    if let Some(notice) = config.seed_notice() {
        log::info!("{notice}");
        eprintln!("{notice}");
    }
}

fn encode_request(config: &Config) -> EncodeRequest {
    EncodeRequest::new(config.text.as_str())
        .with_syllables(config.separate_syllables)
        .with_algorithm(config.algorithm.as_str())
}

fn run_encode(config: &Config) -> Result<ExitCode> {
    if config.print_config {
        config.print();
    }

    let service = CodecService::new(config.codec_config());
    let mut stats = CodecStats::new();

    let response = service.encode(&encode_request(config))?;
    stats.record_encode(&config.text, &response.encoding_map, &response.encoded_text);
    stats.complete();

    let mut writer = config.open_writer()?;
    serde_json::to_writer_pretty(&mut writer, &response)?;
    writeln!(writer)?;
    writer.flush()?;

    log::info!(
        "encoded {} symbols with {} distinct codes",
        stats.symbols,
        stats.distinct_symbols
    );
    // The summary would interleave with JSON on stdout
    if config.print_stats && config.output_file.is_some() {
        stats.print_summary();
    }

    Ok(ExitCode::SUCCESS)
}

fn run_decode(config: &Config) -> Result<ExitCode> {
    if config.print_config {
        config.print();
    }

    let document = config.read_source()?;
    let request: DecodeRequest = serde_json::from_str(&document)?;

    let service = CodecService::new(config.codec_config());
    let response = service.decode(&request)?;

    let mut writer = config.open_writer()?;
    writer.write_all(response.decoded_text.as_bytes())?;
    writer.flush()?;

    log::info!(
        "decoded {} bytes from {} map entries",
        response.decoded_text.len(),
        request.encoding_map.len()
    );

    Ok(ExitCode::SUCCESS)
}

fn run_roundtrip(config: &Config) -> Result<ExitCode> {
    if config.print_config {
        config.print();
    }

    let service = CodecService::new(config.codec_config());
    let mut stats = CodecStats::new();

    let encoded = service.encode(&encode_request(config))?;
    stats.record_encode(&config.text, &encoded.encoding_map, &encoded.encoded_text);

    let mut request = DecodeRequest::from(encoded);
    request.algorithm = Some(config.algorithm.clone());
    let decoded = service.decode(&request)?;
    stats.record_decode(&config.text, &decoded.decoded_text);
    stats.complete();

    if config.print_stats {
        stats.print_summary();
    }

    if stats.verified == Some(true) {
        println!("✓ Round trip completed successfully");
        println!(
            "  {} symbols, {} bits in {} ms",
            stats.symbols,
            stats.encoded_bits,
            stats.duration().as_millis()
        );
        Ok(ExitCode::SUCCESS)
    } else {
        log::error!("decoded text differs from input");
        println!(
            "✗ Round trip failed: decoded {} bytes, expected {}",
            stats.decoded_bytes, stats.input_bytes
        );
        Ok(ExitCode::FAILURE)
    }
}
