mod config;
mod input_gen;

use std::fs;
use std::io::Write;

use clap::Parser;
use log::{info, LevelFilter};
use staircase_core::{Codec, LogTrace};

use config::{Cli, Config, Mode};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::from_cli(cli)?;
    if config.print_config {
        config.print();
    }

    let codec = Codec::new(config.codec);

    match config.mode {
        Mode::Compress {
            input,
            output,
            stats,
        } => {
            let text = fs::read(&input)?;
            let (message, summary) = codec.compress_with_stats(&text)?;
            fs::write(&output, &message)?;
            info!(
                "{} -> {}: {} -> {} bytes",
                input.display(),
                output.display(),
                text.len(),
                message.len()
            );
            if stats {
                summary.print_summary();
            }
        }
        Mode::Decompress { input, output } => {
            let message = fs::read(&input)?;
            let text = codec.decompress_traced(&message, &mut LogTrace)?;
            fs::write(&output, &text)?;
            info!(
                "{} -> {}: {} -> {} bytes",
                input.display(),
                output.display(),
                message.len(),
                text.len()
            );
        }
        Mode::Demo { input, seed, size } => {
            let text = match input {
                Some(path) => fs::read(path)?,
                None => input_gen::generate_sample_text(seed, size),
            };
            run_demo(&codec, &text)?;
        }
    }

    Ok(())
}

/// Round-trip prefixes of `text` of doubling length, then the whole text.
fn run_demo(codec: &Codec, text: &[u8]) -> Result<(), Box<dyn std::error::Error>> {
    let mut sizes: Vec<usize> = std::iter::successors(Some(32usize), |n| n.checked_mul(2))
        .take_while(|&n| n < text.len())
        .collect();
    sizes.push(text.len());

    println!("{:>8} {:>8} {:>8} {:>8} {:>7}  result", "input", "header", "payload", "total", "ratio");

    let mut last = None;
    for n in sizes {
        let prefix = &text[..n];
        let (message, stats) = codec.compress_with_stats(prefix)?;
        let decoded = codec.decompress_traced(&message, &mut LogTrace)?;
        let ok = stats.verify(&decoded);

        println!(
            "{:>8} {:>8} {:>8} {:>8} {:>6.1}%  {}",
            n,
            stats.header_bytes,
            stats.payload_bytes,
            stats.total_bytes(),
            stats.compression_ratio() * 100.0,
            if ok { "ok" } else { "MISMATCH" }
        );

        if !ok {
            return Err(format!("round trip of {} bytes did not match", n).into());
        }
        last = Some(stats);
    }

    if let Some(stats) = last {
        stats.print_summary();
        println!("✓ Round trip verified (crc32 {:#010x})", stats.input_crc32);
    }
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();
}
