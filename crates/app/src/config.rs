//! Configuration for the staircase application.
//!
//! Command-line arguments are parsed with clap and then resolved into a
//! [`Config`]: framing flags become a [`CodecConfig`], and the demo's seed is
//! fixed (time-based unless given) so every run can be reproduced.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use staircase_core::{CodecConfig, Error, HeaderFormat, Result};

#[derive(Parser, Debug)]
#[command(name = "staircase", version, about = "Rank-based staircase codec")]
pub struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Print the resolved configuration before running
    #[arg(long, global = true)]
    pub print_config: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compress a file
    Compress {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
        #[command(flatten)]
        framing: FramingArgs,
        /// Print a compression summary
        #[arg(long)]
        stats: bool,
    },
    /// Decompress a file
    Decompress {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
        #[command(flatten)]
        framing: FramingArgs,
    },
    /// Round-trip growing prefixes of a sample text and report sizes
    Demo {
        /// Text to use instead of generated sample text
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Seed for sample generation
        #[arg(long)]
        seed: Option<u64>,
        /// Length of generated sample text
        #[arg(long, default_value_t = 4096)]
        size: usize,
        #[command(flatten)]
        framing: FramingArgs,
    },
}

/// Header framing flags shared by all subcommands.
#[derive(Args, Debug, Clone, Default)]
pub struct FramingArgs {
    /// Frame the header with a u16 symbol count instead of a delimiter
    #[arg(long, conflicts_with = "delimiter")]
    pub length_prefixed: bool,

    /// Delimiter byte: a number (167, 0xa7) or a single ASCII character
    #[arg(long, value_name = "BYTE")]
    pub delimiter: Option<String>,
}

impl FramingArgs {
    fn codec_config(&self) -> Result<CodecConfig> {
        if self.length_prefixed {
            return Ok(CodecConfig::length_prefixed());
        }
        match &self.delimiter {
            Some(text) => Ok(CodecConfig::delimited(parse_byte(text)?)),
            None => Ok(CodecConfig::default()),
        }
    }
}

/// What the application will do.
#[derive(Debug, Clone)]
pub enum Mode {
    Compress {
        input: PathBuf,
        output: PathBuf,
        stats: bool,
    },
    Decompress {
        input: PathBuf,
        output: PathBuf,
    },
    Demo {
        /// None = generate sample text
        input: Option<PathBuf>,
        seed: u64,
        size: usize,
    },
}

/// Complete configuration for a run.
#[derive(Debug, Clone)]
pub struct Config {
    pub mode: Mode,

    pub codec: CodecConfig,

    /// Whether to print the resolved configuration
    pub print_config: bool,
}

impl Config {
    /// Resolve parsed arguments into a configuration.
    ///
    /// # Errors
    /// `Error::Config` for an unparseable delimiter or an empty demo size.
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let (mode, codec) = match cli.command {
            Command::Compress {
                input,
                output,
                framing,
                stats,
            } => (
                Mode::Compress {
                    input,
                    output,
                    stats,
                },
                framing.codec_config()?,
            ),
            Command::Decompress {
                input,
                output,
                framing,
            } => (Mode::Decompress { input, output }, framing.codec_config()?),
            Command::Demo {
                input,
                seed,
                size,
                framing,
            } => {
                if input.is_none() && size == 0 {
                    return Err(Error::Config("--size must be positive".to_string()));
                }
                // Determine seed (explicit or time-based)
                let seed = seed.unwrap_or_else(time_seed);
                (Mode::Demo { input, seed, size }, framing.codec_config()?)
            }
        };

        Ok(Config {
            mode,
            codec,
            print_config: cli.print_config,
        })
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        println!("=== Configuration ===");
        match &self.mode {
            Mode::Compress { input, output, .. } => {
                println!("Mode:   compress");
                println!("Input:  {}", input.display());
                println!("Output: {}", output.display());
            }
            Mode::Decompress { input, output } => {
                println!("Mode:   decompress");
                println!("Input:  {}", input.display());
                println!("Output: {}", output.display());
            }
            Mode::Demo { input, seed, size } => {
                println!("Mode:   demo");
                match input {
                    Some(path) => println!("Input:  {}", path.display()),
                    None => println!("Input:  (generated, {} bytes, seed {})", size, seed),
                }
            }
        }
        match self.codec.header {
            HeaderFormat::Delimited { delimiter } => {
                println!("Header: delimited by {:#04x}", delimiter)
            }
            HeaderFormat::LengthPrefixed => println!("Header: u16 length prefix"),
        }
        println!();
    }
}

fn time_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Parse a byte given as decimal, `0x`-prefixed hex, or a single ASCII
/// character.
fn parse_byte(text: &str) -> Result<u8> {
    let invalid = || Error::Config(format!("invalid delimiter byte: {:?}", text));

    if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        return u8::from_str_radix(hex, 16).map_err(|_| invalid());
    }
    if let Ok(value) = text.parse::<u8>() {
        return Ok(value);
    }

    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() => Ok(c as u8),
        _ => Err(invalid()),
    }
}
