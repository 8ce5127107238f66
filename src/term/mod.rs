extern crate ansi_term;
use crate::lang::{self, Listing, PROGRAM_MARKER};
use crate::tape::{self, Crc16, FileType, TapeConfig, TapeEncoder};
use crate::{error, Error};
use ansi_term::Style;
use clap::{Parser, Subcommand};
use log::info;
use std::fs::File;
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "hx20", version)]
#[command(about = "Epson HX-20 BASIC tokenizer and cassette encoder")]
struct Args {
    /// Log every block written
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode a BASIC program (text or tokenized) as a cassette WAV file
    Tape {
        /// BASIC source or tokenized program
        #[arg(short, long)]
        input: PathBuf,

        /// Output WAV file (11025 Hz, 8-bit mono), defaults to <input>.wav
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Program name, max 8 characters
        #[arg(short, long, default_value = "PROGRAM")]
        name: String,

        /// Peak amplitude after normalization, 0 leaves the signal as generated
        #[arg(short, long, default_value_t = 95)]
        amplitude: u8,

        /// Dump encoded block payloads
        #[arg(short, long)]
        dump: bool,

        /// Use the MSB-first CRC-CCITT block check instead of Kermit
        #[arg(long)]
        ccitt: bool,
    },
    /// Tokenize a text program, or detokenize one starting with 0xFF
    Token {
        /// Input file
        #[arg(short, long)]
        input: PathBuf,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },
}

pub fn main() {
    let args = Args::parse();
    let filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
        .format_timestamp(None)
        .init();
    let result = match args.command {
        Command::Tape {
            input,
            output,
            name,
            amplitude,
            dump,
            ccitt,
        } => {
            let config = TapeConfig {
                crc: if ccitt { Crc16::Ccitt } else { Crc16::Kermit },
                dump,
                ..TapeConfig::default()
            };
            let output = output.unwrap_or_else(|| input.with_extension("wav"));
            tape_main(&input, &output, &name, amplitude, config)
        }
        Command::Token { input, output } => token_main(&input, &output),
    };
    if let Err(error) = result {
        eprintln!("{}", Style::new().bold().paint(error.to_string()));
        std::process::exit(1);
    }
}

fn tape_main(
    input: &Path,
    output: &Path,
    name: &str,
    amplitude: u8,
    config: TapeConfig,
) -> Result<(), Error> {
    let mut program = load(input)?;
    if program.is_empty() {
        return Err(error!(EmptyInput; input.display().to_string()));
    }
    let file_type = FileType::detect(&program);
    if file_type == FileType::Ascii {
        program = tape::crlf(&program);
    }
    let name = String::from_utf8_lossy(&tape::program_name(name)).into_owned();
    info!("input file: {}", input.display());
    info!("output file: {}", output.display());
    info!("program name: {}", name);
    info!("program size: {} bytes", program.len());
    info!(
        "input is {}",
        if file_type == FileType::Ascii {
            "pure ASCII"
        } else {
            "tokenized BASIC"
        }
    );
    let sample_rate = config.sample_rate;
    let encoder = TapeEncoder::new(config);
    let mut samples = encoder.encode(&program, &name, file_type)?;
    if amplitude > 0 {
        tape::normalize(&mut samples, amplitude as f64);
    }
    tape::write_wav(output, samples.as_slice(), sample_rate)?;
    info!("WAV file created: {}", output.display());
    info!("on the HX-20 type LOAD\"CAS1:\", press RETURN and start playback");
    Ok(())
}

fn token_main(input: &Path, output: &Path) -> Result<(), Error> {
    let data = load(input)?;
    let (out, failure) = if data.first() == Some(&PROGRAM_MARKER) {
        info!("detokenizing...");
        detokenize_partial(&data)?
    } else {
        info!("tokenizing...");
        (lang::tokenize(&data)?, None)
    };
    save(output, &out)?;
    info!("input:  {} ({} bytes)", input.display(), data.len());
    info!("output: {} ({} bytes)", output.display(), out.len());
    match failure {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

/// Keeps whatever decoded cleanly; a truncated image still gets its
/// complete lines written before the error is reported.
fn detokenize_partial(data: &[u8]) -> Result<(Vec<u8>, Option<Error>), Error> {
    let listing = Listing::new(data)?;
    let mut text = Vec::new();
    for line in listing.lines() {
        match line {
            Ok(line) => {
                // Latin-1 back to bytes, the inverse of the listing's char mapping.
                text.extend(line.chars().map(|c| c as u8));
                text.push(b'\n');
            }
            Err(error) => return Ok((text, Some(error))),
        }
    }
    Ok((text, None))
}

fn load(filename: &Path) -> Result<Vec<u8>, Error> {
    let mut file = match File::open(filename) {
        Ok(file) => file,
        Err(error) => {
            let msg = format!("{}: {}", filename.display(), error);
            match error.kind() {
                ErrorKind::NotFound => return Err(error!(FileNotFound; msg)),
                _ => return Err(error!(InternalError; msg)),
            }
        }
    };
    let mut data = Vec::new();
    if let Err(error) = file.read_to_end(&mut data) {
        return Err(error!(InternalError; error.to_string()));
    }
    Ok(data)
}

fn save(filename: &Path, data: &[u8]) -> Result<(), Error> {
    let mut file = match File::create(filename) {
        Ok(file) => file,
        Err(error) => return Err(error!(InternalError; error.to_string())),
    };
    if let Err(error) = file.write_all(data) {
        return Err(error!(InternalError; error.to_string()));
    }
    Ok(())
}
