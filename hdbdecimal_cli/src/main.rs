//! `hdbdecimal`: small helpers around the HANA export tools.
//!
//! - `decode` prints wire decimals (hex or binary) the way the export tools write them,
//! - `convert` changes the field delimiter of a text file in place,
//! - `dsn` checks an export configuration file.

#![deny(clippy::all)]
#![deny(clippy::pedantic)]

use clap::{Parser, Subcommand};
use flexi_logger::{opt_format, Logger};
use hdbdecimal::{
    delimiter::{self, Delimiter},
    format_wire_decimal_with, ExportParams, HdbError, HdbResult, Rendering, WireDecimal,
    DEFAULT_CONFIG_FILE, WIRE_DECIMAL_LENGTH,
};
use log::{debug, error};
use std::{
    io::Write,
    path::{Path, PathBuf},
    process::ExitCode,
};

#[derive(Parser)]
#[command(
    name = "hdbdecimal",
    version,
    about = "Decode HANA wire decimals and prepare files for the export tools"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode 16-byte wire decimals and print them with four fractional digits
    Decode {
        #[arg(help = "Hex-encoded wire decimals, e.g. 44d612000000000000000000000038 30")]
        values: Vec<String>,
        #[arg(long, help = "Binary file with consecutive 16-byte wire decimals")]
        file: Option<PathBuf>,
        #[arg(long, help = "Render exactly instead of via f64")]
        exact: bool,
    },
    /// Replace the field delimiter of a text file in place
    Convert {
        #[arg(short = 'f', long = "file", help = "Filename to convert the delimiter")]
        file: PathBuf,
        #[arg(
            long,
            default_value = "TAB",
            help = "From delimiter (TAB, SEMICOLON, SPACE)"
        )]
        from: String,
        #[arg(
            long,
            default_value = "SEMICOLON",
            help = "To delimiter (TAB, SEMICOLON, SPACE)"
        )]
        to: String,
        #[arg(short = 'v', long, help = "Print the content before and after")]
        verbose: bool,
    },
    /// Read an export configuration and print the connection URL (without password)
    Dsn {
        #[arg(short = 'c', long = "config", default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let _log_handle = match Logger::try_with_env_or_str("info")
        .and_then(|logger| logger.format(opt_format).start())
    {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("Logger initialization failed with {e}");
            None
        }
    };

    let result = run(cli.command, &mut std::io::stdout().lock());
    ExitCode::from(report(&result))
}

// Logs the error chain and returns the process exit code.
fn report(result: &HdbResult<()>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            error!("{e}");
            let mut source = e.inner();
            while let Some(s) = source {
                error!("  caused by: {s}");
                source = s.source();
            }
            1
        }
    }
}

fn run<W: Write>(command: Command, out: &mut W) -> HdbResult<()> {
    match command {
        Command::Decode {
            values,
            file,
            exact,
        } => {
            let rendering = if exact {
                Rendering::Exact
            } else {
                Rendering::Legacy
            };
            decode(&values, file.as_deref(), rendering, out)
        }
        Command::Convert {
            file,
            from,
            to,
            verbose,
        } => convert(
            &file,
            Delimiter::source_or_default(&from),
            Delimiter::target_or_default(&to),
            verbose,
            out,
        ),
        Command::Dsn { config } => dsn(&config, out),
    }
}

fn decode<W: Write>(
    values: &[String],
    file: Option<&Path>,
    rendering: Rendering,
    out: &mut W,
) -> HdbResult<()> {
    for value in values {
        write_decoded(&parse_hex(value)?, rendering, out)?;
    }
    if let Some(path) = file {
        let buf = std::fs::read(path)?;
        if buf.len() % WIRE_DECIMAL_LENGTH != 0 {
            return Err(HdbError::UsageDetailed(format!(
                "file size {} is not a multiple of {WIRE_DECIMAL_LENGTH}",
                buf.len()
            )));
        }
        let mut cursor = &buf[..];
        while !cursor.is_empty() {
            write_decoded(&WireDecimal::parse(&mut cursor)?, rendering, out)?;
        }
    }
    Ok(())
}

fn convert<W: Write>(
    file: &Path,
    from: Delimiter,
    to: Delimiter,
    verbose: bool,
    out: &mut W,
) -> HdbResult<()> {
    if verbose {
        writeln!(out, "From:\n{}", std::fs::read_to_string(file)?)?;
    }
    let converted = delimiter::convert_file(file, from, to)?;
    if verbose {
        writeln!(out, "\nTo:\n{converted}")?;
    }
    Ok(())
}

fn dsn<W: Write>(config: &Path, out: &mut W) -> HdbResult<()> {
    let params = ExportParams::from_file(config)?;
    writeln!(out, "{params}")?;
    writeln!(
        out,
        "extension: {}",
        params.extension().unwrap_or("(none, files get no extension)")
    )?;
    Ok(())
}

// Accepts plain hex as well as the "ab:cd:.." notation and embedded whitespace.
fn parse_hex(value: &str) -> HdbResult<WireDecimal> {
    let cleaned: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':')
        .collect();
    let bytes = hex::decode(cleaned)?;
    debug!("{value} -> {} bytes", bytes.len());
    WireDecimal::from_slice(&bytes)
}

// NULL prints as an empty line, like the empty CSV field.
fn write_decoded<W: Write>(wire: &WireDecimal, rendering: Rendering, out: &mut W) -> HdbResult<()> {
    writeln!(out, "{}", format_wire_decimal_with(wire.as_bytes(), rendering)?)?;
    Ok(())
}
