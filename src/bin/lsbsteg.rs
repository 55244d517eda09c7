// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Command-line front end for the LSB steganography engine.
//!
//! ```bash
//! lsbsteg encode cover.png stego.png --message "meet at noon" --password hunter2
//! lsbsteg decode stego.png --password hunter2
//! lsbsteg capacity cover.png --encrypted
//! ```
//!
//! The password may also be supplied through `LSBSTEG_PASSWORD`.
//! Exit status: 0 on success, 1 on error, 2 when no hidden message was found.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Builder;
use log::LevelFilter;

use lsbsteg_core::{estimate_capacity, PixelGrid};

/// Hide and recover text in PNG/BMP images.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log pipeline stages (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Hide a message in a cover image
    Encode {
        /// Cover image (PNG or BMP)
        input: PathBuf,

        /// Output image; must be .png or .bmp (.png is appended if there is no extension)
        output: PathBuf,

        /// Message text
        #[arg(short, long, required_unless_present = "message_file", conflicts_with = "message_file")]
        message: Option<String>,

        /// Read the message text from a file
        #[arg(long)]
        message_file: Option<PathBuf>,

        /// Encrypt the message with this password
        #[arg(short, long, env = "LSBSTEG_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Recover a hidden message
    Decode {
        /// Stego image
        input: PathBuf,

        /// Password used when encoding
        #[arg(short, long, env = "LSBSTEG_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Show how many message bytes an image can hold
    Capacity {
        /// Cover image
        input: PathBuf,

        /// Account for password envelope overhead
        #[arg(long)]
        encrypted: bool,
    },
}

/// Initialize logging to stderr. `--verbose` raises the default level to
/// debug; `RUST_LOG` takes precedence over both.
fn init_logger(verbose: bool) {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };
    Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] [{}] [{}] {}",
                buf.timestamp(),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logger(args.verbose);

    match run(args.command) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<ExitCode> {
    match command {
        Command::Encode { input, output, message, message_file, password } => {
            let message = match (message, message_file) {
                (Some(text), _) => text,
                (None, Some(path)) => std::fs::read_to_string(&path)
                    .with_context(|| format!("reading message from {}", path.display()))?,
                (None, None) => bail!("no message given"),
            };
            if message.is_empty() {
                bail!("message is empty");
            }

            let output = if output.extension().is_none() {
                output.with_extension("png")
            } else {
                output
            };

            lsbsteg_core::encode_file(&input, &output, &message, password.as_deref())
                .with_context(|| format!("encoding {} into {}", input.display(), output.display()))?;
            println!("Message encoded into {}", output.display());
            Ok(ExitCode::SUCCESS)
        }

        Command::Decode { input, password } => {
            match lsbsteg_core::decode_file(&input, password.as_deref()) {
                Ok(message) => {
                    println!("{message}");
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) if e.is_no_message() => {
                    log::warn!("no end marker in {}", input.display());
                    eprintln!("No hidden message found.");
                    Ok(ExitCode::from(2))
                }
                Err(e) => Err(e).with_context(|| format!("decoding {}", input.display())),
            }
        }

        Command::Capacity { input, encrypted } => {
            let grid = PixelGrid::open(&input)
                .with_context(|| format!("reading {}", input.display()))?;
            let suffix = if encrypted { " (encrypted)" } else { "" };
            match estimate_capacity(&grid, encrypted) {
                Some(bytes) => {
                    println!("{}x{} px, {bytes} bytes of message{suffix}", grid.width(), grid.height())
                }
                None => println!(
                    "{}x{} px, too small to hold a message{suffix}",
                    grid.width(),
                    grid.height()
                ),
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
