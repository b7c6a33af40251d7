// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! `fdc` command line tool.
//!
//! Thin layer over the library: reads files, runs the pipeline, writes files and
//! prints reports. All format logic lives in the `fdc` crate.

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use fdc::{
    Codec, ContainerRef, Decoder, DeflateSettings, Encoder, container_file_name,
    entropy::ByteHistogram,
    report::{efficiency_percent, format_file_size},
};
use log::debug;
use std::path::{Path, PathBuf};

/// Compress files into self-describing containers and restore them
#[derive(Parser, Debug)]
#[command(name = "fdc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compress a file into a container
    Compress {
        /// File to compress
        input: PathBuf,

        /// Where to write the container [default: <INPUT>.fdc]
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Deflate level, 0 (store) to 10 (best)
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=10))]
        level: Option<u8>,

        #[command(flatten)]
        codec: CodecArgs,

        #[command(flatten)]
        write: WriteArgs,
    },

    /// Restore the original file from a container
    Decompress {
        /// Container to read
        input: PathBuf,

        /// Where to write the restored file [default: the recorded name, next to INPUT]
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        codec: CodecArgs,

        #[command(flatten)]
        write: WriteArgs,
    },

    /// Show the metadata of a container without decompressing it
    Inspect {
        /// Container to read
        input: PathBuf,
    },

    /// Measure the Shannon entropy of a file
    Entropy {
        /// File to measure
        input: PathBuf,
    },
}

#[derive(Args, Debug)]
struct CodecArgs {
    /// Payload codec; must match on both ends
    #[arg(long, default_value = "deflate")]
    codec: Codec,
}

#[derive(Args, Debug)]
struct WriteArgs {
    /// Overwrite the output file if it exists
    #[arg(short, long)]
    force: bool,

    /// Do not print a summary
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match cli.command {
        Command::Compress {
            input,
            output,
            level,
            codec,
            write,
        } => compress(&input, output, codec.with_level(level), &write),
        Command::Decompress {
            input,
            output,
            codec,
            write,
        } => decompress(&input, output, codec.codec, &write),
        Command::Inspect { input } => inspect(&input),
        Command::Entropy { input } => entropy(&input),
    }
}

impl CodecArgs {
    fn with_level(self, level: Option<u8>) -> Codec {
        match (self.codec, level) {
            (Codec::Deflate(_), Some(level)) => Codec::Deflate(DeflateSettings::from_level(level)),
            (codec, _) => codec,
        }
    }
}

fn compress(
    input: &Path,
    output: Option<PathBuf>,
    codec: Codec,
    write: &WriteArgs,
) -> Result<()> {
    let raw = read(input)?;
    let name = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let output = output.unwrap_or_else(|| input.with_file_name(container_file_name(&name)));

    let encoded = Encoder::builder()
        .codec(codec)
        .build()
        .encode(&name, &raw)
        .with_context(|| format!("Failed to compress {}", input.display()))?;
    write_new(&output, &encoded.container, write.force)?;

    if !write.quiet {
        println!("Wrote {}", output.display());
        println!("{}", encoded.report());
    }
    Ok(())
}

fn decompress(
    input: &Path,
    output: Option<PathBuf>,
    codec: Codec,
    write: &WriteArgs,
) -> Result<()> {
    let container = read(input)?;
    let decoded = Decoder::builder()
        .codec(codec)
        .build()
        .decode(&container)
        .with_context(|| format!("Failed to decompress {}", input.display()))?;

    let output = match output {
        Some(output) => output,
        // the recorded name is untrusted; never let it leave the input's directory
        None => input.with_file_name(
            Path::new(decoded.file_name())
                .file_name()
                .unwrap_or_else(|| fdc::pipeline::FALLBACK_FILE_NAME.as_ref()),
        ),
    };
    write_new(&output, &decoded.data, write.force)?;

    if !write.quiet {
        println!(
            "Wrote {} ({})",
            output.display(),
            format_file_size(decoded.data.len() as u64)
        );
    }
    Ok(())
}

fn inspect(input: &Path) -> Result<()> {
    let container = read(input)?;
    let view = ContainerRef::parse(&container)
        .with_context(|| format!("Failed to read container {}", input.display()))?;
    let metadata = view.metadata();

    println!("Original name: {}", metadata.original_name());
    println!(
        "Original size: {} ({} bytes)",
        format_file_size(metadata.original_size()),
        metadata.original_size()
    );
    println!("Entropy:       {:.4} bits per byte", metadata.entropy());
    println!("Timestamp:     {} ms since epoch", metadata.timestamp());
    println!(
        "Payload:       {} ({} bytes)",
        format_file_size(view.payload().len() as u64),
        view.payload().len()
    );
    println!(
        "Container:     {} ({} bytes)",
        format_file_size(container.len() as u64),
        container.len()
    );
    Ok(())
}

fn entropy(input: &Path) -> Result<()> {
    let histogram = ByteHistogram::from_bytes(&read(input)?);
    let entropy = histogram.entropy();
    println!(
        "{:.4} bits per byte ({:.1}% of theoretical maximum, {} distinct byte values)",
        entropy,
        efficiency_percent(entropy),
        histogram.distinct()
    );
    Ok(())
}

fn read(path: &Path) -> Result<Vec<u8>> {
    debug!("Reading {}", path.display());
    std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn write_new(path: &Path, bytes: &[u8], force: bool) -> Result<()> {
    if !force && path.exists() {
        bail!(
            "{} already exists; pass --force to overwrite it",
            path.display()
        );
    }
    debug!("Writing {} bytes to {}", bytes.len(), path.display());
    std::fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))
}
