use browscap::api::BrowscapApi;
use browscap::commands::build::BuildOptions;
use browscap::commands::{CmdMessage, MessageLevel};
use browscap::error::{BrowscapError, Result};
use browscap::store::fs::FileSource;
use chrono::Utc;
use clap::Parser;
use colored::*;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::borrow::Cow;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod args;
use args::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Build {
            resources,
            output,
            flavor,
            format,
            data_version,
            released,
            released_now,
            gzip,
        } => {
            let released = if released_now {
                Some(Utc::now().to_rfc2822())
            } else {
                released
            };
            let options = BuildOptions {
                flavor,
                format,
                version: data_version,
                released,
            };
            handle_build(&resources, output.as_deref(), &options, gzip)
        }
        Commands::Check { resources } => handle_check(&resources),
    }
}

fn init_logging(verbose: bool) {
    // RUST_LOG wins over --verbose, e.g. RUST_LOG=browscap::store=debug
    let env_filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("browscap=debug")
    } else {
        EnvFilter::new("browscap=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    debug!("Logging initialized (verbose={})", verbose);
}

fn handle_build(
    resources: &Path,
    output: Option<&Path>,
    options: &BuildOptions,
    gzip: bool,
) -> Result<()> {
    let api = BrowscapApi::new(FileSource::new(resources));
    let result = api.build(options)?;
    let document = result.artifact.as_deref().unwrap_or_default();

    let gzip = gzip || output.is_some_and(|path| path.extension().is_some_and(|ext| ext == "gz"));
    let bytes = encode(document.as_bytes(), gzip)
        .map_err(|e| BrowscapError::io(output.unwrap_or(Path::new("<stdout>")), e))?;

    match output {
        Some(path) => {
            write_atomically(path, &bytes)?;
            debug!(path = %path.display(), bytes = bytes.len(), gzip, "wrote artifact");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(&bytes)
                .and_then(|_| stdout.flush())
                .map_err(|e| BrowscapError::io("<stdout>", e))?;
        }
    }

    print_messages(&result.messages);
    Ok(())
}

fn handle_check(resources: &Path) -> Result<()> {
    let api = BrowscapApi::new(FileSource::new(resources));
    let result = api.check()?;
    print_messages(&result.messages);
    Ok(())
}

fn encode(bytes: &[u8], gzip: bool) -> io::Result<Cow<'_, [u8]>> {
    if !gzip {
        return Ok(Cow::Borrowed(bytes));
    }
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bytes)?;
    Ok(Cow::Owned(encoder.finish()?))
}

/// Writes to a sibling temp file and renames it into place, so a failed
/// run never leaves a truncated artifact behind.
fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, bytes).map_err(|e| BrowscapError::io(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        BrowscapError::io(path, e)
    })
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => eprintln!("{}", message.content.dimmed()),
            MessageLevel::Success => eprintln!("{}", message.content.green()),
            MessageLevel::Warning => eprintln!("{}", message.content.yellow()),
        }
    }
}
