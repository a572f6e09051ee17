//! gitjson - a read-only JSON API over a collection of git repositories.
//!
//! # Usage
//! ```bash
//! gitjson /api/repos/myrepo/tags               # One document to stdout
//! gitjson /api/repos/myrepo/commits/HEAD
//! gitjson - --repos-dir /srv/git               # Batch mode: paths on stdin
//! ```
//!
//! In batch mode one path is read per line until EOF or a line holding
//! the end-of-transmission character (U+0004); each completed document
//! is followed by a line holding that same character.

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process;
use std::rc::Rc;

use anyhow::Context as _;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gitjson::error::Result;
use gitjson::router::Router;
use gitjson::routes::{self, Context};

/// Marker delimiting batch-mode documents, on both input and output.
const EOT: &str = "\u{4}";

/// Serve JSON documents describing git repositories
#[derive(Parser)]
#[command(name = "gitjson")]
#[command(about = "Serve JSON documents describing git repositories", long_about = None)]
struct Cli {
    /// API path to serve (must start with /api/), or '-' to read one
    /// path per line from stdin
    #[arg(value_name = "PATH")]
    path: String,

    /// Directory containing the repositories served by the API
    #[arg(long, value_name = "DIR", default_value = ".")]
    repos_dir: PathBuf,

    /// Prefix for the url properties of emitted documents; defaults to
    /// the BASE_URI environment variable
    #[arg(long, value_name = "URI")]
    base_uri: Option<String>,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            process::exit(if e.use_stderr() { 1 } else { 0 });
        }
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    match run(cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<i32> {
    let ctx = Rc::new(Context {
        repos_dir: cli.repos_dir,
        base_uri: cli
            .base_uri
            .or_else(|| std::env::var("BASE_URI").ok())
            .unwrap_or_default(),
    });

    let router = routes::build_router(ctx).context("invalid route table")?;

    if cli.path == "-" {
        run_batch(&router)
    } else {
        run_single(&router, &cli.path)
    }
}

fn run_single(router: &Router<Result<()>>, path: &str) -> anyhow::Result<i32> {
    if !path.starts_with("/api/") && !path.starts_with("api/") {
        eprintln!("The path didn't start with /api/");
        return Ok(1);
    }
    Ok(perform(router, path))
}

/// Reads paths from stdin, one per line, emitting an end-of-transmission
/// line after each completed document. Stops at EOF, at an explicit
/// end-of-transmission line, or at the first failure.
fn run_batch(router: &Router<Result<()>>) -> anyhow::Result<i32> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("reading path from stdin")?;
        if line == EOT {
            break;
        }

        let code = perform(router, &line);
        if code != 0 {
            return Ok(code);
        }
        println!("{EOT}");
    }
    Ok(0)
}

/// Dispatches one path and translates the outcome into an exit code.
fn perform(router: &Router<Result<()>>, path: &str) -> i32 {
    debug!(path, "dispatching");
    match router.dispatch(path) {
        None => {
            eprintln!("Unknown resource: {path}");
            1
        }
        Some(Err(e)) => {
            eprintln!("Error: {e}");
            e.exit_code()
        }
        Some(Ok(())) => 0,
    }
}
