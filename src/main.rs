//! Swagger from source - command-line tool for generating API documentation.
//!
//! This binary generates a Swagger (OpenAPI 3.0) document by statically
//! analyzing the API modules of a set of installed application packages.
//! Handler functions are never executed; discovery works purely on their
//! source text and signatures.
//!
//! # Usage
//!
//! ```bash
//! swagger-from-source [OPTIONS] <BENCH_PATH>
//! ```
//!
//! # Examples
//!
//! Generate documentation for two apps:
//! ```bash
//! swagger-from-source /home/user/bench -a shop -a crm -t "Shop"
//! ```
//!
//! Declare security schemes:
//! ```bash
//! swagger-from-source /home/user/bench -a shop --basic-auth --bearer-auth
//! ```

mod cli;
mod config;
mod error;
mod extractor;
mod generator;
mod parser;
mod report;
mod scanner;
mod schema_resolver;
mod serializer;
mod swagger_builder;

use anyhow::Result;
use clap::Parser;
use log::info;

fn main() -> Result<()> {
    // We need to parse args twice: once to get verbose flag, then again after logger init
    let args_for_verbose = cli::CliArgs::parse();

    let log_level = if args_for_verbose.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    info!("Swagger from source starting...");

    let args = cli::parse_args_from_parsed(args_for_verbose)?;

    cli::run(args)?;

    info!("Swagger document generation completed successfully");

    Ok(())
}
