use anyhow::Result;
use clap::Parser;
use log::{debug, info};
use std::path::PathBuf;

/// Swagger from source - generate a Swagger document from whitelisted HTTP handlers
#[derive(Parser, Debug)]
#[command(name = "swagger-from-source")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to the bench directory containing the apps/ tree
    #[arg(value_name = "BENCH_PATH")]
    pub bench_path: PathBuf,

    /// Installed application package to scan (repeatable)
    #[arg(short = 'a', long = "app", value_name = "APP")]
    pub apps: Vec<String>,

    /// Display name used for the document title
    #[arg(short = 't', long = "title", default_value = "Generated")]
    pub title: String,

    /// Declare the basic-auth security scheme
    #[arg(long = "basic-auth")]
    pub basic_auth: bool,

    /// Declare the bearer-auth security scheme
    #[arg(long = "bearer-auth")]
    pub bearer_auth: bool,

    /// Package under apps/ that owns the www/ output directory
    #[arg(long = "tool-app", value_name = "APP", default_value = "swagger")]
    pub tool_app: String,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Validate and log already-parsed arguments
pub fn parse_args_from_parsed(args: CliArgs) -> Result<CliArgs> {
    debug!("Parsed arguments: {:?}", args);

    if !args.bench_path.exists() {
        anyhow::bail!("Bench path does not exist: {}", args.bench_path.display());
    }

    if !args.bench_path.is_dir() {
        anyhow::bail!(
            "Bench path is not a directory: {}",
            args.bench_path.display()
        );
    }

    info!("Bench path: {}", args.bench_path.display());
    info!("Apps: {:?}", args.apps);
    info!("Title: {}", args.title);

    Ok(args)
}

/// Run the main workflow
pub fn run(args: CliArgs) -> Result<()> {
    use crate::config::GeneratorConfig;
    use crate::generator;
    use crate::report::LogSink;

    let config = GeneratorConfig {
        app_name: args.title,
        basic_auth: args.basic_auth,
        bearer_auth: args.bearer_auth,
        bench_root: args.bench_path,
        apps: args.apps,
        tool_app: args.tool_app,
    };

    let output_path = generator::generate(&config, &LogSink)?;

    info!("Generation complete!");
    info!("  - Output: {}", output_path.display());

    Ok(())
}
