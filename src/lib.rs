//! Swagger from source - static API documentation for whitelisted handlers.
//!
//! This library generates a Swagger (OpenAPI 3.0) document by statically
//! analyzing the `api` modules of installed application packages. Handler
//! functions are located by their eligibility marker (a call to the
//! `validate_http_method` helper), classified by a textual method heuristic,
//! and described from their signatures and `#[validate_request(..)]` model
//! bindings. No analyzed code is ever executed.
//!
//! # Architecture
//!
//! The pipeline flows strictly forward through several modules:
//!
//! 1. [`scanner`] - enumerates source files under each app's `api` directory
//! 2. [`parser`] - parses source files into syntax trees
//! 3. [`extractor`] - turns eligible handler functions into endpoint descriptors
//! 4. [`schema_resolver`] - resolves request-model structs to JSON Schemas
//! 5. [`swagger_builder`] - merges descriptors into the path-keyed document
//! 6. [`serializer`] - writes the finished document to the output sink
//!
//! [`generator`] ties the stages together behind a single entry point;
//! [`config`] and [`report`] carry the run's settings and the injected
//! error-reporting collaborator.
//!
//! # Example Usage
//!
//! ```no_run
//! use swagger_from_source::config::GeneratorConfig;
//! use swagger_from_source::generator::generate;
//! use swagger_from_source::report::LogSink;
//! use std::path::PathBuf;
//!
//! let config = GeneratorConfig {
//!     app_name: "Shop".to_string(),
//!     basic_auth: true,
//!     bearer_auth: false,
//!     bench_root: PathBuf::from("/home/user/bench"),
//!     apps: vec!["shop".to_string()],
//!     tool_app: "swagger".to_string(),
//! };
//!
//! let output_path = generate(&config, &LogSink).unwrap();
//! println!("Document written to {}", output_path.display());
//! ```
//!
//! # Command-Line Interface
//!
//! For command-line usage, see the [`cli`] module which provides a complete CLI application.

pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod generator;
pub mod parser;
pub mod report;
pub mod scanner;
pub mod schema_resolver;
pub mod serializer;
pub mod swagger_builder;
