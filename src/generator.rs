//! The generation entry point.
//!
//! One call runs the whole discovery-scan-assemble-serialize cycle
//! synchronously: the walker enumerates API files, each file is loaded and
//! its functions extracted, descriptors are merged into the document, and the
//! finished document is written to the conventional output sink. Per-item
//! failures (app, file, function) are recorded on the injected sink and
//! skipped; only output failures abort the run.

use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::extractor;
use crate::parser::ModuleLoader;
use crate::report::ErrorSink;
use crate::scanner::AppScanner;
use crate::serializer::write_document;
use crate::swagger_builder::SwaggerBuilder;
use log::{debug, info};
use std::path::PathBuf;

/// Runs one full generation and returns the path of the written document.
///
/// # Errors
///
/// Only [`Error::Output`](crate::error::Error::Output) is returned; every
/// other error is absorbed and forwarded to `errors`.
pub fn generate(config: &GeneratorConfig, errors: &dyn ErrorSink) -> Result<PathBuf> {
    info!("Starting Swagger document generation...");

    let mut builder = SwaggerBuilder::new(config);

    let scanner = AppScanner::new(config.bench_root.clone(), config.apps.clone());
    let files = scanner.scan(errors);
    info!("Found {} API files", files.len());

    for file in files {
        let module = match ModuleLoader::load(&file.path) {
            Ok(module) => module,
            Err(e) => {
                errors.record(
                    &format!("Error loading or processing file {}", file.path.display()),
                    &e.to_string(),
                );
                continue;
            }
        };

        debug!(
            "Processing module {} ({} functions)",
            module.module_name,
            module.functions().count()
        );

        for function in module.functions() {
            match extractor::extract(&file.app, &module, function) {
                Ok(Some(descriptor)) => builder.upsert(descriptor),
                Ok(None) => {}
                Err(e) => {
                    errors.record(
                        &format!(
                            "Error processing function {} in module {}",
                            function.sig.ident, module.module_name
                        ),
                        &e.to_string(),
                    );
                }
            }
        }
    }

    let document = builder.build();
    let output_path = config.output_path();

    write_document(&document, &output_path)?;
    info!(
        "Swagger document written to {}",
        output_path.display()
    );

    Ok(output_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use std::sync::Mutex;
    use tempfile::TempDir;

    struct CollectingSink {
        reports: Mutex<Vec<String>>,
    }

    impl CollectingSink {
        fn new() -> Self {
            Self {
                reports: Mutex::new(Vec::new()),
            }
        }

        fn titles(&self) -> Vec<String> {
            self.reports.lock().unwrap().clone()
        }
    }

    impl ErrorSink for CollectingSink {
        fn record(&self, title: &str, _detail: &str) {
            self.reports.lock().unwrap().push(title.to_string());
        }
    }

    fn write_api_file(root: &Path, app: &str, name: &str, content: &str) {
        let api_dir = root.join("apps").join(app).join(app).join("api");
        fs::create_dir_all(&api_dir).unwrap();
        fs::write(api_dir.join(name), content).unwrap();
    }

    fn config(root: &Path, apps: &[&str]) -> GeneratorConfig {
        GeneratorConfig {
            app_name: "Test".to_string(),
            basic_auth: false,
            bearer_auth: false,
            bench_root: root.to_path_buf(),
            apps: apps.iter().map(|a| a.to_string()).collect(),
            tool_app: "swagger".to_string(),
        }
    }

    #[test]
    fn test_generate_writes_document() {
        let temp_dir = TempDir::new().unwrap();
        write_api_file(
            temp_dir.path(),
            "shop",
            "billing.rs",
            r#"
                pub fn get_invoice(invoice_id: String) -> String {
                    validate_http_method("GET");
                    invoice_id
                }
            "#,
        );

        let sink = CollectingSink::new();
        let path = generate(&config(temp_dir.path(), &["shop"]), &sink).unwrap();

        assert!(path.ends_with("apps/swagger/swagger/www/swagger.json"));
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("/api/method/shop.api.billing.get_invoice"));
        assert!(sink.titles().is_empty());
    }

    #[test]
    fn test_unparseable_file_is_recorded_and_skipped() {
        let temp_dir = TempDir::new().unwrap();
        write_api_file(temp_dir.path(), "shop", "broken.rs", "pub fn broken( {");
        write_api_file(
            temp_dir.path(),
            "shop",
            "billing.rs",
            r#"
                pub fn get_invoice(invoice_id: String) -> String {
                    validate_http_method("GET");
                    invoice_id
                }
            "#,
        );

        let sink = CollectingSink::new();
        let path = generate(&config(temp_dir.path(), &["shop"]), &sink).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("get_invoice"));

        let titles = sink.titles();
        assert_eq!(titles.len(), 1);
        assert!(titles[0].contains("broken.rs"));
    }

    #[test]
    fn test_generate_with_no_apps_writes_empty_paths() {
        let temp_dir = TempDir::new().unwrap();

        let sink = CollectingSink::new();
        let path = generate(&config(temp_dir.path(), &[]), &sink).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"paths\": {}"));
    }
}
