use crate::error::Error;
use crate::report::ErrorSink;
use log::debug;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Discovery walker for installed application packages.
///
/// Each app is expected to keep its HTTP API modules under the conventional
/// `apps/<app>/<app>/api` directory. The scanner walks that directory
/// recursively and collects every `.rs` file. An app without an `api`
/// directory simply has no API surface and is skipped silently.
///
/// # Example
///
/// ```no_run
/// use swagger_from_source::report::LogSink;
/// use swagger_from_source::scanner::AppScanner;
/// use std::path::PathBuf;
///
/// let scanner = AppScanner::new(PathBuf::from("/bench"), vec!["shop".to_string()]);
/// let files = scanner.scan(&LogSink);
/// println!("Found {} API files", files.len());
/// ```
pub struct AppScanner {
    bench_root: PathBuf,
    apps: Vec<String>,
}

/// One discovered source file, tagged with the app that owns it.
#[derive(Debug, Clone)]
pub struct ApiFile {
    /// Name of the installed app the file belongs to
    pub app: String,
    /// Path to the `.rs` file
    pub path: PathBuf,
}

impl AppScanner {
    /// Creates a new `AppScanner` over a bench root and its installed apps.
    pub fn new(bench_root: PathBuf, apps: Vec<String>) -> Self {
        Self { bench_root, apps }
    }

    fn api_dir(&self, app: &str) -> PathBuf {
        self.bench_root.join("apps").join(app).join(app).join("api")
    }

    /// Walks every app's `api` directory and collects its `.rs` files.
    ///
    /// Directory entries are visited in sorted order so repeated runs see the
    /// same file sequence. A traversal failure is recorded on the sink and
    /// ends that app's walk; files already collected from it are kept and the
    /// remaining apps are still scanned.
    pub fn scan(&self, errors: &dyn ErrorSink) -> Vec<ApiFile> {
        let mut files = Vec::new();

        for app in &self.apps {
            let api_dir = self.api_dir(app);

            if !api_dir.is_dir() {
                debug!("App '{}' has no api directory, skipping", app);
                continue;
            }

            for entry in WalkDir::new(&api_dir).sort_by_file_name() {
                match entry {
                    Ok(entry) => {
                        let path = entry.path();

                        if path.is_file() && is_source_file(path) {
                            files.push(ApiFile {
                                app: app.clone(),
                                path: path.to_path_buf(),
                            });
                        }
                    }
                    Err(e) => {
                        let err = Error::Discovery {
                            app: app.clone(),
                            message: e.to_string(),
                        };
                        errors.record(&format!("Error processing app '{}'", app), &err.to_string());
                        break;
                    }
                }
            }
        }

        files
    }
}

fn is_source_file(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("rs")
}
