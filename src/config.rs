//! Generator configuration.
//!
//! All settings for a run are read once and passed explicitly into the
//! generation entry point; the engine keeps no ambient state.

use std::path::PathBuf;

/// Settings for one generation run.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Display name used for the document title (`"<name> API"`).
    pub app_name: String,
    /// Declare the basic-auth security scheme in the output document.
    pub basic_auth: bool,
    /// Declare the bearer-auth security scheme in the output document.
    pub bearer_auth: bool,
    /// Root directory containing the `apps/` tree.
    pub bench_root: PathBuf,
    /// Installed application packages to scan for API modules.
    pub apps: Vec<String>,
    /// Package under `apps/` that owns the `www/` output directory.
    pub tool_app: String,
}

impl GeneratorConfig {
    /// Conventional location of the generated document:
    /// `<bench>/apps/<tool>/<tool>/www/swagger.json`.
    pub fn output_path(&self) -> PathBuf {
        self.bench_root
            .join("apps")
            .join(&self.tool_app)
            .join(&self.tool_app)
            .join("www")
            .join("swagger.json")
    }
}
