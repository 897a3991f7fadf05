use crate::error::{Error, Result};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Source loader for API modules.
///
/// `ModuleLoader` reads one source file and parses it with the `syn` crate
/// into a [`LoadedModule`]. Nothing is compiled or executed: the module's
/// top-level functions and struct definitions are available purely as syntax
/// trees.
///
/// # Example
///
/// ```no_run
/// use swagger_from_source::parser::ModuleLoader;
/// use std::path::Path;
///
/// let module = ModuleLoader::load(Path::new("apps/shop/shop/api/billing.rs")).unwrap();
/// println!("Module {} has {} functions", module.module_name, module.functions().count());
/// ```
pub struct ModuleLoader;

/// A successfully loaded source file.
#[derive(Debug)]
pub struct LoadedModule {
    /// Path to the source file
    pub path: PathBuf,
    /// Module name derived from the file stem (e.g. `billing` for `billing.rs`)
    pub module_name: String,
    /// The parsed syntax tree
    pub syntax_tree: syn::File,
}

impl ModuleLoader {
    /// Reads and parses one source file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Load`] when the file cannot be read or does not parse
    /// as valid source. Callers treat this as recoverable and skip the file.
    pub fn load(path: &Path) -> Result<LoadedModule> {
        debug!("Loading module from: {}", path.display());

        let content = fs::read_to_string(path).map_err(|e| Error::Load {
            file: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let syntax_tree = syn::parse_file(&content).map_err(|e| Error::Load {
            file: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let module_name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        Ok(LoadedModule {
            path: path.to_path_buf(),
            module_name,
            syntax_tree,
        })
    }
}

impl LoadedModule {
    /// Top-level functions defined in the module, in declaration order.
    pub fn functions(&self) -> impl Iterator<Item = &syn::ItemFn> {
        self.syntax_tree.items.iter().filter_map(|item| match item {
            syn::Item::Fn(item_fn) => Some(item_fn),
            _ => None,
        })
    }

    /// Finds a top-level struct definition by exact name.
    pub fn find_struct(&self, name: &str) -> Option<&syn::ItemStruct> {
        self.syntax_tree.items.iter().find_map(|item| match item {
            syn::Item::Struct(item_struct) if item_struct.ident == name => Some(item_struct),
            _ => None,
        })
    }
}
