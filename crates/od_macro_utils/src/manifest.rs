use std::collections::{BTreeMap, BTreeSet};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use toml_edit::{Document, Item};

const FACADE_NAME: &str = "od_core";
const CRATE_PREFIX: &str = "od_";

/// The dependency names declared by the Cargo.toml of the crate being compiled.
///
/// Generated code must name `od_dump` through a path that is valid from the
/// invoking crate, which may depend on `od_dump` directly or only on the
/// `od_core` facade.
///
/// # Resolution rules
///
/// 1. `name` listed in `dependencies` resolves to `::name`.
/// 2. `od_core` listed in `dependencies` resolves `od_xxx` to `::od_core::xxx`.
/// 3. Rules 1-2 are repeated for `dev-dependencies`.
/// 4. Anything else falls back to `::name`.
///
/// A crate referring to itself should declare `extern crate self as od_dump;`.
#[derive(Debug)]
pub struct Manifest {
    dependencies: BTreeSet<String>,
    dev_dependencies: BTreeSet<String>,
    modified_time: SystemTime,
}

impl Manifest {
    #[inline(never)]
    fn manifest_path() -> PathBuf {
        let dir = env::var_os("CARGO_MANIFEST_DIR")
            .expect("CARGO_MANIFEST_DIR should be auto-defined by cargo.");
        let path = PathBuf::from(dir).join("Cargo.toml");
        assert!(
            path.exists(),
            "Cargo manifest does not exist at path {}",
            path.display(),
        );
        path
    }

    fn modified_time(path: &Path) -> SystemTime {
        std::fs::metadata(path)
            .and_then(|metadata| metadata.modified())
            .expect("The Cargo.toml should have a modified time.")
    }

    fn table_keys(document: &Document<String>, table: &str) -> BTreeSet<String> {
        match document.get(table) {
            Some(Item::Table(deps)) => deps.iter().map(|(key, _)| key.to_owned()).collect(),
            _ => BTreeSet::new(),
        }
    }

    #[inline(never)]
    fn load(path: &Path, modified_time: SystemTime) -> Self {
        let text = std::fs::read_to_string(path)
            .unwrap_or_else(|_| panic!("Unable to read cargo manifest: {}", path.display()));
        let document = Document::parse(text)
            .unwrap_or_else(|_| panic!("Failed to parse cargo manifest: {}", path.display()));

        Self {
            dependencies: Self::table_keys(&document, "dependencies"),
            dev_dependencies: Self::table_keys(&document, "dev-dependencies"),
            modified_time,
        }
    }

    fn lookup(deps: &BTreeSet<String>, name: &str) -> Option<syn::Path> {
        if deps.contains(name) {
            return Some(syn::parse_str(&format!("::{name}")).unwrap());
        }
        let module = name.strip_prefix(CRATE_PREFIX)?;
        if deps.contains(FACADE_NAME) {
            return Some(syn::parse_str(&format!("::{FACADE_NAME}::{module}")).unwrap());
        }
        None
    }

    /// Returns the path under which crate `name` is reachable from the invoking crate.
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        Self::lookup(&self.dependencies, name)
            .or_else(|| Self::lookup(&self.dev_dependencies, name))
            .unwrap_or_else(|| syn::parse_str(&format!("::{name}")).unwrap())
    }

    /// Runs `func` with the cached manifest of the invoking crate.
    ///
    /// The cache is refreshed whenever the file's modification time changes.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static MANIFESTS: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let path = Self::manifest_path();
        let modified_time = Self::modified_time(&path);

        {
            let manifests = MANIFESTS.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(manifest) = manifests.get(&path)
                && manifest.modified_time == modified_time
            {
                return func(manifest);
            }
        }

        let manifest = Self::load(&path, modified_time);
        let result = func(&manifest);
        MANIFESTS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path, manifest);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::Manifest;

    fn path_string(path: &syn::Path) -> String {
        let segments: Vec<String> = path
            .segments
            .iter()
            .map(|segment| segment.ident.to_string())
            .collect();
        format!("::{}", segments.join("::"))
    }

    fn manifest(deps: &[&str], dev: &[&str]) -> Manifest {
        Manifest {
            dependencies: deps.iter().map(|s| s.to_string()).collect(),
            dev_dependencies: dev.iter().map(|s| s.to_string()).collect(),
            modified_time: std::time::SystemTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn direct_dependency_wins() {
        let m = manifest(&["od_dump", "od_core"], &[]);
        assert_eq!(path_string(&m.get_crate_path("od_dump")), "::od_dump");
    }

    #[test]
    fn facade_dependency() {
        let m = manifest(&["od_core"], &[]);
        assert_eq!(path_string(&m.get_crate_path("od_dump")), "::od_core::dump");

        let m = manifest(&[], &["od_core"]);
        assert_eq!(path_string(&m.get_crate_path("od_dump")), "::od_core::dump");
    }

    #[test]
    fn fallback_is_absolute() {
        let m = manifest(&["serde"], &[]);
        assert_eq!(path_string(&m.get_crate_path("od_dump")), "::od_dump");
    }
}
