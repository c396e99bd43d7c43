//! Locale-data directory resolution
//!
//! An ordered chain of strategies, first match wins. Each strategy answers
//! one deployment question: did the user point us somewhere explicitly, is
//! there a `mathmaps/` directory next to the installed binary, or are we
//! running from a source checkout? When no strategy matches, the caller
//! falls back to the embedded assets; the locator itself never errors.

use std::env;
use std::path::{Path, PathBuf};

/// Directory name expected next to a deployed executable
pub const MATHMAPS_DIR: &str = "mathmaps";

/// One way of locating a locale-data directory.
pub trait ResolveStrategy {
    /// Short label for diagnostics ("override", "sibling", ...).
    fn name(&self) -> &'static str;

    /// The directory this strategy points at, if it exists.
    fn try_resolve(&self) -> Option<PathBuf>;
}

/// Resolved locale-data directory plus the strategy that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDir {
    pub path: PathBuf,
    pub strategy: &'static str,
}

/// Explicit directory from configuration or environment.
///
/// The path is validated (exists, is a directory) by config loading before
/// it reaches the chain; a `None` inner value means no override was given.
pub struct OverrideDir(pub Option<PathBuf>);

impl ResolveStrategy for OverrideDir {
    fn name(&self) -> &'static str {
        "override"
    }

    fn try_resolve(&self) -> Option<PathBuf> {
        self.0.clone()
    }
}

/// `mathmaps/` directory adjacent to the running executable.
pub struct ExecutableSibling;

impl ResolveStrategy for ExecutableSibling {
    fn name(&self) -> &'static str {
        "sibling"
    }

    fn try_resolve(&self) -> Option<PathBuf> {
        let exe = env::current_exe().ok()?;
        let dir = exe.parent()?.join(MATHMAPS_DIR);
        dir.is_dir().then_some(dir)
    }
}

/// `assets/mathmaps` under the crate root, present on dev workstations.
pub struct DevTree;

impl ResolveStrategy for DevTree {
    fn name(&self) -> &'static str {
        "dev-tree"
    }

    fn try_resolve(&self) -> Option<PathBuf> {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("assets")
            .join(MATHMAPS_DIR);
        dir.is_dir().then_some(dir)
    }
}

/// Walk a strategy chain, returning the first hit.
pub fn resolve(strategies: &[&dyn ResolveStrategy]) -> Option<ResolvedDir> {
    strategies.iter().find_map(|strategy| {
        strategy.try_resolve().map(|path| ResolvedDir {
            path,
            strategy: strategy.name(),
        })
    })
}

/// Resolve with the standard chain: override, executable sibling, dev tree.
pub fn resolve_data_dir(override_dir: Option<PathBuf>) -> Option<ResolvedDir> {
    let override_strategy = OverrideDir(override_dir);
    resolve(&[&override_strategy, &ExecutableSibling, &DevTree])
}
