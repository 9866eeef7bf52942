//! Repo-local lint enforcing the cake manager's hexagonal boundaries.
//!
//! The backend is split into `domain` (cake rules and ports), `inbound`
//! (HTTP adapter) and `outbound` (storage adapters). This crate parses every
//! source file under those directories with `syn` and rejects:
//!
//! - `domain` code that reaches into adapters or framework crates such as
//!   Actix, Diesel or utoipa
//! - `inbound` code that imports `outbound` modules or database crates
//! - `outbound` code that imports `inbound` modules or HTTP framework crates
//!
//! Run it with `cargo run -p architecture-lint` from the workspace.

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use syn::visit::Visit;

/// Name the backend library is imported under from tests and binaries.
const BACKEND_CRATE: &str = "cake_manager";

const HTTP_CRATES: &[&str] = &[
    "actix",
    "actix_http",
    "actix_service",
    "actix_web",
    "utoipa",
    "utoipa_swagger_ui",
];

const DATABASE_CRATES: &[&str] = &["diesel", "diesel_async", "diesel_migrations", "bb8"];

/// A single boundary violation discovered by the linter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// File path relative to `backend/src`.
    pub file: PathBuf,
    /// Human-readable description of the violated rule.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.file.display(), self.message)
    }
}

/// Failure modes returned by the architecture lint.
#[derive(Debug, thiserror::Error)]
pub enum ArchitectureLintError {
    /// Filesystem traversal or reading failed.
    #[error("I/O error while linting architecture: {0}")]
    Io(#[from] io::Error),
    /// Rust source parsing failed, or the file sits outside any layer.
    #[error("failed to lint {}: {message}", .file.display())]
    Parse { file: PathBuf, message: String },
    /// One or more boundary violations were found.
    #[error("{}", render_violations(.0))]
    Violations(Vec<Violation>),
}

fn render_violations(violations: &[Violation]) -> String {
    let mut rendered = String::from("Architecture boundary violations:");
    for violation in violations {
        rendered.push_str("\n- ");
        rendered.push_str(&violation.to_string());
    }
    rendered
}

/// A Rust source file to be linted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintSource {
    /// Path relative to `backend/src`.
    pub file: PathBuf,
    /// File contents.
    pub contents: String,
}

/// Lint the backend crate sources on disk.
///
/// `backend_dir` is the directory holding the backend's `Cargo.toml`.
pub fn lint_backend_sources(backend_dir: &Path) -> Result<(), ArchitectureLintError> {
    let src_dir = backend_dir.join("src");
    let mut sources = Vec::new();
    for layer in Layer::ALL {
        let dir = src_dir.join(layer.directory());
        if dir.exists() {
            collect_sources_under(&src_dir, &dir, &mut sources)?;
        }
    }
    lint_sources(&sources)
}

/// Lint the provided Rust sources.
pub fn lint_sources(sources: &[LintSource]) -> Result<(), ArchitectureLintError> {
    let mut violations = Vec::new();

    for source in sources {
        let layer = Layer::of(&source.file).ok_or_else(|| ArchitectureLintError::Parse {
            file: source.file.clone(),
            message: "file is not under domain/, inbound/ or outbound/".to_owned(),
        })?;
        let parsed =
            syn::parse_file(&source.contents).map_err(|err| ArchitectureLintError::Parse {
                file: source.file.clone(),
                message: err.to_string(),
            })?;
        violations.extend(layer.check(&source.file, &parsed));
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ArchitectureLintError::Violations(violations))
    }
}

/// Architectural layer inferred from the first path component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layer {
    Domain,
    Inbound,
    Outbound,
}

impl Layer {
    const ALL: [Self; 3] = [Self::Domain, Self::Inbound, Self::Outbound];

    fn of(relative_path: &Path) -> Option<Self> {
        let first = relative_path.components().next()?.as_os_str();
        Self::ALL
            .into_iter()
            .find(|layer| first == layer.directory())
    }

    const fn directory(self) -> &'static str {
        match self {
            Self::Domain => "domain",
            Self::Inbound => "inbound",
            Self::Outbound => "outbound",
        }
    }

    fn forbidden_modules(self) -> &'static [&'static str] {
        match self {
            Self::Domain => &["inbound", "outbound", "server", "middleware"],
            Self::Inbound => &["outbound", "server"],
            Self::Outbound => &["inbound", "server", "middleware"],
        }
    }

    fn forbids_crate(self, root: &str) -> bool {
        match self {
            Self::Domain => HTTP_CRATES.contains(&root) || DATABASE_CRATES.contains(&root),
            Self::Inbound => DATABASE_CRATES.contains(&root),
            Self::Outbound => HTTP_CRATES.contains(&root),
        }
    }

    fn check(self, file: &Path, parsed: &syn::File) -> Vec<Violation> {
        let mut collector = PathCollector::default();
        collector.visit_file(parsed);

        let layer = self.directory();
        let mut messages = BTreeSet::new();
        for segments in &collector.paths {
            if let Some(module) = internal_module(segments)
                .filter(|module| self.forbidden_modules().contains(module))
            {
                messages.insert(format!("{layer} module must not depend on crate::{module}"));
            }
            if let Some(root) = external_crate(segments).filter(|root| self.forbids_crate(root)) {
                messages.insert(format!(
                    "{layer} module must not depend on external crate `{root}`"
                ));
            }
        }

        messages
            .into_iter()
            .map(|message| Violation {
                file: file.to_path_buf(),
                message,
            })
            .collect()
    }
}

fn is_relative(segment: &str) -> bool {
    matches!(segment, "crate" | "self" | "super")
}

/// First crate-internal module named by `segments`, if the path is internal.
///
/// Bare layer names count as internal so that `use outbound::x` inside a
/// nested module is still caught.
fn internal_module(segments: &[String]) -> Option<&str> {
    let first = segments.first()?.as_str();
    if Layer::ALL.iter().any(|layer| layer.directory() == first) {
        return Some(first);
    }
    let index = if is_relative(first) {
        segments.iter().position(|segment| !is_relative(segment))?
    } else if first == BACKEND_CRATE {
        1
    } else {
        return None;
    };
    segments.get(index).map(String::as_str)
}

fn external_crate(segments: &[String]) -> Option<&str> {
    let root = segments.first()?.as_str();
    (!is_relative(root) && root != BACKEND_CRATE).then_some(root)
}

/// Gathers every path mentioned in a file, including each leaf of `use`
/// trees.
#[derive(Default)]
struct PathCollector {
    paths: BTreeSet<Vec<String>>,
}

impl PathCollector {
    fn record_use_tree(&mut self, tree: &syn::UseTree, mut prefix: Vec<String>) {
        match tree {
            syn::UseTree::Path(path) => {
                prefix.push(path.ident.to_string());
                self.record_use_tree(&path.tree, prefix);
            }
            syn::UseTree::Name(name) => {
                prefix.push(name.ident.to_string());
                self.paths.insert(prefix);
            }
            syn::UseTree::Rename(rename) => {
                prefix.push(rename.ident.to_string());
                self.paths.insert(prefix);
            }
            syn::UseTree::Glob(_) => {
                prefix.push("*".to_owned());
                self.paths.insert(prefix);
            }
            syn::UseTree::Group(group) => {
                for item in &group.items {
                    self.record_use_tree(item, prefix.clone());
                }
            }
        }
    }
}

impl<'ast> Visit<'ast> for PathCollector {
    fn visit_path(&mut self, node: &'ast syn::Path) {
        let segments: Vec<String> = node
            .segments
            .iter()
            .map(|segment| segment.ident.to_string())
            .collect();
        if !segments.is_empty() {
            self.paths.insert(segments);
        }
        syn::visit::visit_path(self, node);
    }

    fn visit_item_use(&mut self, node: &'ast syn::ItemUse) {
        self.record_use_tree(&node.tree, Vec::new());
    }
}

fn collect_sources_under(
    src_root: &Path,
    current: &Path,
    sources: &mut Vec<LintSource>,
) -> Result<(), ArchitectureLintError> {
    for entry in fs::read_dir(current)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_sources_under(src_root, &path, sources)?;
            continue;
        }
        if path.extension().and_then(|ext| ext.to_str()) != Some("rs") {
            continue;
        }

        let relative = path
            .strip_prefix(src_root)
            .map_err(|err| ArchitectureLintError::Parse {
                file: path.clone(),
                message: err.to_string(),
            })?
            .to_path_buf();
        let contents = fs::read_to_string(&path)?;
        sources.push(LintSource {
            file: relative,
            contents,
        });
    }
    Ok(())
}
