//! Import specifier resolution.
//!
//! Specifiers are resolved to project-relative file paths when they point
//! inside the project (relative or aliased) and to `external:<package>`
//! otherwise.

use std::collections::{BTreeMap, BTreeSet};

use crate::core::normalize_path;

/// Extensions probed, in order, for extensionless specifiers
pub const SOURCE_EXTENSIONS: [&str; 6] = ["ts", "tsx", "js", "jsx", "mjs", "cjs"];

pub const EXTERNAL_PREFIX: &str = "external:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedImport {
    /// A project file, normalized
    Local(String),
    /// A bare package import, by package name
    External(String),
}

impl ResolvedImport {
    pub fn node_key(&self) -> String {
        match self {
            ResolvedImport::Local(path) => path.clone(),
            ResolvedImport::External(package) => format!("{}{}", EXTERNAL_PREFIX, package),
        }
    }
}

pub struct ImportResolver<'a> {
    known_files: &'a BTreeSet<String>,
    aliases: &'a BTreeMap<String, String>,
}

impl<'a> ImportResolver<'a> {
    pub fn new(known_files: &'a BTreeSet<String>, aliases: &'a BTreeMap<String, String>) -> Self {
        Self {
            known_files,
            aliases,
        }
    }

    pub fn resolve(&self, from: &str, specifier: &str) -> Option<ResolvedImport> {
        let specifier = specifier.trim();
        if specifier.is_empty() {
            return None;
        }

        if let Some(expanded) = self.expand_alias(specifier) {
            return Some(ResolvedImport::Local(self.probe(&collapse_segments(&expanded))));
        }

        if is_relative(specifier) {
            let joined = format!("{}/{}", parent_dir(from), specifier);
            return Some(ResolvedImport::Local(self.probe(&collapse_segments(&joined))));
        }

        if specifier.starts_with('/') {
            return Some(ResolvedImport::Local(self.probe(&collapse_segments(specifier))));
        }

        Some(ResolvedImport::External(package_name(specifier).to_string()))
    }

    // Longest matching alias prefix wins
    fn expand_alias(&self, specifier: &str) -> Option<String> {
        self.aliases
            .iter()
            .filter(|(prefix, _)| !prefix.is_empty() && specifier.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(prefix, target)| format!("{}{}", target, &specifier[prefix.len()..]))
    }

    // Known file, then with each extension, then as a directory index
    fn probe(&self, path: &str) -> String {
        if self.known_files.contains(path) {
            return path.to_string();
        }
        SOURCE_EXTENSIONS
            .iter()
            .map(|ext| format!("{}.{}", path, ext))
            .chain(
                SOURCE_EXTENSIONS
                    .iter()
                    .map(|ext| format!("{}/index.{}", path, ext)),
            )
            .find(|candidate| self.known_files.contains(candidate))
            .unwrap_or_else(|| path.to_string())
    }
}

fn is_relative(specifier: &str) -> bool {
    specifier == "."
        || specifier == ".."
        || specifier.starts_with("./")
        || specifier.starts_with("../")
}

fn parent_dir(path: &str) -> &str {
    path.rfind('/').map(|idx| &path[..idx]).unwrap_or("")
}

/// `@scope/pkg/sub` → `@scope/pkg`, `pkg/sub` → `pkg`
pub fn package_name(specifier: &str) -> &str {
    let mut boundaries = specifier.match_indices('/').map(|(idx, _)| idx);
    let end = if specifier.starts_with('@') {
        boundaries.nth(1)
    } else {
        boundaries.next()
    };
    end.map(|idx| &specifier[..idx]).unwrap_or(specifier)
}

/// Normalize separators and fold `.` and `..` segments
pub fn collapse_segments(path: &str) -> String {
    let normalized = normalize_path(path);
    let mut segments: Vec<&str> = Vec::new();
    for segment in normalized.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn known() -> BTreeSet<String> {
        [
            "src/business/payment/calc.ts",
            "src/business/payment/index.ts",
            "src/utils/money.ts",
            "src/components/Cart.tsx",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    #[test]
    fn test_relative_imports_probe_extensions_and_index() {
        let files = known();
        let aliases = BTreeMap::new();
        let resolver = ImportResolver::new(&files, &aliases);
        let from = "src/business/payment/calc.ts";
        assert_eq!(
            resolver.resolve(from, "../../utils/money"),
            Some(ResolvedImport::Local("src/utils/money.ts".to_string()))
        );
        assert_eq!(
            resolver.resolve("src/components/Cart.tsx", "../business/payment"),
            Some(ResolvedImport::Local("src/business/payment/index.ts".to_string()))
        );
        assert_eq!(
            resolver.resolve(from, "./missing"),
            Some(ResolvedImport::Local("src/business/payment/missing".to_string()))
        );
    }

    #[test]
    fn test_alias_expansion() {
        let files = known();
        let aliases: BTreeMap<String, String> = [
            ("@/".to_string(), "src/".to_string()),
            ("@/components/".to_string(), "src/components/".to_string()),
        ]
        .into_iter()
        .collect();
        let resolver = ImportResolver::new(&files, &aliases);
        assert_eq!(
            resolver.resolve("src/app.ts", "@/utils/money"),
            Some(ResolvedImport::Local("src/utils/money.ts".to_string()))
        );
        assert_eq!(
            resolver.resolve("src/app.ts", "@/components/Cart"),
            Some(ResolvedImport::Local("src/components/Cart.tsx".to_string()))
        );
    }

    #[test]
    fn test_bare_specifiers_are_external() {
        let files = known();
        let aliases = BTreeMap::new();
        let resolver = ImportResolver::new(&files, &aliases);
        assert_eq!(
            resolver.resolve("src/a.ts", "@tanstack/react-query/devtools"),
            Some(ResolvedImport::External("@tanstack/react-query".to_string()))
        );
        assert_eq!(
            resolver.resolve("src/a.ts", "lodash/debounce").map(|r| r.node_key()),
            Some("external:lodash".to_string())
        );
        assert_eq!(resolver.resolve("src/a.ts", "  "), None);
    }

    #[test]
    fn test_collapse_segments() {
        assert_eq!(collapse_segments("./src/a/../b/./c.ts"), "src/b/c.ts");
        assert_eq!(collapse_segments("src\\win\\path.ts"), "src/win/path.ts");
        assert_eq!(collapse_segments("../../x.ts"), "x.ts");
    }
}
