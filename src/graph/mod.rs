//! File-level dependency graph built from an import map.
//!
//! Each node records its outgoing dependencies, the number of distinct
//! categories it imports from, and fan-in/fan-out counts. The graph
//! is built once per run and shared read-only by every target.

pub mod resolve;

use std::collections::{BTreeMap, BTreeSet};

use crate::config::DepGraphConfig;
use crate::core::{normalize_path, DependencyGraphNode};

pub use resolve::{collapse_segments, ImportResolver, ResolvedImport};

/// `{filePath: [importSpecifier, ...]}`
pub type ImportMap = BTreeMap<String, Vec<String>>;

/// Directory names whose child names the file's category
const CATEGORY_ROOTS: [&str; 4] = ["src", "app", "lib", "packages"];

const ROOT_CATEGORY: &str = "root";
const EXTERNAL_CATEGORY: &str = "external";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DependencyGraph {
    nodes: BTreeMap<String, DependencyGraphNode>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the graph for every file in `imports`.
    ///
    /// Local files that are imported but have no entry of their own still
    /// get a node so that their fan-in is known.
    pub fn build(imports: &ImportMap, config: &DepGraphConfig) -> Self {
        let sources: BTreeMap<String, &Vec<String>> = imports
            .iter()
            .map(|(file, specifiers)| (collapse_segments(file), specifiers))
            .collect();
        let known_files: BTreeSet<String> = sources.keys().cloned().collect();
        let resolver = ImportResolver::new(&known_files, &config.aliases);

        let mut nodes: BTreeMap<String, DependencyGraphNode> = BTreeMap::new();
        for (file, specifiers) in &sources {
            let deps = resolve_deps(file, specifiers, &resolver, config.count_external_imports);
            nodes.insert(file.clone(), outgoing_node(file, deps));
        }

        let imported: BTreeSet<String> = nodes
            .values()
            .flat_map(|node| node.deps.iter())
            .filter(|dep| !dep.starts_with(resolve::EXTERNAL_PREFIX))
            .cloned()
            .collect();
        for dep in imported {
            nodes
                .entry(dep.clone())
                .or_insert_with(|| outgoing_node(&dep, Vec::new()));
        }

        let fan_in = count_fan_in(&nodes);
        for (file, node) in nodes.iter_mut() {
            node.fan_in = fan_in.get(file).copied().unwrap_or(0);
        }

        log::debug!(
            "Built dependency graph: {} files, {} edges",
            nodes.len(),
            nodes.values().map(|n| n.deps.len()).sum::<usize>()
        );
        Self { nodes }
    }

    /// Node for a target's file path, if the graph knows it
    pub fn node(&self, path: &str) -> Option<&DependencyGraphNode> {
        self.nodes
            .get(path)
            .or_else(|| self.nodes.get(&collapse_segments(path)))
    }

    pub fn nodes(&self) -> impl Iterator<Item = (&String, &DependencyGraphNode)> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

// Distinct deps in first-seen order, self-imports dropped
fn resolve_deps(
    file: &str,
    specifiers: &[String],
    resolver: &ImportResolver<'_>,
    count_external: bool,
) -> Vec<String> {
    let mut seen = BTreeSet::new();
    specifiers
        .iter()
        .filter_map(|specifier| resolver.resolve(file, specifier))
        .filter(|resolved| count_external || matches!(resolved, ResolvedImport::Local(_)))
        .map(|resolved| resolved.node_key())
        .filter(|dep| dep != file)
        .filter(|dep| seen.insert(dep.clone()))
        .collect()
}

fn outgoing_node(file: &str, deps: Vec<String>) -> DependencyGraphNode {
    // the file's own category counts when one of its deps lives there
    let touched: BTreeSet<String> = deps.iter().map(|dep| category_of(dep)).collect();

    DependencyGraphNode {
        category: category_of(file),
        cross_module_score: touched.len() as u32,
        fan_out: deps.len() as u32,
        fan_in: 0,
        deps,
    }
}

fn count_fan_in(nodes: &BTreeMap<String, DependencyGraphNode>) -> BTreeMap<String, u32> {
    let mut fan_in = BTreeMap::new();
    for (file, node) in nodes {
        for dep in node.deps.iter().filter(|dep| *dep != file) {
            *fan_in.entry(dep.clone()).or_insert(0) += 1;
        }
    }
    fan_in
}

/// Module category of a file path.
///
/// The directory after the first `src/`, `app/`, `lib/` or `packages/`
/// segment; otherwise the first directory; otherwise `root`. External
/// packages share the `external` category.
pub fn category_of(path: &str) -> String {
    if path.starts_with(resolve::EXTERNAL_PREFIX) {
        return EXTERNAL_CATEGORY.to_string();
    }

    let normalized = normalize_path(path);
    let segments: Vec<&str> = normalized.split('/').filter(|s| !s.is_empty()).collect();
    let dirs = match segments.split_last() {
        Some((_, dirs)) => dirs,
        None => return ROOT_CATEGORY.to_string(),
    };

    dirs.iter()
        .position(|dir| CATEGORY_ROOTS.contains(dir))
        .and_then(|idx| dirs.get(idx + 1))
        .or_else(|| dirs.first())
        .map(|dir| dir.to_string())
        .unwrap_or_else(|| ROOT_CATEGORY.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn imports(entries: &[(&str, &[&str])]) -> ImportMap {
        entries
            .iter()
            .map(|(file, specs)| {
                (
                    file.to_string(),
                    specs.iter().map(|s| s.to_string()).collect(),
                )
            })
            .collect()
    }

    fn sample() -> ImportMap {
        imports(&[
            (
                "src/business/payment/calc.ts",
                &["../../utils/money", "../../api/client", "./rates", "react"],
            ),
            ("src/business/payment/rates.ts", &["../../utils/money"]),
            ("src/components/Checkout.tsx", &["../business/payment/calc", "react"]),
            ("src/utils/money.ts", &[]),
        ])
    }

    #[test]
    fn test_fan_in_and_fan_out() {
        let graph = DependencyGraph::build(&sample(), &DepGraphConfig::default());

        let calc = graph.node("src/business/payment/calc.ts").unwrap();
        assert_eq!(calc.category, "business");
        assert_eq!(calc.fan_out, 3);
        assert_eq!(calc.fan_in, 1);
        // utils, api and business (via rates)
        assert_eq!(calc.cross_module_score, 3);

        let money = graph.node("./src/utils/money.ts").unwrap();
        assert_eq!(money.fan_in, 2);
        assert_eq!(money.fan_out, 0);
    }

    #[test]
    fn test_cross_module_score_counts_distinct_dep_categories() {
        let map = imports(&[
            ("src/a/main.ts", &["./b", "../x/one", "../x/two", "../y/three"]),
            ("src/a/b.ts", &[]),
            ("src/a/solo.ts", &["./b"]),
            ("src/a/idle.ts", &[]),
        ]);
        let graph = DependencyGraph::build(&map, &DepGraphConfig::default());

        assert_eq!(graph.node("src/a/main.ts").unwrap().cross_module_score, 3);
        assert_eq!(graph.node("src/a/solo.ts").unwrap().cross_module_score, 1);
        assert_eq!(graph.node("src/a/idle.ts").unwrap().cross_module_score, 0);
    }

    #[test]
    fn test_unresolved_import_gets_a_node() {
        let graph = DependencyGraph::build(&sample(), &DepGraphConfig::default());
        let client = graph.node("src/api/client").unwrap();
        assert_eq!(client.fan_in, 1);
        assert_eq!(client.category, "api");
        assert_eq!(graph.len(), 5);
    }

    #[test]
    fn test_external_imports_are_opt_in() {
        let config = DepGraphConfig {
            count_external_imports: true,
            ..Default::default()
        };
        let graph = DependencyGraph::build(&sample(), &config);
        let checkout = graph.node("src/components/Checkout.tsx").unwrap();
        assert_eq!(checkout.fan_out, 2);
        assert_eq!(checkout.cross_module_score, 2);
        assert!(checkout.deps.contains(&"external:react".to_string()));
        // packages never become nodes of their own
        assert!(graph.node("external:react").is_none());

        let without = DependencyGraph::build(&sample(), &DepGraphConfig::default());
        assert_eq!(without.node("src/components/Checkout.tsx").unwrap().fan_out, 1);
    }

    #[test]
    fn test_duplicate_and_self_imports_ignored() {
        let map = imports(&[
            ("src/a/x.ts", &["./y", "./y.ts", "./x"]),
            ("src/a/y.ts", &[]),
        ]);
        let graph = DependencyGraph::build(&map, &DepGraphConfig::default());
        let x = graph.node("src/a/x.ts").unwrap();
        assert_eq!(x.deps, vec!["src/a/y.ts".to_string()]);
        assert_eq!(graph.node("src/a/y.ts").unwrap().fan_in, 1);
    }

    #[test]
    fn test_category_of() {
        assert_eq!(category_of("src/business/payment/calc.ts"), "business");
        assert_eq!(category_of("packages/ui/src/Button.tsx"), "ui");
        assert_eq!(category_of("scripts/build.ts"), "scripts");
        assert_eq!(category_of("src/index.ts"), "src");
        assert_eq!(category_of("index.ts"), "root");
        assert_eq!(category_of("external:react"), "external");
    }
}
