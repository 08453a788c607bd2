use indoc::indoc;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use testrank::commands::{check_config_file, init_config, run_scoring, ScoreConfig};
use testrank::io::InputPaths;
use testrank::signals::likelihood;
use testrank::{
    load_config, DependencyGraph, GitSignal, ImportMap, OutputFormat, PresetLevel, Priority,
    ScoringConfig, ScoringMode,
};

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

const TARGETS: &str = indoc! {r#"
    [
      {"name": "calculateTotal", "path": "src/business/payment/calc.ts", "type": "function", "loc": 40},
      {"name": "formatDate", "path": "src/utils/date.ts", "type": "function",
       "metadata": {"isPure": true}},
      {"name": "CartButton", "path": "src/components/CartButton.tsx", "type": "component"}
    ]
"#};

const METRICS: &str = indoc! {r#"
    {
      "src/business/payment/calc.ts#calculateTotal": {"cyclomatic": 12, "cognitive": 9},
      "src/utils/date.ts#formatDate": {"cyclomatic": 2}
    }
"#};

fn score_config(dir: &TempDir, config: Option<PathBuf>) -> ScoreConfig {
    ScoreConfig {
        targets: write(dir, "targets.json", TARGETS),
        inputs: InputPaths {
            metrics: Some(write(dir, "metrics.json", METRICS)),
            git: None,
            coverage: None,
        },
        imports: None,
        config,
        ai_suggestions: None,
        format: OutputFormat::Json,
        output: None,
        strict: false,
        top: None,
    }
}

/// Targets without metrics are reported as skipped, the rest are ranked
#[test]
fn test_pipeline_ranks_and_skips() {
    let dir = TempDir::new().unwrap();
    let cfg = score_config(&dir, Some(write(&dir, "empty.json", "{}")));

    let report = run_scoring(&cfg).unwrap();

    let names: Vec<&str> = report
        .targets
        .iter()
        .map(|t| t.target.name.as_str())
        .collect();
    assert_eq!(names, vec!["calculateTotal", "formatDate"]);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(
        report.skipped[0].key(),
        "src/components/CartButton.tsx#CartButton"
    );
    assert!(report.targets[0].score >= report.targets[1].score);
}

#[test]
fn test_strict_mode_fails_on_skipped_target() {
    let dir = TempDir::new().unwrap();
    let mut cfg = score_config(&dir, Some(write(&dir, "empty.json", "{}")));
    cfg.strict = true;

    let err = run_scoring(&cfg).unwrap_err();
    assert!(err.to_string().contains("could not be scored"));
}

#[test]
fn test_top_limits_report() {
    let dir = TempDir::new().unwrap();
    let mut cfg = score_config(&dir, Some(write(&dir, "empty.json", "{}")));
    cfg.top = Some(1);

    let report = run_scoring(&cfg).unwrap();
    assert_eq!(report.targets.len(), 1);
    assert_eq!(report.targets[0].target.name, "calculateTotal");
}

/// Layered mode reports the layer's display name and uses its weights
#[test]
fn test_layered_config_file_with_comments() {
    let dir = TempDir::new().unwrap();
    let config = write(
        &dir,
        ".testrank.jsonc",
        indoc! {r#"
            {
              // per-layer weighting
              "scoringMode": "layered",
              "layers": {
                "business": {
                  "name": "Business Logic",
                  "weights": {"BC": 0.5, "ER": 0.5},
                  "patterns": ["src/business/**"]
                },
                "foundation": {
                  "name": "Foundation",
                  "weights": {"CC": 1.0},
                  "patterns": ["src/utils/**"]
                }
              }
            }
        "#},
    );
    let cfg = score_config(&dir, Some(config));

    let report = run_scoring(&cfg).unwrap();

    let by_name = |name: &str| {
        report
            .targets
            .iter()
            .find(|t| t.target.name == name)
            .unwrap()
            .clone()
    };
    let calc = by_name("calculateTotal");
    assert_eq!(calc.layer_name.as_deref(), Some("Business Logic"));
    assert_eq!(
        calc.score,
        f64::from(calc.bc) * 0.5 + f64::from(calc.er) * 0.5
    );

    let date = by_name("formatDate");
    assert_eq!(date.layer_name.as_deref(), Some("Foundation"));
    assert_eq!(date.score, f64::from(date.cc));
}

/// A zero-coverage file gets the full boost on top of its combined score
#[test]
fn test_coverage_boost_raises_uncovered_targets() {
    let dir = TempDir::new().unwrap();
    let coverage = write(
        &dir,
        "coverage-summary.json",
        indoc! {r#"
            {
              "total": {"lines": {"pct": 40}},
              "/repo/src/business/payment/calc.ts": {"lines": {"pct": 0}},
              "/repo/src/utils/date.ts": {"lines": {"pct": 95}}
            }
        "#},
    );

    let mut plain = score_config(&dir, Some(write(&dir, "plain.json", "{}")));
    plain.inputs.coverage = Some(coverage.clone());
    let mut boosted = plain.clone();
    boosted.config = Some(write(
        &dir,
        "boost.json",
        r#"{"coverageBoost": {"enable": true, "threshold": 60, "maxBoost": 0.5, "scale": 0.5}}"#,
    ));

    let before = run_scoring(&plain).unwrap();
    let after = run_scoring(&boosted).unwrap();

    let score_of = |report: &testrank::io::ScoreReport, name: &str| {
        report
            .targets
            .iter()
            .find(|t| t.target.name == name)
            .map(|t| (t.score, t.coverage_pct))
            .unwrap()
    };
    let (calc_before, pct) = score_of(&before, "calculateTotal");
    let (calc_after, _) = score_of(&after, "calculateTotal");
    assert_eq!(pct, Some(0.0));
    assert!((calc_after - calc_before - 0.5).abs() < 0.011);

    // above the threshold: untouched
    assert_eq!(score_of(&before, "formatDate"), score_of(&after, "formatDate"));
}

#[test]
fn test_busy_graph_node_boosts_likelihood() {
    let mut imports = ImportMap::new();
    imports.insert("src/core/util.ts".to_string(), vec![]);
    for feature in ["cart", "checkout", "search", "profile"] {
        imports.insert(
            format!("src/{}/index.ts", feature),
            vec!["../core/util".to_string(), "react".to_string()],
        );
    }

    let mut config = ScoringConfig::default();
    config.dep_graph.fan_threshold = 3;
    let graph = DependencyGraph::build(&imports, &config.dep_graph);

    let util = graph.node("src/core/util.ts").unwrap();
    assert_eq!(util.fan_in, 4);
    assert_eq!(util.category, "core");
    // external packages stay out of the graph
    assert!(graph.node("external:react").is_none());

    let quiet = GitSignal::default();
    let base = likelihood(&quiet, None, &config);
    let boosted = likelihood(&quiet, Some(util), &config);
    assert_eq!(boosted, base + config.likelihood_rules.boost.delta);

    config.dep_graph.enable = false;
    assert_eq!(likelihood(&quiet, Some(util), &config), base);
}

#[test]
fn test_init_then_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".testrank.json");

    init_config(&path, PresetLevel::Layered, false).unwrap();
    assert!(init_config(&path, PresetLevel::Layered, false).is_err());
    init_config(&path, PresetLevel::Layered, true).unwrap();

    let config = load_config(Some(&path)).unwrap();
    assert_eq!(config.scoring_mode, ScoringMode::Layered);
    assert!(config.layers.as_ref().is_some_and(|l| l.contains_key("business")));

    let report = check_config_file(&path).unwrap();
    assert!(report.is_valid(), "{:?}", report.problems);
}

#[test]
fn test_check_config_collects_every_problem() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "bad.json",
        indoc! {r#"
            {
              "thresholds": {"P0": 4, "P1": 6, "P2": 8},
              "bcCapForNonMainChain": 42,
              "scoringMode": "layered"
            }
        "#},
    );

    let report = check_config_file(&path).unwrap();
    assert!(!report.is_valid());
    assert!(report.problems.len() >= 3, "{:?}", report.problems);
}

#[test]
fn test_p1_bucket_from_default_weights() {
    let dir = TempDir::new().unwrap();
    let cfg = score_config(&dir, Some(write(&dir, "empty.json", "{}")));
    let report = run_scoring(&cfg).unwrap();
    let calc = &report.targets[0];
    assert_eq!(calc.target.name, "calculateTotal");
    assert!(matches!(calc.priority, Priority::P0 | Priority::P1));
}
