//! Architectural layer resolution.
//!
//! Explicit layers win. Otherwise path markers and code hints decide, then
//! the target kind, then the configured glob patterns.

use glob::Pattern;

use crate::config::ScoringConfig;
use crate::core::{normalize_path, ConfigError, Layer, Target, TargetKind};

const STATE_MARKERS: [&str; 2] = ["/atoms/", "/stores/"];
const CONTEXT_MARKER: &str = "/context/";
const UI_HOOK_MARKERS: [&str; 2] = ["/components/", "/pages/"];

/// Compile glob patterns, failing on the first invalid one
pub fn compile_patterns(patterns: &[String]) -> Result<Vec<Pattern>, ConfigError> {
    patterns
        .iter()
        .map(|pattern| {
            Pattern::new(pattern).map_err(|source| ConfigError::Pattern {
                pattern: pattern.clone(),
                source,
            })
        })
        .collect()
}

/// Layer patterns compiled once, in resolution order
#[derive(Debug, Clone, Default)]
pub struct LayerResolver {
    ordered: Vec<(Layer, Vec<Pattern>)>,
}

impl LayerResolver {
    pub fn new(config: &ScoringConfig) -> Result<Self, ConfigError> {
        let Some(layers) = config.layers.as_ref() else {
            return Ok(Self::default());
        };

        let well_known = Layer::RESOLUTION_ORDER
            .iter()
            .filter_map(|layer| layers.get(layer.as_str()).map(|cfg| (layer.clone(), cfg)));
        // BTreeMap iteration is already alphabetical
        let remaining = layers
            .iter()
            .map(|(name, cfg)| (Layer::from(name.as_str()), cfg))
            .filter(|(layer, _)| !Layer::RESOLUTION_ORDER.contains(layer) && !layer.is_unknown());

        let ordered = well_known
            .chain(remaining)
            .map(|(layer, cfg)| Ok((layer, compile_patterns(&cfg.patterns)?)))
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(Self { ordered })
    }

    /// Resolved layer for `target`; `Layer::Unknown` when nothing applies
    pub fn resolve(&self, target: &Target) -> Layer {
        if !target.layer.is_unknown() {
            return target.layer.clone();
        }

        let path = format!("/{}", normalize_path(&target.path));
        if let Some(layer) = resolve_by_hints(target, &path) {
            return layer;
        }

        let relative = normalize_path(&target.path);
        self.ordered
            .iter()
            .find(|(_, patterns)| patterns.iter().any(|p| p.matches(&relative)))
            .map(|(layer, _)| layer.clone())
            .unwrap_or(Layer::Unknown)
    }
}

// Pure function: path markers, code hints and target kind
fn resolve_by_hints(target: &Target, path: &str) -> Option<Layer> {
    let hints = target.hints();
    let under_state = STATE_MARKERS.iter().any(|marker| path.contains(marker));
    let under_context = path.contains(CONTEXT_MARKER);

    if under_state {
        return Some(Layer::State);
    }

    if hints.needs_ui == Some(true) {
        return Some(if under_context { Layer::State } else { Layer::Ui });
    }

    if hints.pure() && hints.injectable() {
        return Some(Layer::Foundation);
    }

    if !under_context {
        if hints.pure() {
            return Some(Layer::Foundation);
        }
        if hints.is_pure == Some(false) && hints.needs_ui == Some(false) {
            return Some(Layer::Business);
        }
    }

    match target.kind {
        TargetKind::Component => Some(Layer::Ui),
        TargetKind::Hook => {
            if UI_HOOK_MARKERS.iter().any(|marker| path.contains(marker)) {
                Some(Layer::Ui)
            } else {
                Some(Layer::Business)
            }
        }
        TargetKind::Function | TargetKind::Atom => None,
    }
}
