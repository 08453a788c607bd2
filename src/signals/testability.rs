use crate::config::{ScoringConfig, TestabilityRules};
use crate::core::{CodeHints, Target};

// Pure function: first hint branch that holds
fn classify(hints: &CodeHints, rules: &TestabilityRules) -> u8 {
    if hints.pure() {
        rules.pure
    } else if hints.injectable() {
        rules.injectable
    } else if hints.platform_strong() {
        rules.multi_platform_strong
    } else if hints.ui() {
        rules.needs_ui
    } else {
        rules.multi_context
    }
}

/// Ease of testing in `[0, 10]`
pub fn testability(target: &Target, config: &ScoringConfig) -> u8 {
    if let Some(&pinned) = config.overrides.testability.get(&target.key()) {
        return pinned;
    }
    classify(&target.hints(), &config.testability_rules)
}

/// Legacy-mode name of the same signal, scored with `roiRules`
pub fn roi(target: &Target, config: &ScoringConfig) -> u8 {
    if let Some(&pinned) = config.overrides.roi.get(&target.key()) {
        return pinned;
    }
    classify(&target.hints(), config.roi_rules())
}
