//! Picking chart or text for the selected column

use sheet_pulse_types::{DisplayModeOverride, EffectiveMode, Verdict};

/// Combine the user's mode choice with the classifier verdict.
///
/// An explicit chart/text choice always wins; `Auto` charts categorical
/// columns and shows everything else as text.
pub fn resolve(mode: DisplayModeOverride, verdict: Verdict) -> EffectiveMode {
    match (mode, verdict) {
        (DisplayModeOverride::Chart, _) => EffectiveMode::Chart,
        (DisplayModeOverride::Text, _) => EffectiveMode::Text,
        (DisplayModeOverride::Auto, Verdict::Categorical) => EffectiveMode::Chart,
        (DisplayModeOverride::Auto, Verdict::FreeText) => EffectiveMode::Text,
    }
}
