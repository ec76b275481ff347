//! Chart-Trigger Evaluator
//!
//! Decides whether a reply should carry a visual trend. Rules run in
//! priority order; the default is text-only, so educational questions never
//! chart even when a stray symbol matched.

use finchat_core::{AssetCategory, Intent};

use crate::catalog::SymbolCatalog;
use crate::matching::phrase_matches;
use crate::resolver::Resolution;

/// Phrasings that ask for a visual
const VISUAL_CUES: &[&str] = &[
    "chart",
    "graph",
    "trend",
    "plot",
    "show me",
    "visualize",
    "over time",
    "history",
    "historical",
    "performance",
];

/// Whether the user's phrasing implies they want a visual trend
pub fn should_show_chart(
    cleaned: &str,
    intent: Intent,
    resolution: &Resolution,
    catalog: &SymbolCatalog,
) -> bool {
    // Refusals never chart, whatever else matched
    if intent.is_refusal() {
        return false;
    }

    // Explicit visual cue with a subject to chart
    if !resolution.symbols.is_empty() && VISUAL_CUES.iter().any(|cue| phrase_matches(cleaned, cue))
    {
        return true;
    }

    // Terse single-subject query: "bitcoin?" means "show me bitcoin"
    if resolution.bare_symbol {
        return true;
    }

    if intent == Intent::Comparison && resolution.symbols.len() >= 2 {
        return true;
    }

    // A market overview has no single aggregate to chart unless the user
    // named a specific index
    if intent == Intent::MarketOverview {
        return resolution
            .symbols
            .iter()
            .any(|s| catalog.category(s) == Some(AssetCategory::Index));
    }

    false
}
