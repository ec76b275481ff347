//! Understanding
//!
//! The structured interpretation of one chat message. Built exactly once per
//! request by the query engine and handed to the response layer; never
//! persisted.

use serde::{Deserialize, Serialize};

use crate::intent::Intent;
use crate::symbol::Symbol;

/// Immutable result of interpreting one message
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Understanding {
    /// Classified intent
    pub intent: Intent,

    /// Canonical symbols in first-mention order (may be empty, never omitted
    /// on the wire)
    pub symbols: Vec<Symbol>,

    /// First of `symbols`, if any
    pub primary_symbol: Option<Symbol>,

    /// Whether the reply should carry a visual trend
    pub show_chart: bool,

    /// Whether the reply is a deliberate non-answer
    pub is_refusal: bool,

    /// True when `symbols` came from conversation context rather than the
    /// message text (pronoun or elliptical follow-up)
    pub from_context: bool,

    /// Key of the session this understanding was produced for. The session
    /// outlives the understanding; this is a reference, not ownership.
    pub session_key: String,
}

impl Understanding {
    pub fn primary_symbol(&self) -> Option<&Symbol> {
        self.primary_symbol.as_ref()
    }
}
