//! Symbol Resolver
//!
//! Extracts zero or more canonical symbols from a cleaned message, falling
//! back to conversation context for pronouns and elliptical follow-ups.
//! Resolution is deterministic for a given (message, session snapshot) and
//! performs no I/O.

use std::sync::Arc;

use finchat_core::{AssetCategory, Session, Symbol};

use crate::catalog::SymbolCatalog;
use crate::matching::{find_phrase, normalize_token, phrase_matches, token_spans};

/// Upper bound on symbols extracted from one message; keeps comparison
/// queries from ballooning
pub const MAX_SYMBOLS: usize = 4;

/// Phrases that refer back to a previously discussed crypto symbol only
const CRYPTO_REFERENTS: &[&str] = &["the crypto", "the coin", "that coin", "that crypto"];

/// Pronouns that continue the previous topic
const PRONOUN_CUES: &[&str] = &["it", "that", "this", "they"];

/// Keywords that make a short symbol-less question read as a follow-up
/// ("what's the trend?")
const FOLLOW_UP_KEYWORDS: &[&str] = &[
    "trend", "price", "chart", "graph", "performance", "performing", "doing", "worth",
];

/// Definitional phrasings never continue a topic - "what is a stock?" is a
/// new educational question, not a follow-up about the last symbol
const DEFINITIONAL_CUES: &[&str] = &[
    "what is a", "what is an", "what are", "what does", "how does", "how do", "explain",
    "definition", "meaning",
];

/// Outcome of symbol resolution for one message
#[derive(Clone, Debug, Default)]
pub struct Resolution {
    /// Canonical symbols in first-mention order, deduplicated, capped
    pub symbols: Vec<Symbol>,

    /// True when the symbols came from session context, not message text
    pub from_context: bool,

    /// True when the message is a single bare alias plus punctuation
    /// ("bitcoin?", "$SPY") - terse single-subject queries imply a chart
    pub bare_symbol: bool,
}

pub struct SymbolResolver {
    catalog: Arc<SymbolCatalog>,
}

impl SymbolResolver {
    pub fn new(catalog: Arc<SymbolCatalog>) -> Self {
        Self { catalog }
    }

    /// Resolve symbols from a cleaned message against the catalog and the
    /// session's context.
    pub fn resolve(&self, cleaned: &str, session: &Session) -> Resolution {
        let spans = self.match_aliases(cleaned);

        if spans.is_empty() {
            return self.context_fallback(cleaned, session);
        }

        let mut symbols: Vec<Symbol> = Vec::new();
        for (_, _, symbol) in &spans {
            if !symbols.contains(symbol) {
                symbols.push(symbol.clone());
                if symbols.len() == MAX_SYMBOLS {
                    break;
                }
            }
        }

        let bare_symbol = symbols.len() == 1 && Self::covers_whole_message(cleaned, &spans);

        Resolution {
            symbols,
            from_context: false,
            bare_symbol,
        }
    }

    /// Scan the catalog against the whole message. Single-word aliases must
    /// match a whole token (a ticker never fires inside an unrelated longer
    /// word); multi-word aliases match by boundary-anchored containment.
    /// Longest-alias-first iteration plus span claiming gives the
    /// longest-alias-wins tie-break.
    fn match_aliases(&self, cleaned: &str) -> Vec<(usize, usize, Symbol)> {
        let tokens = token_spans(cleaned);
        let mut spans: Vec<(usize, usize, Symbol)> = Vec::new();

        for (alias, symbol) in self.catalog.aliases() {
            let found = if alias.contains(' ') {
                find_phrase(cleaned, alias).map(|start| (start, alias.len()))
            } else {
                tokens
                    .iter()
                    .find(|(_, tok)| normalize_token(tok) == alias)
                    .map(|&(start, tok)| (start, tok.len()))
            };

            if let Some((start, len)) = found {
                let claimed = spans
                    .iter()
                    .any(|&(s, l, _)| start < s + l && s < start + len);
                if !claimed {
                    spans.push((start, len, symbol.clone()));
                }
            }
        }

        spans.sort_by_key(|&(start, _, _)| start);
        spans
    }

    /// Whether the matched spans leave nothing but punctuation behind
    fn covers_whole_message(cleaned: &str, spans: &[(usize, usize, Symbol)]) -> bool {
        let mut covered = vec![false; cleaned.len()];
        for &(start, len, _) in spans {
            for flag in &mut covered[start..(start + len).min(cleaned.len())] {
                *flag = true;
            }
        }
        cleaned
            .char_indices()
            .all(|(i, c)| !c.is_alphanumeric() || covered[i])
    }

    /// Anaphora and topic continuation: "it", "that coin", or a bare
    /// follow-up question resolve to the last discussed symbol.
    fn context_fallback(&self, cleaned: &str, session: &Session) -> Resolution {
        if DEFINITIONAL_CUES.iter().any(|cue| phrase_matches(cleaned, cue)) {
            return Resolution::default();
        }

        if CRYPTO_REFERENTS.iter().any(|cue| phrase_matches(cleaned, cue)) {
            // "the crypto" only refers back to an actual crypto symbol
            return match (&session.last_symbol, session.last_category) {
                (Some(symbol), Some(AssetCategory::Crypto)) => Resolution {
                    symbols: vec![symbol.clone()],
                    from_context: true,
                    bare_symbol: false,
                },
                _ => Resolution::default(),
            };
        }

        // "the market" names its own subject, not a prior instrument
        if phrase_matches(cleaned, "market") || phrase_matches(cleaned, "markets") {
            return Resolution::default();
        }

        let tokens = token_spans(cleaned);
        let pronoun = tokens
            .iter()
            .any(|(_, tok)| PRONOUN_CUES.contains(&normalize_token(tok)));
        let bare_follow_up = tokens.len() <= 6
            && FOLLOW_UP_KEYWORDS
                .iter()
                .any(|kw| phrase_matches(cleaned, kw));

        if pronoun || bare_follow_up {
            if let Some(symbol) = &session.last_symbol {
                return Resolution {
                    symbols: vec![symbol.clone()],
                    from_context: true,
                    bare_symbol: false,
                };
            }
        }

        Resolution::default()
    }
}
