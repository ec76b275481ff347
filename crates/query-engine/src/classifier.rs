//! Intent Classifier
//!
//! Ordered rule table over cleaned message text plus resolution signals.
//! First matching rule wins, so precedence is declared as data rather than
//! nested conditionals: advice-seeking is checked before informational so
//! "is AAPL a good buy" refuses even though AAPL resolves.

use finchat_core::{AssetCategory, Intent};

use crate::catalog::SymbolCatalog;
use crate::matching::phrase_matches;
use crate::resolver::Resolution;

const GREETING_PATTERNS: &[&str] = &[
    "hi",
    "hello",
    "hey",
    "yo",
    "howdy",
    "greetings",
    "good morning",
    "good afternoon",
    "good evening",
    "how are you",
    "what can you do",
    "what do you do",
    "who are you",
    "help",
    "thanks",
    "thank you",
];

const ADVICE_PATTERNS: &[&str] = &[
    "should i buy",
    "should i sell",
    "should i invest",
    "should i hold",
    "should we buy",
    "good buy",
    "good investment",
    "worth buying",
    "worth investing",
    "buy now",
    "sell now",
    "what should i buy",
    "what should i invest",
    "recommend",
    "is it too late",
    "go all in",
];

const COMPARISON_MARKERS: &[&str] = &[
    "vs",
    "versus",
    "compare",
    "compared to",
    "better than",
    "against",
    "difference between",
];

const MARKET_PATTERNS: &[&str] = &[
    "market overview",
    "how is the market",
    "how s the market",
    "how are the markets",
    "market summary",
    "market today",
    "markets today",
    "the market doing",
    "markets doing",
    "state of the market",
    "overall market",
];

/// Terms that mark a message as financial even when no symbol resolves
pub(crate) const FINANCIAL_KEYWORDS: &[&str] = &[
    "price",
    "prices",
    "stock",
    "stocks",
    "share",
    "shares",
    "crypto",
    "cryptocurrency",
    "coin",
    "coins",
    "token",
    "market",
    "markets",
    "invest",
    "investing",
    "investment",
    "trade",
    "trading",
    "earnings",
    "dividend",
    "dividends",
    "etf",
    "fund",
    "index",
    "trend",
    "chart",
    "portfolio",
    "ticker",
    "exchange",
    "ipo",
    "bond",
    "bonds",
    "commodity",
    "commodities",
    "futures",
    "bull",
    "bullish",
    "bear",
    "bearish",
    "inflation",
    "interest rate",
    "volatility",
];

/// What a rule needs beyond its phrase patterns in order to fire
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Requirement {
    /// No financial term and no symbol from the message text
    NoFinancialSignal,

    /// Some financial subject: a symbol (text or context) or a keyword
    FinancialSubject,

    /// Nothing financial anywhere, context included
    NothingResolvable,

    /// Two text symbols, or a comparison marker
    SymbolsOrMarker,

    /// At most index-category symbols (general market question)
    MarketScope,

    /// Any financial signal at all
    AnyFinancialSignal,
}

struct IntentRule {
    intent: Intent,
    patterns: &'static [&'static str],
    requires: Requirement,
}

/// Classification order from highest to lowest precedence
const RULES: &[IntentRule] = &[
    IntentRule {
        intent: Intent::Greeting,
        patterns: GREETING_PATTERNS,
        requires: Requirement::NoFinancialSignal,
    },
    IntentRule {
        intent: Intent::AdviceRequest,
        patterns: ADVICE_PATTERNS,
        requires: Requirement::FinancialSubject,
    },
    IntentRule {
        intent: Intent::OffTopic,
        patterns: &[],
        requires: Requirement::NothingResolvable,
    },
    IntentRule {
        intent: Intent::Comparison,
        patterns: COMPARISON_MARKERS,
        requires: Requirement::SymbolsOrMarker,
    },
    IntentRule {
        intent: Intent::MarketOverview,
        patterns: MARKET_PATTERNS,
        requires: Requirement::MarketScope,
    },
    IntentRule {
        intent: Intent::Informational,
        patterns: &[],
        requires: Requirement::AnyFinancialSignal,
    },
];

/// Signals computed once per message and shared across all rules
struct Signals {
    text_symbols: usize,
    context_symbols: usize,
    has_keyword: bool,
    all_index: bool,
}

impl Signals {
    fn read(cleaned: &str, resolution: &Resolution, catalog: &SymbolCatalog) -> Self {
        let (text_symbols, context_symbols) = if resolution.from_context {
            (0, resolution.symbols.len())
        } else {
            (resolution.symbols.len(), 0)
        };
        Self {
            text_symbols,
            context_symbols,
            has_keyword: FINANCIAL_KEYWORDS
                .iter()
                .any(|kw| phrase_matches(cleaned, kw)),
            all_index: resolution
                .symbols
                .iter()
                .all(|s| catalog.category(s) == Some(AssetCategory::Index)),
        }
    }

    fn any_symbol(&self) -> bool {
        self.text_symbols > 0 || self.context_symbols > 0
    }
}

#[derive(Clone, Debug)]
pub struct ClassifierConfig {
    /// Intent used when no rule matches. The closed-world default refuses
    /// unrecognized phrasing; made configurable so deployments can observe
    /// and tune over-refusal instead of silently baking it in.
    pub fallback_intent: Intent,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            fallback_intent: Intent::OffTopic,
        }
    }
}

pub struct IntentClassifier {
    config: ClassifierConfig,
}

impl IntentClassifier {
    pub fn new() -> Self {
        Self::with_config(ClassifierConfig::default())
    }

    pub fn with_config(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Classify a cleaned message. Never fails - malformed input lands on a
    /// refusal or the empty-query intent, not an error.
    pub fn classify(
        &self,
        cleaned: &str,
        resolution: &Resolution,
        catalog: &SymbolCatalog,
    ) -> Intent {
        if cleaned.is_empty() {
            return Intent::EmptyQuery;
        }

        let sig = Signals::read(cleaned, resolution, catalog);

        for rule in RULES {
            let pattern_hit = rule.patterns.is_empty()
                || rule.patterns.iter().any(|p| phrase_matches(cleaned, p));
            if Self::rule_fires(rule.requires, pattern_hit, &sig) {
                return rule.intent;
            }
        }

        tracing::debug!(
            fallback = %self.config.fallback_intent,
            message = cleaned,
            "no intent rule matched, using fallback intent"
        );
        self.config.fallback_intent
    }

    fn rule_fires(requires: Requirement, pattern_hit: bool, sig: &Signals) -> bool {
        match requires {
            Requirement::NoFinancialSignal => {
                pattern_hit && !sig.has_keyword && sig.text_symbols == 0
            }
            Requirement::FinancialSubject => {
                pattern_hit && (sig.any_symbol() || sig.has_keyword)
            }
            Requirement::NothingResolvable => !sig.has_keyword && !sig.any_symbol(),
            Requirement::SymbolsOrMarker => sig.text_symbols >= 2 || pattern_hit,
            Requirement::MarketScope => pattern_hit && sig.all_index,
            Requirement::AnyFinancialSignal => sig.any_symbol() || sig.has_keyword,
        }
    }
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::clean_message;
    use crate::resolver::SymbolResolver;
    use finchat_core::Session;
    use std::sync::Arc;

    fn classify(message: &str) -> Intent {
        classify_in(message, &Session::new())
    }

    fn classify_in(message: &str, session: &Session) -> Intent {
        let catalog = Arc::new(SymbolCatalog::builtin().unwrap());
        let resolver = SymbolResolver::new(catalog.clone());
        let cleaned = clean_message(message);
        let resolution = resolver.resolve(&cleaned, session);
        IntentClassifier::new().classify(&cleaned, &resolution, &catalog)
    }

    #[test]
    fn test_greeting() {
        assert_eq!(classify("hi"), Intent::Greeting);
        assert_eq!(classify("Hello!"), Intent::Greeting);
        assert_eq!(classify("hey, what can you do?"), Intent::Greeting);
    }

    #[test]
    fn test_greeting_with_financial_tail_is_not_greeting() {
        assert_eq!(
            classify("hello, what's the price of apple?"),
            Intent::Informational
        );
    }

    #[test]
    fn test_advice_refused_even_for_valid_symbol() {
        assert_eq!(classify("should I buy AAPL?"), Intent::AdviceRequest);
        assert_eq!(classify("is bitcoin a good buy?"), Intent::AdviceRequest);
        assert_eq!(
            classify("what should I invest in right now? stocks?"),
            Intent::AdviceRequest
        );
    }

    #[test]
    fn test_advice_without_financial_subject_is_off_topic() {
        assert_eq!(classify("should I buy a puppy?"), Intent::OffTopic);
    }

    #[test]
    fn test_off_topic() {
        assert_eq!(classify("how do I cook pasta?"), Intent::OffTopic);
        assert_eq!(classify("what's the weather tomorrow"), Intent::OffTopic);
    }

    #[test]
    fn test_comparison() {
        assert_eq!(classify("bitcoin vs gold"), Intent::Comparison);
        assert_eq!(classify("compare AAPL and MSFT"), Intent::Comparison);
        // Two symbols with no marker still compare
        assert_eq!(classify("ethereum solana"), Intent::Comparison);
    }

    #[test]
    fn test_market_overview() {
        assert_eq!(classify("how is the market today?"), Intent::MarketOverview);
        assert_eq!(classify("market overview please"), Intent::MarketOverview);
        // A named index keeps market scope
        assert_eq!(
            classify("market overview for the nasdaq"),
            Intent::MarketOverview
        );
    }

    #[test]
    fn test_informational_default() {
        assert_eq!(classify("what's the price of bitcoin?"), Intent::Informational);
        assert_eq!(classify("tesla earnings"), Intent::Informational);
        // Financial keyword without a symbol still lands here
        assert_eq!(classify("what is a stock?"), Intent::Informational);
    }

    #[test]
    fn test_empty_query() {
        assert_eq!(classify(""), Intent::EmptyQuery);
        assert_eq!(classify("   \t  "), Intent::EmptyQuery);
    }

    #[test]
    fn test_follow_up_uses_context() {
        let mut session = Session::new();
        session.record(
            Intent::Informational,
            &[finchat_core::Symbol::from("AMD")],
            Some(finchat_core::AssetCategory::Equity),
            Some("stocks"),
        );
        assert_eq!(classify_in("what's the trend?", &session), Intent::Informational);
        assert_eq!(classify_in("should I buy it?", &session), Intent::AdviceRequest);
    }

    #[test]
    fn test_configurable_fallback() {
        let classifier = IntentClassifier::with_config(ClassifierConfig {
            fallback_intent: Intent::Informational,
        });
        assert_eq!(classifier.config.fallback_intent, Intent::Informational);
    }
}
