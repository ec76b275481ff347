//! Symbol Catalog
//!
//! Static mapping from instrument aliases (tickers, company names, crypto
//! nicknames, commodity names) to canonical symbols. Read-only after load
//! and freely shared without locking. Integrity problems are programming or
//! data errors and fail fast here, never at request time.

use std::collections::HashMap;

use finchat_core::{AssetCategory, EngineError, Result, Symbol};

use crate::matching::{clean_message, normalize_token};

/// One alias row: (alias text, canonical symbol, category)
type AliasSpec = (&'static str, &'static str, AssetCategory);

#[rustfmt::skip]
const BUILTIN_ALIASES: &[AliasSpec] = &[
    // Equities
    ("aapl", "AAPL", AssetCategory::Equity),
    ("apple", "AAPL", AssetCategory::Equity),
    ("msft", "MSFT", AssetCategory::Equity),
    ("microsoft", "MSFT", AssetCategory::Equity),
    ("googl", "GOOGL", AssetCategory::Equity),
    ("goog", "GOOGL", AssetCategory::Equity),
    ("google", "GOOGL", AssetCategory::Equity),
    ("alphabet", "GOOGL", AssetCategory::Equity),
    ("amzn", "AMZN", AssetCategory::Equity),
    ("amazon", "AMZN", AssetCategory::Equity),
    ("tsla", "TSLA", AssetCategory::Equity),
    ("tesla", "TSLA", AssetCategory::Equity),
    ("meta", "META", AssetCategory::Equity),
    ("facebook", "META", AssetCategory::Equity),
    ("nvda", "NVDA", AssetCategory::Equity),
    ("nvidia", "NVDA", AssetCategory::Equity),
    ("amd", "AMD", AssetCategory::Equity),
    ("advanced micro devices", "AMD", AssetCategory::Equity),
    ("nflx", "NFLX", AssetCategory::Equity),
    ("netflix", "NFLX", AssetCategory::Equity),
    ("gm", "GM", AssetCategory::Equity),
    ("general motors", "GM", AssetCategory::Equity),
    ("ford", "F", AssetCategory::Equity),
    ("jpm", "JPM", AssetCategory::Equity),
    ("jpmorgan", "JPM", AssetCategory::Equity),
    ("jp morgan", "JPM", AssetCategory::Equity),
    ("dis", "DIS", AssetCategory::Equity),
    ("disney", "DIS", AssetCategory::Equity),
    ("intc", "INTC", AssetCategory::Equity),
    ("intel", "INTC", AssetCategory::Equity),
    ("boeing", "BA", AssetCategory::Equity),

    // Crypto
    ("btc", "BTC", AssetCategory::Crypto),
    ("bitcoin", "BTC", AssetCategory::Crypto),
    ("xbt", "BTC", AssetCategory::Crypto),
    ("eth", "ETH", AssetCategory::Crypto),
    ("ethereum", "ETH", AssetCategory::Crypto),
    ("ether", "ETH", AssetCategory::Crypto),
    ("doge", "DOGE", AssetCategory::Crypto),
    ("dogecoin", "DOGE", AssetCategory::Crypto),
    ("sol", "SOL", AssetCategory::Crypto),
    ("solana", "SOL", AssetCategory::Crypto),
    ("ada", "ADA", AssetCategory::Crypto),
    ("cardano", "ADA", AssetCategory::Crypto),
    ("xrp", "XRP", AssetCategory::Crypto),
    ("ripple", "XRP", AssetCategory::Crypto),
    ("ltc", "LTC", AssetCategory::Crypto),
    ("litecoin", "LTC", AssetCategory::Crypto),
    ("shib", "SHIB", AssetCategory::Crypto),
    ("shiba inu", "SHIB", AssetCategory::Crypto),

    // Commodities
    ("gold", "XAU", AssetCategory::Commodity),
    ("xau", "XAU", AssetCategory::Commodity),
    ("silver", "XAG", AssetCategory::Commodity),
    ("xag", "XAG", AssetCategory::Commodity),
    ("oil", "WTI", AssetCategory::Commodity),
    ("crude", "WTI", AssetCategory::Commodity),
    ("crude oil", "WTI", AssetCategory::Commodity),
    ("wti", "WTI", AssetCategory::Commodity),
    ("natural gas", "NG", AssetCategory::Commodity),
    ("natgas", "NG", AssetCategory::Commodity),
    ("copper", "HG", AssetCategory::Commodity),

    // Indices
    ("s p 500", "SPX", AssetCategory::Index),
    ("sp 500", "SPX", AssetCategory::Index),
    ("sp500", "SPX", AssetCategory::Index),
    ("spx", "SPX", AssetCategory::Index),
    ("spy", "SPY", AssetCategory::Index),
    ("dow", "DJI", AssetCategory::Index),
    ("dow jones", "DJI", AssetCategory::Index),
    ("dji", "DJI", AssetCategory::Index),
    ("nasdaq", "IXIC", AssetCategory::Index),
    ("ixic", "IXIC", AssetCategory::Index),
    ("vix", "VIX", AssetCategory::Index),
    ("volatility index", "VIX", AssetCategory::Index),
];

/// Validated alias table, read-only after construction
pub struct SymbolCatalog {
    /// Exact cleaned-alias lookup
    by_alias: HashMap<String, Symbol>,

    /// All (alias, symbol) pairs, longest alias first, for resolver scans
    ordered: Vec<(String, Symbol)>,

    /// Category per canonical symbol
    categories: HashMap<Symbol, AssetCategory>,
}

impl SymbolCatalog {
    /// Load the built-in alias table. Panics never; integrity violations
    /// come back as `EngineError::Catalog` so startup can abort.
    pub fn builtin() -> Result<Self> {
        Self::from_entries(BUILTIN_ALIASES)
    }

    fn from_entries(entries: &[AliasSpec]) -> Result<Self> {
        let mut by_alias: HashMap<String, Symbol> = HashMap::new();
        let mut categories: HashMap<Symbol, AssetCategory> = HashMap::new();

        for (alias, code, category) in entries {
            let alias = clean_message(alias);
            if alias.is_empty() {
                return Err(EngineError::Catalog(format!(
                    "empty alias for symbol {code}"
                )));
            }
            if code.is_empty() || !code.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()) {
                return Err(EngineError::Catalog(format!(
                    "canonical symbol '{code}' is not an uppercase code"
                )));
            }

            let symbol = Symbol::new(*code);
            if let Some(existing) = by_alias.get(&alias) {
                if existing != &symbol {
                    return Err(EngineError::DuplicateAlias {
                        alias,
                        existing: existing.to_string(),
                        conflicting: symbol.to_string(),
                    });
                }
                continue;
            }

            if let Some(&existing) = categories.get(&symbol) {
                if existing != *category {
                    return Err(EngineError::Catalog(format!(
                        "symbol {symbol} listed under two categories"
                    )));
                }
            }

            categories.insert(symbol.clone(), *category);
            by_alias.insert(alias, symbol);
        }

        let mut ordered: Vec<(String, Symbol)> = by_alias
            .iter()
            .map(|(alias, symbol)| (alias.clone(), symbol.clone()))
            .collect();
        // Longest alias first so the resolver's longest-alias-wins tie-break
        // falls out of iteration order; name order breaks length ties
        ordered.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));

        Ok(Self {
            by_alias,
            ordered,
            categories,
        })
    }

    /// Exact alias lookup for a single token or short phrase, case-folded.
    /// Pure lookup, no side effects.
    pub fn resolve_alias(&self, text: &str) -> Option<Symbol> {
        let cleaned = clean_message(text);
        if let Some(symbol) = self.by_alias.get(&cleaned) {
            return Some(symbol.clone());
        }
        // Single cashtag or punctuation-suffixed token ("$aapl", "aapl.")
        self.by_alias.get(normalize_token(&cleaned)).cloned()
    }

    pub fn category(&self, symbol: &Symbol) -> Option<AssetCategory> {
        self.categories.get(symbol).copied()
    }

    pub fn contains(&self, symbol: &Symbol) -> bool {
        self.categories.contains_key(symbol)
    }

    /// (alias, symbol) pairs, longest alias first
    pub fn aliases(&self) -> impl Iterator<Item = (&str, &Symbol)> {
        self.ordered.iter().map(|(alias, symbol)| (alias.as_str(), symbol))
    }

    /// Number of distinct canonical symbols
    pub fn symbol_count(&self) -> usize {
        self.categories.len()
    }

    /// Number of aliases
    pub fn alias_count(&self) -> usize {
        self.by_alias.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = SymbolCatalog::builtin().unwrap();
        assert!(catalog.alias_count() >= catalog.symbol_count());
    }

    #[test]
    fn test_alias_lookup_case_insensitive() {
        let catalog = SymbolCatalog::builtin().unwrap();
        assert_eq!(catalog.resolve_alias("AAPL"), Some(Symbol::from("AAPL")));
        assert_eq!(catalog.resolve_alias("Apple"), Some(Symbol::from("AAPL")));
        assert_eq!(catalog.resolve_alias("bitcoin"), Some(Symbol::from("BTC")));
        assert_eq!(catalog.resolve_alias("GOLD"), Some(Symbol::from("XAU")));
        assert_eq!(catalog.resolve_alias("oil"), Some(Symbol::from("WTI")));
        assert_eq!(catalog.resolve_alias("dogecoin"), Some(Symbol::from("DOGE")));
    }

    #[test]
    fn test_cashtag_and_suffix_lookup() {
        let catalog = SymbolCatalog::builtin().unwrap();
        assert_eq!(catalog.resolve_alias("$AAPL"), Some(Symbol::from("AAPL")));
        assert_eq!(catalog.resolve_alias("msft."), Some(Symbol::from("MSFT")));
    }

    #[test]
    fn test_unknown_alias() {
        let catalog = SymbolCatalog::builtin().unwrap();
        assert_eq!(catalog.resolve_alias("frobnicate"), None);
    }

    #[test]
    fn test_categories() {
        let catalog = SymbolCatalog::builtin().unwrap();
        assert_eq!(
            catalog.category(&Symbol::from("BTC")),
            Some(AssetCategory::Crypto)
        );
        assert_eq!(
            catalog.category(&Symbol::from("XAU")),
            Some(AssetCategory::Commodity)
        );
        assert_eq!(
            catalog.category(&Symbol::from("IXIC")),
            Some(AssetCategory::Index)
        );
    }

    #[test]
    fn test_conflicting_alias_rejected() {
        let entries: &[AliasSpec] = &[
            ("apple", "AAPL", AssetCategory::Equity),
            ("apple", "APLE", AssetCategory::Equity),
        ];
        assert!(matches!(
            SymbolCatalog::from_entries(entries),
            Err(EngineError::DuplicateAlias { .. })
        ));
    }

    #[test]
    fn test_lowercase_canonical_rejected() {
        let entries: &[AliasSpec] = &[("apple", "aapl", AssetCategory::Equity)];
        assert!(matches!(
            SymbolCatalog::from_entries(entries),
            Err(EngineError::Catalog(_))
        ));
    }

    #[test]
    fn test_every_canonical_symbol_reachable_via_alias() {
        // Round-trip invariant: each canonical symbol is the target of at
        // least one alias that resolves back to it
        let catalog = SymbolCatalog::builtin().unwrap();
        for (alias, symbol) in catalog.aliases() {
            assert_eq!(catalog.resolve_alias(alias).as_ref(), Some(symbol));
            assert!(catalog.contains(symbol));
        }
    }
}
