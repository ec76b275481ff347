//! Instrument Symbols
//!
//! Canonical instrument codes and asset categories. Canonical symbols are
//! never derived at runtime - they only come out of the symbol catalog.

use serde::{Deserialize, Serialize};

/// Canonical instrument code (e.g. "AAPL", "BTC", "XAU")
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Symbol {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

/// Instrument category of a canonical symbol
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetCategory {
    Equity,
    Crypto,
    Commodity,
    Index,
}

impl AssetCategory {
    /// Conversation topic tag stored on the session
    pub fn topic(self) -> &'static str {
        match self {
            Self::Equity => "stocks",
            Self::Crypto => "crypto",
            Self::Commodity => "commodities",
            Self::Index => "market",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_uppercased() {
        let sym = Symbol::new("btc");
        assert_eq!(sym.as_str(), "BTC");
        assert_eq!(sym, Symbol::from("BTC"));
    }

    #[test]
    fn test_category_topics() {
        assert_eq!(AssetCategory::Crypto.topic(), "crypto");
        assert_eq!(AssetCategory::Index.topic(), "market");
    }
}
