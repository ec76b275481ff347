//! Market Data Provider
//!
//! Abstraction over the price source the responder uses for live figures.
//! The engine itself never touches market data; quotes only decorate the
//! generated prose.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use finchat_core::Symbol;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// A price quote for one instrument
#[derive(Clone, Debug, Serialize)]
pub struct Quote {
    pub symbol: Symbol,
    pub price_usd: Decimal,
    pub change_24h: Decimal,
    pub updated_at: DateTime<Utc>,
}

/// Quote source trait (Strategy pattern)
///
/// Implement this for each data vendor; the mock below serves demos and
/// tests.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Current quote for a symbol, `None` if the vendor has no data
    async fn quote(&self, symbol: &Symbol) -> Option<Quote>;

    /// Quotes for multiple symbols, skipping the ones without data
    async fn quotes(&self, symbols: &[Symbol]) -> Vec<Quote> {
        let mut out = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            if let Some(quote) = self.quote(symbol).await {
                out.push(quote);
            }
        }
        out
    }

    /// Provider name
    fn name(&self) -> &str;
}

/// Mock provider with static quotes covering every built-in catalog symbol
pub struct MockMarketData;

impl MockMarketData {
    fn base_quote(symbol: &str) -> Option<(Decimal, Decimal)> {
        // (price_usd, 24h_change_percent)
        let quote = match symbol {
            "AAPL" => (dec!(233.40), dec!(0.8)),
            "MSFT" => (dec!(441.20), dec!(1.1)),
            "GOOGL" => (dec!(192.75), dec!(-0.4)),
            "AMZN" => (dec!(228.10), dec!(0.6)),
            "TSLA" => (dec!(352.90), dec!(-2.1)),
            "META" => (dec!(612.50), dec!(1.4)),
            "NVDA" => (dec!(142.60), dec!(3.2)),
            "AMD" => (dec!(126.30), dec!(2.4)),
            "NFLX" => (dec!(897.40), dec!(0.3)),
            "GM" => (dec!(53.80), dec!(-0.7)),
            "F" => (dec!(10.95), dec!(-0.2)),
            "JPM" => (dec!(247.30), dec!(0.5)),
            "DIS" => (dec!(112.60), dec!(0.9)),
            "INTC" => (dec!(20.45), dec!(-1.5)),
            "BA" => (dec!(178.20), dec!(1.0)),
            "BTC" => (dec!(97500), dec!(2.5)),
            "ETH" => (dec!(3450), dec!(1.8)),
            "DOGE" => (dec!(0.38), dec!(12.0)),
            "SOL" => (dec!(195), dec!(4.2)),
            "ADA" => (dec!(0.95), dec!(-1.2)),
            "XRP" => (dec!(2.35), dec!(0.9)),
            "LTC" => (dec!(105), dec!(1.5)),
            "SHIB" => (dec!(0.000022), dec!(-8.0)),
            "XAU" => (dec!(2640.50), dec!(0.4)),
            "XAG" => (dec!(30.85), dec!(0.7)),
            "WTI" => (dec!(69.40), dec!(-1.1)),
            "NG" => (dec!(3.05), dec!(2.8)),
            "HG" => (dec!(4.12), dec!(0.2)),
            "SPX" => (dec!(6032.40), dec!(0.6)),
            "SPY" => (dec!(601.80), dec!(0.6)),
            "DJI" => (dec!(44910.65), dec!(0.4)),
            "IXIC" => (dec!(19218.17), dec!(0.8)),
            "VIX" => (dec!(13.50), dec!(-3.4)),
            _ => return None,
        };
        Some(quote)
    }
}

#[async_trait]
impl MarketDataProvider for MockMarketData {
    async fn quote(&self, symbol: &Symbol) -> Option<Quote> {
        let (price_usd, change_24h) = Self::base_quote(symbol.as_str())?;
        Some(Quote {
            symbol: symbol.clone(),
            price_usd,
            change_24h,
            updated_at: Utc::now(),
        })
    }

    fn name(&self) -> &str {
        "MockMarketData"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use query_engine::SymbolCatalog;

    #[tokio::test]
    async fn test_mock_quote() {
        let market = MockMarketData;
        let quote = market.quote(&Symbol::from("BTC")).await.unwrap();
        assert_eq!(quote.symbol, Symbol::from("BTC"));
        assert!(quote.price_usd > Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_unknown_symbol() {
        let market = MockMarketData;
        assert!(market.quote(&Symbol::from("NOTREAL")).await.is_none());
    }

    #[tokio::test]
    async fn test_covers_builtin_catalog() {
        // Every canonical symbol the engine can resolve has a mock quote
        let market = MockMarketData;
        let catalog = SymbolCatalog::builtin().unwrap();
        for (_, symbol) in catalog.aliases() {
            assert!(
                market.quote(symbol).await.is_some(),
                "no mock quote for {symbol}"
            );
        }
    }
}
