//! Response Generator
//!
//! Template-based prose for each intent. The engine decides *what* to answer
//! about; this layer only picks the wording and decorates informational
//! answers with quotes from the market provider.

use std::sync::Arc;

use finchat_core::{Intent, Understanding};

use crate::market::{MarketDataProvider, Quote};

const CAPABILITY_MESSAGE: &str = "Ask me about stocks, crypto, commodities, or indices - for \
     example \"what's the price of bitcoin?\" or \"AAPL vs MSFT\".";

const ADVICE_REFUSAL: &str = "I can share prices, trends, and comparisons, but I can't give \
     buy or sell advice. Ask me for information instead - for example \"how is AAPL doing?\".";

const SCOPE_REFUSAL: &str = "I only handle financial questions about stocks, crypto, \
     commodities, and indices. Try asking about an instrument, like \"bitcoin?\".";

pub struct ResponseGenerator {
    market: Arc<dyn MarketDataProvider>,
}

impl ResponseGenerator {
    pub fn new(market: Arc<dyn MarketDataProvider>) -> Self {
        Self { market }
    }

    /// Produce the user-facing reply for one understanding
    pub async fn reply(&self, understanding: &Understanding) -> String {
        match understanding.intent {
            Intent::EmptyQuery => CAPABILITY_MESSAGE.to_string(),
            Intent::Greeting => format!("Hello! {CAPABILITY_MESSAGE}"),
            Intent::AdviceRequest => ADVICE_REFUSAL.to_string(),
            Intent::OffTopic => SCOPE_REFUSAL.to_string(),
            Intent::Comparison => self.comparison_reply(understanding).await,
            Intent::MarketOverview => self.overview_reply(understanding).await,
            Intent::Informational => self.informational_reply(understanding).await,
        }
    }

    async fn informational_reply(&self, understanding: &Understanding) -> String {
        let Some(symbol) = understanding.primary_symbol() else {
            return "I couldn't match that to an instrument I know, but I'm happy to help \
                    with general financial questions."
                .to_string();
        };

        match self.market.quote(symbol).await {
            Some(quote) => format!(
                "{} is trading at {} right now.{}",
                symbol,
                format_quote(&quote),
                chart_suffix(understanding)
            ),
            None => format!("I recognize {symbol} but have no quote for it right now."),
        }
    }

    async fn comparison_reply(&self, understanding: &Understanding) -> String {
        let quotes = self.market.quotes(&understanding.symbols).await;
        if quotes.is_empty() {
            return "I couldn't fetch quotes for those instruments right now.".to_string();
        }

        let mut reply = String::from("Side by side:\n");
        for quote in &quotes {
            reply.push_str(&format!("  {}: {}\n", quote.symbol, format_quote(quote)));
        }
        reply.push_str(chart_suffix(understanding).trim_start());
        reply.trim_end().to_string()
    }

    async fn overview_reply(&self, understanding: &Understanding) -> String {
        if let Some(symbol) = understanding.primary_symbol() {
            if let Some(quote) = self.market.quote(symbol).await {
                return format!(
                    "{} stands at {}.{}",
                    symbol,
                    format_quote(&quote),
                    chart_suffix(understanding)
                );
            }
        }
        "Markets are mixed today. Name an index like the S&P 500 or Nasdaq for specifics."
            .to_string()
    }
}

fn format_quote(quote: &Quote) -> String {
    format!("${} ({:+.2}% 24h)", quote.price_usd, quote.change_24h)
}

fn chart_suffix(understanding: &Understanding) -> &'static str {
    if understanding.show_chart {
        " Here's the trend chart."
    } else {
        ""
    }
}
