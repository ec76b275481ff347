//! Intent Taxonomy
//!
//! Fixed set of things a chat message can ask for. Classification order
//! lives in the query engine; this is just the vocabulary.

use serde::{Deserialize, Serialize};

/// What the user is asking for
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Empty or whitespace-only message, answered with a capability prompt
    EmptyQuery,

    /// Small talk ("hi", "what can you do")
    Greeting,

    /// Buy/sell/invest advice request - always refused
    AdviceRequest,

    /// Nothing financial in the message - refused with a scope message
    OffTopic,

    /// Two or more instruments side by side
    Comparison,

    /// General market question with no specific instrument
    MarketOverview,

    /// Informational question about an instrument or financial topic
    Informational,
}

impl Intent {
    /// Whether this intent is answered with a deliberate non-answer
    pub fn is_refusal(self) -> bool {
        matches!(self, Self::AdviceRequest | Self::OffTopic)
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::EmptyQuery => "empty_query",
            Self::Greeting => "greeting",
            Self::AdviceRequest => "advice_request",
            Self::OffTopic => "off_topic",
            Self::Comparison => "comparison",
            Self::MarketOverview => "market_overview",
            Self::Informational => "informational",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refusal_intents() {
        assert!(Intent::AdviceRequest.is_refusal());
        assert!(Intent::OffTopic.is_refusal());
        assert!(!Intent::Informational.is_refusal());
        assert!(!Intent::EmptyQuery.is_refusal());
    }

    #[test]
    fn test_wire_names() {
        let json = serde_json::to_string(&Intent::MarketOverview).unwrap();
        assert_eq!(json, "\"market_overview\"");
        assert_eq!(Intent::AdviceRequest.to_string(), "advice_request");
    }
}
