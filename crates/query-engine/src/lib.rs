//! # query-engine
//!
//! Query understanding and conversation context engine for financial chat.
//! Turns one raw natural-language message plus prior session state into a
//! structured `Understanding`: intent, target symbols, and a chart decision.
//!
//! ## Pipeline
//!
//! ```text
//! raw message
//!     │ clean (lowercase, strip punctuation except $ . -)
//!     ▼
//! SymbolResolver ──── SymbolCatalog (read-only alias table)
//!     │          └─── ContextStore  (anaphora: "it", "the crypto")
//!     ▼
//! IntentClassifier (ordered rule table, first match wins)
//!     ▼
//! chart trigger rules
//!     ▼
//! Understanding ──► single ContextStore update, then handed downstream
//! ```
//!
//! The engine is deterministic, CPU-bound, and never errs on user input;
//! only a catalog integrity violation at load time is fatal.
//!
//! ## Example
//!
//! ```
//! use query_engine::QueryEngine;
//!
//! let engine = QueryEngine::builtin().expect("catalog validates");
//! let u = engine.understand("bitcoin vs gold", "demo-session");
//! assert_eq!(u.symbols.len(), 2);
//! assert!(u.show_chart);
//! ```

pub mod catalog;
pub mod chart;
pub mod classifier;
pub mod engine;
pub mod matching;
pub mod resolver;

pub use catalog::SymbolCatalog;
pub use chart::should_show_chart;
pub use classifier::{ClassifierConfig, IntentClassifier};
pub use engine::QueryEngine;
pub use matching::clean_message;
pub use resolver::{Resolution, SymbolResolver, MAX_SYMBOLS};

pub use finchat_core::{
    AssetCategory, ContextStore, EngineError, Intent, Result, Session, Symbol, Understanding,
};
