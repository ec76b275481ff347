//! Understanding Assembler
//!
//! Orchestrates cleaning, resolution, classification, and the chart decision
//! into one immutable `Understanding` per request, then commits the single
//! context-store update. The per-session lock is held across the whole
//! read+compute+update sequence, so concurrent requests for one session key
//! serialize and the update is all-or-nothing from the caller's view.

use std::sync::Arc;

use finchat_core::{AssetCategory, ContextStore, Intent, Result, Understanding};

use crate::catalog::SymbolCatalog;
use crate::chart::should_show_chart;
use crate::classifier::{ClassifierConfig, IntentClassifier};
use crate::matching::clean_message;
use crate::resolver::SymbolResolver;

pub struct QueryEngine {
    catalog: Arc<SymbolCatalog>,
    resolver: SymbolResolver,
    classifier: IntentClassifier,
    store: Arc<ContextStore>,
}

impl QueryEngine {
    pub fn new(catalog: Arc<SymbolCatalog>, store: Arc<ContextStore>) -> Self {
        Self {
            resolver: SymbolResolver::new(catalog.clone()),
            classifier: IntentClassifier::new(),
            catalog,
            store,
        }
    }

    /// Engine with the built-in catalog and a fresh store. Fails only on a
    /// catalog integrity violation, which should abort startup.
    pub fn builtin() -> Result<Self> {
        Ok(Self::new(
            Arc::new(SymbolCatalog::builtin()?),
            Arc::new(ContextStore::new()),
        ))
    }

    pub fn with_classifier_config(mut self, config: ClassifierConfig) -> Self {
        self.classifier = IntentClassifier::with_config(config);
        self
    }

    pub fn catalog(&self) -> &SymbolCatalog {
        &self.catalog
    }

    pub fn store(&self) -> &ContextStore {
        &self.store
    }

    /// Turn one raw message plus session state into a structured
    /// understanding. Never fails for user input; every outcome is an
    /// ordinary `Understanding`.
    pub fn understand(&self, message: &str, session_key: &str) -> Understanding {
        let cleaned = clean_message(message);

        // Critical section per session key: snapshot and update cannot
        // interleave with another request for the same session
        let entry = self.store.session(session_key);
        let mut session = entry.lock().unwrap();

        let resolution = self.resolver.resolve(&cleaned, &session);
        let intent = self
            .classifier
            .classify(&cleaned, &resolution, &self.catalog);
        let show_chart = should_show_chart(&cleaned, intent, &resolution, &self.catalog);

        let primary_category = resolution
            .symbols
            .first()
            .and_then(|s| self.catalog.category(s));
        let topic = match intent {
            Intent::MarketOverview => Some("market"),
            _ => primary_category.map(AssetCategory::topic),
        };

        // Single update, issued only after every field is computed; turns
        // with no symbol and no topic leave the session untouched
        if !resolution.symbols.is_empty() || topic.is_some() {
            session.record(intent, &resolution.symbols, primary_category, topic);
        }

        tracing::debug!(
            session_key,
            %intent,
            symbols = ?resolution.symbols,
            show_chart,
            "understood message"
        );

        Understanding {
            intent,
            primary_symbol: resolution.symbols.first().cloned(),
            symbols: resolution.symbols,
            show_chart,
            is_refusal: intent.is_refusal(),
            from_context: resolution.from_context,
            session_key: session_key.to_string(),
        }
    }
}
