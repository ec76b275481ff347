//! # finchat-core
//!
//! Shared leaf types for the finchat query understanding engine, plus the
//! conversation context store.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     query-engine                            │
//! │  ┌───────────┐  ┌────────────┐  ┌─────────────────────────┐ │
//! │  │  Catalog  │  │ Classifier │  │  Resolver + Chart rules │ │
//! │  └───────────┘  └────────────┘  └─────────────────────────┘ │
//! │         │              │                    │               │
//! │         └──────── finchat-core types ───────┘               │
//! │                (Symbol, Intent, Understanding)              │
//! │                         │                                   │
//! │                  ContextStore (per-key locks)               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The context store is the only mutable shared state; everything else is
//! read-only after startup.

pub mod error;
pub mod intent;
pub mod session;
pub mod symbol;
pub mod understanding;

pub use error::{EngineError, Result};
pub use intent::Intent;
pub use session::{ContextStore, FlowEntry, Session, FLOW_DEPTH};
pub use symbol::{AssetCategory, Symbol};
pub use understanding::Understanding;
