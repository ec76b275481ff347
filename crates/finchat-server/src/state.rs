//! Application State

use std::sync::Arc;

use query_engine::QueryEngine;

use crate::respond::ResponseGenerator;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Query understanding engine (owns the context store)
    pub engine: Arc<QueryEngine>,

    /// Template response generator
    pub responder: Arc<ResponseGenerator>,
}
