use axum::{
    extract::{Query, State},
    Json,
};
use mindmate_common::KnowledgeEntry;
use serde::{Deserialize, Serialize};

use crate::state::SharedState;

#[derive(Debug, Deserialize, Default)]
pub struct KnowledgeQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct KnowledgeResponse {
    pub results: Vec<KnowledgeEntry>,
}

/// GET /api/knowledge?q=
pub async fn search(
    State(state): State<SharedState>,
    Query(query): Query<KnowledgeQuery>,
) -> Json<KnowledgeResponse> {
    Json(KnowledgeResponse {
        results: state.catalog.knowledge.search(&query.q),
    })
}
