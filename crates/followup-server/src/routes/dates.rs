//! Natural-language date resolution for quick-entry clients.

use axum::Json;
use axum::extract::Query;
use chrono::{DateTime, Utc};
use followup_core::resolve_natural_date;
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct ParseDateQuery {
    pub q: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseDateResponse {
    /// Resolved timestamp, or null when the text is unparseable.
    pub due_at: Option<DateTime<Utc>>,
}

pub async fn parse(Query(query): Query<ParseDateQuery>) -> Json<ParseDateResponse> {
    Json(ParseDateResponse {
        due_at: resolve_natural_date(&query.q, Utc::now()),
    })
}
