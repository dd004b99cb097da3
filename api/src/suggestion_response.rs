use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
pub struct SuggestionResponse {
    pub suggestions: String,
}

#[derive(Deserialize, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
