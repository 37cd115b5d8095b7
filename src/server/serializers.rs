use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct HelloOut {
    pub message: String,
}

/// Everything but `text` has a default; `text` is checked by the view
/// so a missing value becomes a 400 with a JSON body.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimplifyIn {
    pub text: Option<String>,
    pub language: Option<String>,
    pub target_audience: Option<String>,
    pub output_format: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimplifyOut {
    pub simplified_text: String,
}

/// Error shape of the simplify endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
}

/// Status/error shape of the dictionary endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiMessage {
    pub message: String,
}
