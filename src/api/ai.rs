// AI endpoints: service health, a single-turn chat check and food photo
// recognition. Both recognition calls get the extended timeout.

use std::path::Path;

use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ApiRequest, FormPart, ANALYSIS_TIMEOUT};
use crate::error::Result;

/// Payload for the base64 variant of food recognition.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FoodAnalysisRequest {
    pub base64_image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
}

impl FoodAnalysisRequest {
    /// Encode raw image bytes (standard alphabet, padded).
    pub fn from_bytes(bytes: &[u8], user_id: Option<i64>) -> Self {
        FoodAnalysisRequest {
            base64_image: base64::engine::general_purpose::STANDARD.encode(bytes),
            user_id,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FoodAnalysis {
    pub success: Option<bool>,
    pub food: Option<RecognizedFood>,
    pub error_message: Option<String>,
    pub nutrition_analysis: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecognizedFood {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub fat: Option<f64>,
    pub carbohydrate: Option<f64>,
    pub unit: Option<String>,
    pub suggested_portion: Option<String>,
    pub advice: Option<String>,
}

pub fn health() -> ApiRequest<Value> {
    ApiRequest::get("/api/ai/test/health")
}

/// # Errors
///
/// Only on body serialization failure.
pub fn test_chat(message: &str) -> Result<ApiRequest<Value>> {
    ApiRequest::post("/api/ai/test/chat").json(&serde_json::json!({ "message": message }))
}

/// Multipart upload of an image file. `userId` is only sent when known
/// and non-zero.
pub fn analyze_food_image_upload(file: &Path, user_id: Option<i64>) -> ApiRequest<FoodAnalysis> {
    let mut parts = vec![FormPart::File {
        name: "file".into(),
        path: file.to_path_buf(),
    }];
    if let Some(id) = user_id.filter(|id| *id != 0) {
        parts.push(FormPart::Text {
            name: "userId".into(),
            value: id.to_string(),
        });
    }
    ApiRequest::post("/api/ai/analyze-food/upload")
        .multipart(parts)
        .timeout(ANALYSIS_TIMEOUT)
}

/// # Errors
///
/// Only on body serialization failure.
pub fn analyze_food_image(request: &FoodAnalysisRequest) -> Result<ApiRequest<FoodAnalysis>> {
    Ok(ApiRequest::post("/api/ai/analyze-food")
        .json(request)?
        .timeout(ANALYSIS_TIMEOUT))
}
