// Food catalogue: search, lookup and user-contributed entries.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{timestamp, ApiRequest};
use crate::error::Result;

const BASE: &str = "/api/food";

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Body of `POST /search`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FoodSearch {
    pub keyword: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    pub page_num: u32,
    pub page_size: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FoodPage {
    #[serde(default)]
    pub list: Vec<Food>,
    pub total: Option<u64>,
    pub page_num: Option<u32>,
    pub page_size: Option<u32>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Food {
    pub id: i64,
    pub name: String,
    pub category: Option<String>,
    pub category_name: Option<String>,
    pub brand: Option<String>,
    pub barcode: Option<String>,
    pub unit: Option<String>,
    pub serving_size: Option<f64>,
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbohydrate: Option<f64>,
    pub fat: Option<f64>,
    pub fiber: Option<f64>,
    pub sodium: Option<f64>,
    pub sugar: Option<f64>,
    pub vitamin_a: Option<f64>,
    pub vitamin_c: Option<f64>,
    pub calcium: Option<f64>,
    pub iron: Option<f64>,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub is_verified: Option<bool>,
    pub source: Option<String>,
    #[serde(default, deserialize_with = "timestamp::deserialize_opt")]
    pub created_at: Option<NaiveDateTime>,
}

/// Body of `POST` (create) and `PUT /{id}` (update).
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FoodDraft {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serving_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbohydrate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Search by name. `page` is 1-based.
///
/// # Errors
///
/// Only on body serialization failure.
pub fn search(keyword: &str, page: Option<u32>, size: Option<u32>) -> Result<ApiRequest<FoodPage>> {
    ApiRequest::post(format!("{BASE}/search")).json(&FoodSearch {
        keyword: keyword.to_string(),
        category: None,
        barcode: None,
        page_num: page.unwrap_or(DEFAULT_PAGE),
        page_size: size.unwrap_or(DEFAULT_PAGE_SIZE),
    })
}

pub fn detail(id: i64) -> ApiRequest<Food> {
    ApiRequest::get(format!("{BASE}/{id}"))
}

pub fn by_barcode(barcode: &str) -> ApiRequest<Food> {
    ApiRequest::get(format!("{BASE}/barcode/{barcode}"))
}

/// `category` is one of the backend keys: staple, vegetable, fruit,
/// protein, dairy, snack, drink.
pub fn by_category(category: &str) -> ApiRequest<Vec<Food>> {
    ApiRequest::get(format!("{BASE}/category/{category}"))
}

pub fn category_stats() -> ApiRequest<BTreeMap<String, u64>> {
    ApiRequest::get(format!("{BASE}/category/stats"))
}

/// # Errors
///
/// Only on body serialization failure.
pub fn create(draft: &FoodDraft) -> Result<ApiRequest<Food>> {
    ApiRequest::post(BASE).json(draft)
}

/// # Errors
///
/// Only on body serialization failure.
pub fn update(id: i64, draft: &FoodDraft) -> Result<ApiRequest<Food>> {
    ApiRequest::put(format!("{BASE}/{id}")).json(draft)
}

pub fn delete(id: i64) -> ApiRequest<String> {
    ApiRequest::delete(format!("{BASE}/{id}"))
}
