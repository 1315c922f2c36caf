// Diet diary: one entry per food eaten at a meal. Dates go out as
// `YYYY-MM-DD`, both in paths and in query strings.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{timestamp, ApiRequest};
use crate::error::Result;

const BASE: &str = "/api/diet/diary";

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub const ALL: [MealType; 4] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Snack,
    ];
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        };
        f.write_str(label)
    }
}

/// Body of `POST /add`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewDietEntry {
    pub food_id: i64,
    pub meal_type: MealType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meal_time: Option<NaiveDateTime>,
    pub amount: f64,
    /// g, ml, serving, piece
    pub unit: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Body of `PUT /update`; only the id is mandatory.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DietEntryUpdate {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub food_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meal_type: Option<MealType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meal_time: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Body of `POST /list`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DietQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meal_type: Option<MealType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub food_id: Option<i64>,
    pub page_num: u32,
    pub page_size: u32,
}

impl Default for DietQuery {
    fn default() -> Self {
        DietQuery {
            meal_type: None,
            start_date: None,
            end_date: None,
            food_id: None,
            page_num: 1,
            page_size: 20,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DietEntry {
    pub id: i64,
    pub user_id: Option<i64>,
    pub food_id: Option<i64>,
    pub food_name: Option<String>,
    pub food_category: Option<String>,
    pub meal_type: Option<String>,
    pub meal_type_desc: Option<String>,
    #[serde(default, deserialize_with = "timestamp::deserialize_opt")]
    pub meal_time: Option<NaiveDateTime>,
    pub amount: Option<f64>,
    pub unit: Option<String>,
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbohydrate: Option<f64>,
    pub fat: Option<f64>,
    pub notes: Option<String>,
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "timestamp::deserialize_opt")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "timestamp::deserialize_opt")]
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DietStatistics {
    pub date: Option<NaiveDate>,
    pub total_calories: Option<f64>,
    pub total_protein: Option<f64>,
    pub total_carbohydrate: Option<f64>,
    pub total_fat: Option<f64>,
    pub meal_count: Option<u32>,
    #[serde(default)]
    pub meals: Vec<MealSummary>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MealSummary {
    pub meal_type: Option<String>,
    pub meal_type_desc: Option<String>,
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbohydrate: Option<f64>,
    pub fat: Option<f64>,
    pub item_count: Option<u32>,
}

/// Returns the id of the new entry.
///
/// # Errors
///
/// Only on body serialization failure.
pub fn add(entry: &NewDietEntry) -> Result<ApiRequest<i64>> {
    ApiRequest::post(format!("{BASE}/add")).json(entry)
}

/// # Errors
///
/// Only on body serialization failure.
pub fn update(entry: &DietEntryUpdate) -> Result<ApiRequest<()>> {
    ApiRequest::put(format!("{BASE}/update")).json(entry)
}

pub fn delete(id: i64) -> ApiRequest<()> {
    ApiRequest::delete(format!("{BASE}/delete/{id}"))
}

pub fn detail(id: i64) -> ApiRequest<DietEntry> {
    ApiRequest::get(format!("{BASE}/detail/{id}"))
}

/// # Errors
///
/// Only on body serialization failure.
pub fn list(query: &DietQuery) -> Result<ApiRequest<Vec<DietEntry>>> {
    ApiRequest::post(format!("{BASE}/list")).json(query)
}

pub fn by_date(date: NaiveDate) -> ApiRequest<Vec<DietEntry>> {
    ApiRequest::get(format!("{BASE}/date/{date}"))
}

pub fn by_date_range(start_date: NaiveDate, end_date: NaiveDate) -> ApiRequest<Vec<DietEntry>> {
    ApiRequest::get(format!("{BASE}/dateRange"))
        .query("startDate", start_date)
        .query("endDate", end_date)
}

pub fn statistics(date: NaiveDate) -> ApiRequest<DietStatistics> {
    ApiRequest::get(format!("{BASE}/statistics/{date}"))
}

pub fn today_statistics() -> ApiRequest<DietStatistics> {
    ApiRequest::get(format!("{BASE}/statistics/today"))
}
