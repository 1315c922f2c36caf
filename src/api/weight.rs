// Weight tracking. Body composition fields are optional; the backend
// derives BMI and the change since the previous record.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{timestamp, ApiRequest};
use crate::error::Result;

const BASE: &str = "/api/weight";

/// Body of `POST /add`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewWeightRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_date: Option<NaiveDate>,
    /// kg
    pub weight: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_fat_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub muscle_mass: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bone_mass: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub water_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visceral_fat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub basal_metabolism: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Body of `PUT /update`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeightRecordUpdate {
    pub id: i64,
    #[serde(flatten)]
    pub record: NewWeightRecord,
}

/// Body of `POST /list`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeightQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub page_num: u32,
    pub page_size: u32,
}

impl Default for WeightQuery {
    fn default() -> Self {
        WeightQuery {
            start_date: None,
            end_date: None,
            page_num: 1,
            page_size: 30,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeightRecord {
    pub id: i64,
    pub user_id: Option<i64>,
    pub record_date: Option<NaiveDate>,
    pub weight: Option<f64>,
    pub bmi: Option<f64>,
    /// underweight, normal, overweight or obese
    pub bmi_status: Option<String>,
    pub body_fat_rate: Option<f64>,
    pub muscle_mass: Option<f64>,
    pub bone_mass: Option<f64>,
    pub water_rate: Option<f64>,
    pub visceral_fat: Option<f64>,
    pub basal_metabolism: Option<f64>,
    pub notes: Option<String>,
    pub weight_change: Option<f64>,
    #[serde(default, deserialize_with = "timestamp::deserialize_opt")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "timestamp::deserialize_opt")]
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeightTrend {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub current_weight: Option<f64>,
    pub start_weight: Option<f64>,
    pub min_weight: Option<f64>,
    pub max_weight: Option<f64>,
    pub avg_weight: Option<f64>,
    pub total_change: Option<f64>,
    /// percent
    pub change_rate: Option<f64>,
    pub record_count: Option<u32>,
    #[serde(default)]
    pub data_points: Vec<WeightPoint>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeightPoint {
    pub date: Option<NaiveDate>,
    pub weight: Option<f64>,
    pub bmi: Option<f64>,
    pub body_fat_rate: Option<f64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeightStatistics {
    pub current_weight: Option<f64>,
    pub current_bmi: Option<f64>,
    pub bmi_status: Option<String>,
    pub target_weight: Option<f64>,
    pub weight_to_target: Option<f64>,
    pub last7_days_change: Option<f64>,
    pub last30_days_change: Option<f64>,
    pub total_change: Option<f64>,
    pub total_records: Option<u32>,
    pub health_goal: Option<String>,
}

/// Returns the id of the new record.
///
/// # Errors
///
/// Only on body serialization failure.
pub fn add(record: &NewWeightRecord) -> Result<ApiRequest<i64>> {
    ApiRequest::post(format!("{BASE}/add")).json(record)
}

/// # Errors
///
/// Only on body serialization failure.
pub fn update(record: &WeightRecordUpdate) -> Result<ApiRequest<()>> {
    ApiRequest::put(format!("{BASE}/update")).json(record)
}

pub fn delete(id: i64) -> ApiRequest<()> {
    ApiRequest::delete(format!("{BASE}/delete/{id}"))
}

pub fn detail(id: i64) -> ApiRequest<WeightRecord> {
    ApiRequest::get(format!("{BASE}/detail/{id}"))
}

/// # Errors
///
/// Only on body serialization failure.
pub fn list(query: &WeightQuery) -> Result<ApiRequest<Vec<WeightRecord>>> {
    ApiRequest::post(format!("{BASE}/list")).json(query)
}

pub fn latest() -> ApiRequest<WeightRecord> {
    ApiRequest::get(format!("{BASE}/latest"))
}

pub fn trend(start_date: NaiveDate, end_date: NaiveDate) -> ApiRequest<WeightTrend> {
    ApiRequest::get(format!("{BASE}/trend"))
        .query("startDate", start_date)
        .query("endDate", end_date)
}

pub fn statistics() -> ApiRequest<WeightStatistics> {
    ApiRequest::get(format!("{BASE}/statistics"))
}

pub fn trend_last_30_days() -> ApiRequest<WeightTrend> {
    ApiRequest::get(format!("{BASE}/trend/last30days"))
}

pub fn trend_last_90_days() -> ApiRequest<WeightTrend> {
    ApiRequest::get(format!("{BASE}/trend/last90days"))
}
