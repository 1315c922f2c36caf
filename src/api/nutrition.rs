// Nutrition reports: generated server-side from the diet diary over a
// period, optionally with AI advice attached.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{timestamp, ApiRequest};
use crate::error::Result;

const BASE: &str = "/api/nutrition/report";

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReportPeriod {
    Week,
    Month,
    Quarter,
}

impl ReportPeriod {
    pub const ALL: [ReportPeriod; 3] = [ReportPeriod::Week, ReportPeriod::Month, ReportPeriod::Quarter];
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReportPeriod::Week => "WEEK",
            ReportPeriod::Month => "MONTH",
            ReportPeriod::Quarter => "QUARTER",
        })
    }
}

/// Legacy report granularity, still used by `GET /latest`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReportType {
    Daily,
    Weekly,
    Monthly,
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReportType::Daily => "daily",
            ReportType::Weekly => "weekly",
            ReportType::Monthly => "monthly",
        })
    }
}

/// Body of `POST /generate`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateReport {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub report_period: ReportPeriod,
    #[serde(rename = "useAI")]
    pub use_ai: bool,
}

/// Body of `POST /list`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_period: Option<ReportPeriod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub page_num: u32,
    pub page_size: u32,
}

impl Default for ReportQuery {
    fn default() -> Self {
        ReportQuery {
            report_period: None,
            start_date: None,
            end_date: None,
            page_num: 1,
            page_size: 20,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NutritionReport {
    pub id: i64,
    pub user_id: Option<i64>,
    pub report_date: Option<NaiveDate>,
    pub report_type: Option<String>,
    pub report_period: Option<String>,
    pub report_type_desc: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub total_days: Option<u32>,
    pub avg_calories: Option<f64>,
    pub avg_protein: Option<f64>,
    pub avg_carbohydrate: Option<f64>,
    pub avg_fat: Option<f64>,
    pub total_calories: Option<f64>,
    pub total_protein: Option<f64>,
    pub total_carbohydrate: Option<f64>,
    pub total_fat: Option<f64>,
    pub target_calories: Option<f64>,
    pub compliant_days: Option<u32>,
    pub overall_score: Option<u32>,
    pub goal_completion_rate: Option<f64>,
    pub nutrition_balance_score: Option<u32>,
    /// A (excellent) through D (needs work).
    pub nutrition_grade: Option<String>,
    pub ai_advice: Option<String>,
    pub nutrition_detail: Option<NutritionDetail>,
    pub start_weight: Option<f64>,
    pub end_weight: Option<f64>,
    pub weight_change: Option<f64>,
    #[serde(default, deserialize_with = "timestamp::deserialize_opt")]
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NutritionDetail {
    pub protein_ratio: Option<f64>,
    pub carb_ratio: Option<f64>,
    pub fat_ratio: Option<f64>,
    pub recommend_calories: Option<f64>,
    pub calories_status: Option<String>,
    pub protein_status: Option<String>,
    pub carb_status: Option<String>,
    pub fat_status: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NutritionTrend {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub avg_calories: Option<f64>,
    pub avg_protein: Option<f64>,
    pub avg_carbohydrate: Option<f64>,
    pub avg_fat: Option<f64>,
    pub avg_score: Option<f64>,
    pub report_count: Option<u32>,
}

/// Returns the id of the generated report.
///
/// # Errors
///
/// Only on body serialization failure.
pub fn generate(request: &GenerateReport) -> Result<ApiRequest<i64>> {
    ApiRequest::post(format!("{BASE}/generate")).json(request)
}

pub fn detail(id: i64) -> ApiRequest<NutritionReport> {
    ApiRequest::get(format!("{BASE}/{id}"))
}

/// # Errors
///
/// Only on body serialization failure.
pub fn list(query: &ReportQuery) -> Result<ApiRequest<Vec<NutritionReport>>> {
    ApiRequest::post(format!("{BASE}/list")).json(query)
}

pub fn delete(id: i64) -> ApiRequest<()> {
    ApiRequest::delete(format!("{BASE}/{id}"))
}

pub fn latest(report_type: ReportType) -> ApiRequest<NutritionReport> {
    ApiRequest::get(format!("{BASE}/latest")).query("reportType", report_type)
}

pub fn trend(start_date: NaiveDate, end_date: NaiveDate) -> ApiRequest<NutritionTrend> {
    ApiRequest::get(format!("{BASE}/trend"))
        .query("startDate", start_date)
        .query("endDate", end_date)
}

pub fn regenerate_advice(id: i64) -> ApiRequest<()> {
    ApiRequest::post(format!("{BASE}/regenerate/{id}"))
}
