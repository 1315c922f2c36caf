// Weight pages. The assessment and goal pages are read-only views over
// the same statistics endpoint.

use anyhow::Result;
use chrono::Duration as Days;
use dialoguer::{Confirm, Input, Select};

use super::{fmt_num, pause, prompt_date, prompt_optional_f64, prompt_optional_text, today, App, Next};
use crate::api::weight::{self, NewWeightRecord, WeightQuery, WeightRecord, WeightTrend};

pub(crate) fn list_page(app: &mut App) -> Result<Next> {
    let records = app
        .run("Loading records...", weight::list(&WeightQuery::default())?)?
        .unwrap_or_default();
    if records.is_empty() {
        println!("No weight records yet.");
    }
    for record in &records {
        println!("  {}", record_line(record));
    }

    let items = [
        "Add a record",
        "Trend: last 30 days",
        "Trend: last 90 days",
        "Trend: custom range",
        "Delete a record",
        "Back",
    ];
    match Select::new().items(&items).default(0).interact()? {
        0 => add_record(app)?,
        1 => print_trend(&app.fetch("Loading trend...", weight::trend_last_30_days())?),
        2 => print_trend(&app.fetch("Loading trend...", weight::trend_last_90_days())?),
        3 => {
            let end = today();
            let start = prompt_date("From", end - Days::days(30))?;
            let end = prompt_date("To", end)?;
            print_trend(&app.fetch("Loading trend...", weight::trend(start, end))?);
        }
        4 => delete_record(app, &records)?,
        _ => return Ok(Next::Go("/home".into())),
    }
    Ok(Next::Go("/weight/list".into()))
}

fn add_record(app: &App) -> Result<()> {
    let record_date = prompt_date("Date", today())?;
    let weight: f64 = Input::new().with_prompt("Weight (kg)").interact_text()?;
    let record = NewWeightRecord {
        record_date: Some(record_date),
        weight,
        body_fat_rate: prompt_optional_f64("Body fat (%)")?,
        muscle_mass: prompt_optional_f64("Muscle mass (kg)")?,
        notes: prompt_optional_text("Notes")?,
        ..Default::default()
    };
    let id = app.fetch("Saving...", weight::add(&record)?)?;
    println!("Saved record #{id}.");
    Ok(())
}

fn delete_record(app: &App, records: &[WeightRecord]) -> Result<()> {
    if records.is_empty() {
        return Ok(());
    }
    let lines: Vec<String> = records.iter().map(record_line).collect();
    let record = &records[Select::new().items(&lines).default(0).interact()?];
    if Confirm::new().with_prompt("Delete this record?").default(false).interact()? {
        app.run("Deleting...", weight::delete(record.id))?;
        println!("Record deleted.");
    }
    Ok(())
}

pub(crate) fn assessment_page(app: &mut App) -> Result<Next> {
    let stats = app.fetch("Loading statistics...", weight::statistics())?;
    println!(
        "  Weight {} kg | BMI {} ({})",
        fmt_num(stats.current_weight),
        fmt_num(stats.current_bmi),
        stats.bmi_status.as_deref().unwrap_or("unknown")
    );
    println!(
        "  Change: 7 days {} kg | 30 days {} kg | overall {} kg",
        fmt_num(stats.last7_days_change),
        fmt_num(stats.last30_days_change),
        fmt_num(stats.total_change)
    );
    pause()?;
    Ok(Next::Go("/home".into()))
}

pub(crate) fn goal_page(app: &mut App) -> Result<Next> {
    let stats = app.fetch("Loading goals...", weight::statistics())?;
    println!("  Health goal: {}", stats.health_goal.as_deref().unwrap_or("not set"));
    println!(
        "  Target weight: {} kg ({} kg to go)",
        fmt_num(stats.target_weight),
        fmt_num(stats.weight_to_target)
    );
    pause()?;
    Ok(Next::Go("/home".into()))
}

fn print_trend(trend: &WeightTrend) {
    println!(
        "  {} records | start {} kg -> now {} kg | min {} / max {} / avg {}",
        trend.record_count.unwrap_or(0),
        fmt_num(trend.start_weight),
        fmt_num(trend.current_weight),
        fmt_num(trend.min_weight),
        fmt_num(trend.max_weight),
        fmt_num(trend.avg_weight)
    );
    for point in &trend.data_points {
        let date = point.date.map(|d| d.to_string()).unwrap_or_default();
        println!("    {date}  {} kg", fmt_num(point.weight));
    }
}

fn record_line(record: &WeightRecord) -> String {
    let date = record.record_date.map(|d| d.to_string()).unwrap_or_default();
    let change = record
        .weight_change
        .map(|c| format!(" ({c:+.1})"))
        .unwrap_or_default();
    format!("{date}  {} kg{change}  BMI {}", fmt_num(record.weight), fmt_num(record.bmi))
}
