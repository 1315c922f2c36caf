// Nutrition report pages.

use anyhow::Result;
use chrono::Duration as Days;
use dialoguer::{Confirm, Select};

use super::{fmt_num, today, App, Next};
use crate::api::nutrition::{self, GenerateReport, NutritionReport, ReportPeriod, ReportQuery};

pub(crate) fn list_page(app: &mut App) -> Result<Next> {
    let reports = app
        .run("Loading reports...", nutrition::list(&ReportQuery::default())?)?
        .unwrap_or_default();
    if reports.is_empty() {
        println!("No reports yet.");
    }
    let mut items: Vec<String> = reports.iter().map(report_line).collect();
    items.push("Generate a report".into());
    items.push("Back".into());

    let choice = Select::new().items(&items).default(items.len() - 1).interact()?;
    if let Some(report) = reports.get(choice) {
        return Ok(Next::Go(format!("/report/detail/{}", report.id)));
    }
    if choice == reports.len() {
        let id = generate(app)?;
        return Ok(Next::Go(format!("/report/detail/{id}")));
    }
    Ok(Next::Go("/home".into()))
}

fn generate(app: &App) -> Result<i64> {
    let period = ReportPeriod::ALL[Select::new()
        .with_prompt("Period")
        .items(&ReportPeriod::ALL)
        .default(0)
        .interact()?];
    let use_ai = Confirm::new().with_prompt("Include AI advice?").default(true).interact()?;
    let end_date = today();
    let request = GenerateReport {
        start_date: end_date - Days::days(period_days(period)),
        end_date,
        report_period: period,
        use_ai,
    };
    Ok(app.fetch("Generating report...", nutrition::generate(&request)?)?)
}

/// Days covered by a report ending today, inclusive of today.
fn period_days(period: ReportPeriod) -> i64 {
    match period {
        ReportPeriod::Week => 6,
        ReportPeriod::Month => 29,
        ReportPeriod::Quarter => 89,
    }
}

pub(crate) fn detail_page(app: &mut App, id: i64) -> Result<Next> {
    let report = app.fetch("Loading report...", nutrition::detail(id))?;
    println!("  {}", report_line(&report));
    println!(
        "  Average per day: {} kcal | protein {} g | carbs {} g | fat {} g",
        fmt_num(report.avg_calories),
        fmt_num(report.avg_protein),
        fmt_num(report.avg_carbohydrate),
        fmt_num(report.avg_fat)
    );
    if let Some(detail) = &report.nutrition_detail {
        println!(
            "  Energy split: protein {}% | carbs {}% | fat {}%",
            fmt_num(detail.protein_ratio),
            fmt_num(detail.carb_ratio),
            fmt_num(detail.fat_ratio)
        );
    }
    if let Some(change) = report.weight_change {
        println!("  Weight change over the period: {change:+.1} kg");
    }
    if let Some(advice) = report.ai_advice.as_deref() {
        println!("\n{advice}\n");
    }

    let items = ["Regenerate AI advice", "Delete", "Back"];
    match Select::new().items(&items).default(2).interact()? {
        0 => {
            app.run("Asking the assistant...", nutrition::regenerate_advice(id))?;
            Ok(Next::Go(format!("/report/detail/{id}")))
        }
        1 => {
            if Confirm::new().with_prompt("Delete this report?").default(false).interact()? {
                app.run("Deleting...", nutrition::delete(id))?;
                println!("Report deleted.");
            }
            Ok(Next::Go("/report/list".into()))
        }
        _ => Ok(Next::Go("/report/list".into())),
    }
}

fn report_line(report: &NutritionReport) -> String {
    let range = match (report.start_date, report.end_date) {
        (Some(start), Some(end)) => format!("{start} - {end}"),
        _ => report.report_date.map(|d| d.to_string()).unwrap_or_default(),
    };
    format!(
        "#{} {} {range} | grade {} | score {}",
        report.id,
        report
            .report_period
            .as_deref()
            .or(report.report_type.as_deref())
            .unwrap_or(""),
        report.nutrition_grade.as_deref().unwrap_or("-"),
        report
            .overall_score
            .or(report.nutrition_balance_score)
            .map_or_else(|| "-".to_string(), |s| s.to_string())
    )
}
