// Food recognition from a photo. The file can go up as multipart or be
// inlined as base64; both hit the same model.

use std::path::{Path, PathBuf};

use anyhow::Result;
use dialoguer::{Input, Select};

use super::{fmt_num, pause, App, Next};
use crate::api::ai::{self, FoodAnalysis, FoodAnalysisRequest};
use crate::error::ClientError;

pub(crate) fn analysis_page(app: &mut App) -> Result<Next> {
    let path: String = Input::new().with_prompt("Image file path").interact_text()?;
    let path = PathBuf::from(path.trim());
    let modes = ["Upload file", "Send inline (base64)", "Back"];
    let analysis = match Select::new().items(&modes).default(0).interact()? {
        0 => app.fetch("Analysing...", ai::analyze_food_image_upload(&path, app.user_id()))?,
        1 => {
            let bytes = read_image(&path)?;
            let request = FoodAnalysisRequest::from_bytes(&bytes, app.user_id());
            app.fetch("Analysing...", ai::analyze_food_image(&request)?)?
        }
        _ => return Ok(Next::Go("/home".into())),
    };
    print_analysis(&analysis);
    pause()?;
    Ok(Next::Go("/food/analysis".into()))
}

pub(super) fn read_image(path: &Path) -> Result<Vec<u8>, ClientError> {
    std::fs::read(path).map_err(|source| ClientError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn print_analysis(analysis: &FoodAnalysis) {
    if analysis.success == Some(false) {
        println!(
            "Recognition failed: {}",
            analysis.error_message.as_deref().unwrap_or("unknown error")
        );
        return;
    }
    if let Some(food) = &analysis.food {
        println!(
            "  {} ({})",
            food.name.as_deref().unwrap_or("unknown food"),
            food.category.as_deref().unwrap_or("-")
        );
        println!(
            "  {} kcal | protein {} g | carbs {} g | fat {} g per {}",
            fmt_num(food.calories),
            fmt_num(food.protein),
            fmt_num(food.carbohydrate),
            fmt_num(food.fat),
            food.unit.as_deref().unwrap_or("100g")
        );
        if let Some(portion) = food.suggested_portion.as_deref() {
            println!("  Suggested portion: {portion}");
        }
        if let Some(advice) = food.advice.as_deref() {
            println!("  {advice}");
        }
    }
    if let Some(text) = analysis.nutrition_analysis.as_deref() {
        println!("\n{text}");
    }
}
