// Diet diary pages: day view, entry detail and the add/edit form.

use anyhow::Result;
use dialoguer::{Confirm, Input, Select};

use super::{fmt_num, pause, prompt_date, prompt_optional_text, today, App, Next};
use crate::api::diet::{self, DietEntry, DietEntryUpdate, MealType, NewDietEntry};
use crate::api::food;

pub(crate) fn list_page(app: &mut App) -> Result<Next> {
    let date = prompt_date("Day", today())?;
    let stats = app.fetch("Loading statistics...", diet::statistics(date))?;
    println!(
        "{date}: {} kcal | protein {} g | carbs {} g | fat {} g",
        fmt_num(stats.total_calories),
        fmt_num(stats.total_protein),
        fmt_num(stats.total_carbohydrate),
        fmt_num(stats.total_fat)
    );

    let entries = app.run("Loading entries...", diet::by_date(date))?.unwrap_or_default();
    if entries.is_empty() {
        println!("No entries for this day.");
    }
    let mut items: Vec<String> = entries.iter().map(entry_line).collect();
    items.push("Add a meal".into());
    items.push("Back".into());

    let choice = Select::new().items(&items).default(items.len() - 1).interact()?;
    Ok(Next::Go(match entries.get(choice) {
        Some(entry) => format!("/diet/detail/{}", entry.id),
        None if choice == entries.len() => "/diet/add".into(),
        None => "/home".into(),
    }))
}

pub(crate) fn detail_page(app: &mut App, id: i64) -> Result<Next> {
    let entry = app.fetch("Loading entry...", diet::detail(id))?;
    println!("  {}", entry_line(&entry));
    if let Some(time) = entry.meal_time {
        println!("  eaten at {time}");
    }
    println!(
        "  protein {} g | carbs {} g | fat {} g",
        fmt_num(entry.protein),
        fmt_num(entry.carbohydrate),
        fmt_num(entry.fat)
    );
    if let Some(notes) = entry.notes.as_deref() {
        println!("  notes: {notes}");
    }

    let items = ["Edit", "Delete", "Back"];
    match Select::new().items(&items).default(2).interact()? {
        0 => Ok(Next::Go(format!("/diet/edit/{id}"))),
        1 => {
            if Confirm::new().with_prompt("Delete this entry?").default(false).interact()? {
                app.run("Deleting...", diet::delete(id))?;
                println!("Entry deleted.");
            }
            Ok(Next::Go("/diet/list".into()))
        }
        _ => Ok(Next::Go("/diet/list".into())),
    }
}

/// Add a new entry, or edit `existing` when given.
pub(crate) fn edit_page(app: &mut App, existing: Option<i64>) -> Result<Next> {
    let keyword: String = Input::new().with_prompt("Food name").interact_text()?;
    let page = app.fetch("Searching...", food::search(keyword.trim(), None, None)?)?;
    if page.list.is_empty() {
        println!("No food matches `{keyword}`.");
        pause()?;
        return Ok(Next::Go("/diet/list".into()));
    }
    let names: Vec<String> = page
        .list
        .iter()
        .map(|f| format!("{} ({} kcal / {})", f.name, fmt_num(f.calories), f.unit.as_deref().unwrap_or("100g")))
        .collect();
    let picked = &page.list[Select::new().items(&names).default(0).interact()?];

    let meal_type = MealType::ALL[Select::new().items(&MealType::ALL).default(0).interact()?];
    let amount: f64 = Input::new().with_prompt("Amount").default(100.0).interact_text()?;
    let unit: String = Input::new().with_prompt("Unit").default("g".to_string()).interact_text()?;
    let notes = prompt_optional_text("Notes")?;

    match existing {
        None => {
            let entry = NewDietEntry {
                food_id: picked.id,
                meal_type,
                meal_time: None,
                amount,
                unit,
                notes,
                image_url: None,
            };
            let id = app.fetch("Saving...", diet::add(&entry)?)?;
            println!("Saved entry #{id}.");
            Ok(Next::Go(format!("/diet/detail/{id}")))
        }
        Some(id) => {
            let update = DietEntryUpdate {
                id,
                food_id: Some(picked.id),
                meal_type: Some(meal_type),
                amount: Some(amount),
                unit: Some(unit),
                notes,
                ..Default::default()
            };
            app.run("Saving...", diet::update(&update)?)?;
            println!("Entry updated.");
            Ok(Next::Go(format!("/diet/detail/{id}")))
        }
    }
}

fn entry_line(entry: &DietEntry) -> String {
    format!(
        "[{}] {} {}{} - {} kcal",
        entry.meal_type_desc.as_deref().or(entry.meal_type.as_deref()).unwrap_or("meal"),
        entry.food_name.as_deref().unwrap_or("?"),
        fmt_num(entry.amount),
        entry.unit.as_deref().unwrap_or(""),
        fmt_num(entry.calories)
    )
}
