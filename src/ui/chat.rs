// Conversations with the nutrition assistant.

use anyhow::Result;
use crossterm::style::Stylize;
use dialoguer::{Confirm, Input, Select};

use super::{prompt_optional_text, App, Next};
use crate::api::ai;
use crate::api::chat::{self, ChatMessage, ChatSession, NewMessage, NewSession};

pub(crate) fn chat_page(app: &mut App) -> Result<Next> {
    let sessions = app.run("Loading conversations...", chat::list_sessions())?.unwrap_or_default();
    let mut items: Vec<String> = sessions.iter().map(session_line).collect();
    items.push("New conversation".into());
    items.push("Back".into());

    let choice = Select::new().items(&items).default(sessions.len()).interact()?;
    let session_id = match sessions.get(choice) {
        Some(session) => {
            let history = app.run("Loading messages...", chat::get_messages(session.id))?.unwrap_or_default();
            for message in &history {
                print_message(message);
            }
            session.id
        }
        None if choice == sessions.len() => {
            let title = prompt_optional_text("Title")?;
            app.fetch("Creating...", chat::create_session(&NewSession { title })?)?.id
        }
        None => return Ok(Next::Go("/home".into())),
    };

    converse(app, session_id)?;

    if Confirm::new().with_prompt("Delete this conversation?").default(false).interact()? {
        app.run("Deleting...", chat::delete_session(session_id))?;
    }
    Ok(Next::Go("/chat".into()))
}

/// Message loop; an empty line ends the conversation.
fn converse(app: &App, session_id: i64) -> Result<()> {
    println!("Type a message, empty line to stop.");
    loop {
        let content: String = Input::new().with_prompt(">").allow_empty(true).interact_text()?;
        if content.trim().is_empty() {
            return Ok(());
        }
        let payload = NewMessage {
            session_id,
            content: content.trim().to_string(),
        };
        let reply = app.fetch("Thinking...", chat::send_message(&payload)?)?;
        print_message(&reply);
    }
}

/// One-off questions that do not open a stored conversation.
pub(crate) fn knowledge_page(app: &mut App) -> Result<Next> {
    let question: String = Input::new()
        .with_prompt("Ask a nutrition question (empty to go back)")
        .allow_empty(true)
        .interact_text()?;
    if question.trim().is_empty() {
        return Ok(Next::Go("/home".into()));
    }
    let answer = app.run("Thinking...", ai::test_chat(question.trim())?)?;
    match answer {
        Some(serde_json::Value::String(text)) => println!("{text}"),
        Some(serde_json::Value::Object(map)) => {
            let text = ["reply", "content", "answer"]
                .iter()
                .find_map(|k| map.get(*k).and_then(serde_json::Value::as_str));
            match text {
                Some(text) => println!("{text}"),
                None => println!("{}", serde_json::Value::Object(map)),
            }
        }
        Some(other) => println!("{other}"),
        None => println!("(no answer)"),
    }
    Ok(Next::Go("/knowledge".into()))
}

fn session_line(session: &ChatSession) -> String {
    let when = session
        .updated_at
        .or(session.created_at)
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default();
    format!("{} {when}", session.title.as_deref().unwrap_or("Untitled"))
}

fn print_message(message: &ChatMessage) {
    match message.role.as_deref() {
        Some("user") => println!("{} {}", "you:".bold(), message.content),
        _ => println!("{} {}", "assistant:".bold().cyan(), message.content),
    }
}
