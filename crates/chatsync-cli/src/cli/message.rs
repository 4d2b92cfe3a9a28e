//! Message CLI commands: show, send, summarize, rate, debug log.

use anyhow::{Context, Result};
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;

use chatsync_types::chat::{Message, MessageRole, Rating};

use crate::cli::truncate;
use crate::state::AppState;

fn role_cell(role: MessageRole) -> Cell {
    match role {
        MessageRole::User => Cell::new("user").fg(Color::Green),
        MessageRole::Assistant => Cell::new("assistant").fg(Color::Cyan),
        MessageRole::System => Cell::new("system").fg(Color::DarkGrey),
    }
}

fn rating_label(rating: Rating) -> &'static str {
    match rating {
        Rating::Unset => "",
        Rating::Positive => "+1",
        Rating::Negative => "-1",
    }
}

fn print_messages(messages: &[Message]) {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Id").fg(Color::White),
        Cell::new("Role").fg(Color::White),
        Cell::new("Sender").fg(Color::White),
        Cell::new("Text").fg(Color::White),
        Cell::new("Rating").fg(Color::White),
    ]);

    for message in messages {
        table.add_row(vec![
            Cell::new(&message.id).fg(Color::DarkGrey),
            role_cell(message.sender_role),
            Cell::new(message.sender.as_deref().unwrap_or("")),
            Cell::new(truncate(&message.text, 80)),
            Cell::new(rating_label(message.rating)),
        ]);
    }

    println!("{table}");
}

/// Show the messages of a session.
pub async fn show_messages(state: &AppState, session_id: &str, json: bool) -> Result<()> {
    state.warm().await?;

    if state.manager.session(session_id).await.is_none() {
        anyhow::bail!("Session '{session_id}' not found");
    }

    let messages = state
        .manager
        .list_messages(session_id)
        .await
        .with_context(|| format!("Failed to load messages for '{session_id}'"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&messages)?);
        return Ok(());
    }

    println!();
    if messages.is_empty() {
        println!("  {} No messages yet.", style("i").blue().bold());
    } else {
        print_messages(&messages);
    }
    println!();

    Ok(())
}

/// Send a prompt and print the first generated reply.
pub async fn send_prompt(
    state: &AppState,
    session_id: &str,
    prompt: &str,
    name: bool,
    json: bool,
) -> Result<()> {
    state.warm().await?;

    let reply = state
        .manager
        .send_prompt(session_id, prompt)
        .await
        .with_context(|| format!("Failed to send prompt to '{session_id}'"))?;

    let new_name = if name {
        Some(
            state
                .manager
                .apply_summarized_name(session_id, prompt)
                .await
                .context("Failed to summarize session name")?,
        )
    } else {
        None
    };

    if json {
        let out = serde_json::json!({
            "sessionId": session_id,
            "reply": reply,
            "name": new_name,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    match reply {
        Some(text) => println!("{text}"),
        None => println!("  {} The gateway returned no reply.", style("!").yellow().bold()),
    }
    if let Some(new_name) = new_name {
        println!();
        println!(
            "  {} Session named '{}'",
            style("✓").green().bold(),
            style(new_name).cyan()
        );
    }
    println!();

    Ok(())
}

/// Print a suggested session name without applying it.
pub async fn summarize(state: &AppState, session_id: &str, prompt: &str, json: bool) -> Result<()> {
    let name = state
        .manager
        .summarize_session_name(session_id, prompt)
        .await
        .context("Failed to summarize session name")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&serde_json::json!({ "name": name }))?);
    } else {
        println!("{name}");
    }
    Ok(())
}

/// Rate a message and print the gateway's updated copy.
pub async fn rate_message(
    state: &AppState,
    session_id: &str,
    message_id: &str,
    rating: Rating,
    json: bool,
) -> Result<()> {
    let message = state
        .manager
        .rate_message(message_id, session_id, rating)
        .await
        .with_context(|| format!("Failed to rate message '{message_id}'"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&message)?);
    } else {
        println!();
        println!(
            "  {} Message {} rating: {}",
            style("✓").green().bold(),
            style(&message.id).dim(),
            style(message.rating).cyan()
        );
        println!();
    }
    Ok(())
}

/// Print the completion details for a reply.
pub async fn debug_log(state: &AppState, session_id: &str, debug_log_id: &str) -> Result<()> {
    let log = state
        .manager
        .get_debug_log(session_id, debug_log_id)
        .await
        .with_context(|| format!("Failed to fetch debug log '{debug_log_id}'"))?;

    println!("{}", serde_json::to_string_pretty(&log)?);
    Ok(())
}
