//! Session CLI commands: list, create, rename, delete.

use anyhow::{Context, Result};
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;
use dialoguer::Confirm;

use crate::cli::truncate;
use crate::state::AppState;

/// List the sessions of the configured tenant/user.
///
/// # Examples
///
/// ```bash
/// chatsync sessions
/// chatsync ls --json
/// ```
pub async fn list_sessions(state: &AppState, json: bool) -> Result<()> {
    let sessions = state
        .manager
        .list_sessions()
        .await
        .context("Failed to list sessions")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&sessions)?);
        return Ok(());
    }

    if sessions.is_empty() {
        println!();
        println!(
            "  {} No sessions for user '{}' in tenant '{}'. Start one with: {}",
            style("i").blue().bold(),
            style(&state.config.user).cyan(),
            style(&state.config.tenant).cyan(),
            style("chatsync create").yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Id").fg(Color::White),
        Cell::new("Name").fg(Color::White),
        Cell::new("Tokens").fg(Color::White),
    ]);

    for session in &sessions {
        let tokens = session
            .tokens_used
            .map(|t| t.to_string())
            .unwrap_or_else(|| "-".to_string());

        table.add_row(vec![
            Cell::new(&session.session_id).fg(Color::DarkGrey),
            Cell::new(truncate(&session.name, 40)).fg(Color::Cyan),
            Cell::new(tokens).fg(Color::White),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} session{}",
        style(sessions.len()).bold(),
        if sessions.len() == 1 { "" } else { "s" }
    );
    println!();

    Ok(())
}

/// Create a session and print its id.
pub async fn create_session(state: &AppState, json: bool) -> Result<()> {
    let session = state
        .manager
        .create_session()
        .await
        .context("Failed to create session")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&session)?);
    } else {
        println!();
        println!(
            "  {} Created '{}' ({})",
            style("✓").green().bold(),
            style(&session.name).cyan(),
            style(&session.session_id).dim()
        );
        println!();
    }

    Ok(())
}

/// Rename a session, locally only or on the gateway as well.
pub async fn rename_session(
    state: &AppState,
    session_id: &str,
    name: &str,
    local: bool,
    json: bool,
) -> Result<()> {
    state.warm().await?;
    state
        .manager
        .rename_session(session_id, name, local)
        .await
        .with_context(|| format!("Failed to rename session '{session_id}'"))?;

    if json {
        let out = serde_json::json!({
            "sessionId": session_id,
            "name": name,
            "localOnly": local,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!();
        println!(
            "  {} Renamed {} to '{}'{}",
            style("✓").green().bold(),
            style(session_id).dim(),
            style(name).cyan(),
            if local { " (local only)" } else { "" }
        );
        println!();
    }

    Ok(())
}

/// Delete a session after confirmation.
pub async fn delete_session(
    state: &AppState,
    session_id: &str,
    force: bool,
    json: bool,
) -> Result<()> {
    state.warm().await?;

    let session = state
        .manager
        .session(session_id)
        .await
        .with_context(|| format!("Session '{session_id}' not found"))?;

    if !force && !json {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Delete session '{}' and all its messages?",
                session.name
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("  Cancelled.");
            return Ok(());
        }
    }

    state
        .manager
        .delete_session(session_id)
        .await
        .with_context(|| format!("Failed to delete session '{session_id}'"))?;

    if json {
        let out = serde_json::json!({ "deleted": session_id });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!();
        println!(
            "  {} Deleted '{}'",
            style("✓").green().bold(),
            style(&session.name).cyan()
        );
        println!();
    }

    Ok(())
}
