//! Directory CLI commands: tenants, users.

use anyhow::{Context, Result};
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};

use crate::state::AppState;

pub async fn list_tenants(state: &AppState, json: bool) -> Result<()> {
    let tenants = state
        .manager
        .list_tenants()
        .await
        .context("Failed to list tenants")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&tenants)?);
    } else {
        for tenant in tenants {
            println!("{tenant}");
        }
    }
    Ok(())
}

pub async fn list_users(state: &AppState, json: bool) -> Result<()> {
    let users = state
        .manager
        .list_users()
        .await
        .context("Failed to list users")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&users)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Id").fg(Color::White),
        Cell::new("Name").fg(Color::White),
        Cell::new("Tenant").fg(Color::White),
    ]);
    for user in &users {
        table.add_row(vec![
            Cell::new(&user.id).fg(Color::DarkGrey),
            Cell::new(&user.name).fg(Color::Cyan),
            Cell::new(&user.tenant_id),
        ]);
    }
    println!("{table}");
    Ok(())
}
