//! User CLI commands: create, token, list.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use scribe_types::user::CreateUserRequest;

use crate::state::AppState;

fn print_token(token: &str) {
    println!(
        "  {} API token (save this -- it won't be shown again):",
        style("🔑").bold()
    );
    println!();
    println!("  {}", style(token).yellow().bold());
    println!();
    println!(
        "  Send it as {}",
        style("Authorization: Bearer <token>").dim()
    );
    println!();
}

/// Create a user and print the token issued for them.
pub async fn create_user(state: &AppState, username: String, json: bool) -> Result<()> {
    let (user, token) = state
        .user_service
        .create_user(CreateUserRequest { username })
        .await?;

    if json {
        let out = serde_json::json!({ "user": user, "token": token });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} User {} created",
        style("✓").green().bold(),
        style(&user.username).cyan()
    );
    println!();
    print_token(&token);
    Ok(())
}

/// Rotate a user's token.
pub async fn issue_token(state: &AppState, username: &str, json: bool) -> Result<()> {
    let token = state.user_service.issue_token(username).await?;

    if json {
        let out = serde_json::json!({ "username": username, "token": token });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    print_token(&token);
    Ok(())
}

pub async fn list_users(state: &AppState, json: bool) -> Result<()> {
    let users = state.user_service.list_users().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&users)?);
        return Ok(());
    }

    if users.is_empty() {
        println!();
        println!(
            "  {} No users yet. Create one with: {}",
            style("i").blue().bold(),
            style("scribe create user <username>").yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Username").fg(Color::White),
        Cell::new("Joined").fg(Color::White),
    ]);

    for user in &users {
        table.add_row(vec![
            Cell::new(&user.username).fg(Color::Cyan),
            Cell::new(user.created_at.format("%Y-%m-%d %H:%M").to_string()).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    Ok(())
}
