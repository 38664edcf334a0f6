//! Group CLI commands: create, list.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use dialoguer::Input;

use scribe_types::group::CreateGroupRequest;

use crate::state::AppState;

/// Create a group from flags, prompting for the title when it is missing.
///
/// ```bash
/// scribe create group --title "Cats" --description "Pictures of cats"
/// ```
pub async fn create_group(
    state: &AppState,
    title: Option<String>,
    slug: Option<String>,
    description: Option<String>,
    json: bool,
) -> Result<()> {
    let title = match title {
        Some(t) => t,
        None => Input::<String>::new()
            .with_prompt("Group title")
            .interact_text()?,
    };

    let group = state
        .group_service
        .create_group(CreateGroupRequest {
            title,
            slug,
            description,
        })
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&group)?);
        return Ok(());
    }

    println!();
    println!("  {} Group created", style("✓").green().bold());
    println!();
    println!("  {}  {}", style("Title:").bold(), style(&group.title).cyan());
    println!("  {}   {}", style("Slug:").bold(), &group.slug);
    println!(
        "  {}    {}",
        style("URL:").bold(),
        style(format!("/api/v1/group/{}/", group.slug)).dim()
    );
    println!();
    Ok(())
}

pub async fn list_groups(state: &AppState, json: bool) -> Result<()> {
    let groups = state.group_service.list_groups().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&groups)?);
        return Ok(());
    }

    if groups.is_empty() {
        println!();
        println!(
            "  {} No groups yet. Create one with: {}",
            style("i").blue().bold(),
            style("scribe create group --title <title>").yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Title").fg(Color::White),
        Cell::new("Slug").fg(Color::White),
        Cell::new("Description").fg(Color::White),
    ]);

    for group in &groups {
        table.add_row(vec![
            Cell::new(&group.title).fg(Color::Cyan),
            Cell::new(&group.slug),
            Cell::new(&group.description).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    Ok(())
}
