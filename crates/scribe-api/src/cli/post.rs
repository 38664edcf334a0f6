//! Post CLI commands: paginated listing and single post view.

use anyhow::{Result, anyhow};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use scribe_core::pagination::Page;
use scribe_types::post::{Post, PostId};

use crate::state::AppState;

/// List posts the same way the feed, group and profile pages do.
pub async fn list_posts(
    state: &AppState,
    group: Option<String>,
    author: Option<String>,
    page: Option<String>,
    json: bool,
) -> Result<()> {
    let page_arg = page.as_deref();
    let (heading, page) = match (group, author) {
        (Some(slug), _) => {
            let listing = state.post_service.group_posts(&slug, page_arg).await?;
            (format!("Group: {}", listing.group.title), listing.page)
        }
        (None, Some(username)) => {
            let listing = state.post_service.profile(&username, page_arg).await?;
            (format!("Posts by {}", listing.author.username), listing.page)
        }
        (None, None) => ("Latest posts".to_string(), state.post_service.index(page_arg).await?),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&page)?);
        return Ok(());
    }

    println!();
    println!("  {}", style(heading).bold());
    println!();

    if page.is_empty() {
        println!("  {} No posts yet.", style("i").blue().bold());
        println!();
        return Ok(());
    }

    println!("{}", posts_table(&page));
    println!();
    println!(
        "  page {} of {} ({} post{})",
        style(page.number).bold(),
        page.num_pages,
        page.count,
        if page.count == 1 { "" } else { "s" }
    );
    println!();
    Ok(())
}

fn posts_table(page: &Page<Post>) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("ID").fg(Color::White),
        Cell::new("Text").fg(Color::White),
        Cell::new("Author").fg(Color::White),
        Cell::new("Group").fg(Color::White),
        Cell::new("Published").fg(Color::White),
    ]);

    for post in &page.items {
        table.add_row(vec![
            Cell::new(post.id).fg(Color::DarkGrey),
            Cell::new(post.preview()),
            Cell::new(&post.author.username).fg(Color::Cyan),
            Cell::new(post.group.as_ref().map_or("-", |g| g.title.as_str())),
            Cell::new(post.pub_date.format("%Y-%m-%d %H:%M").to_string()).fg(Color::DarkGrey),
        ]);
    }

    table
}

/// Show one post in full.
pub async fn show_post(state: &AppState, id: &str, json: bool) -> Result<()> {
    let id: PostId = id.parse().map_err(|_| anyhow!("'{id}' is not a post id"))?;
    let post = state.post_service.post_detail(id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&post)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} #{}  {}",
        style("📝").bold(),
        post.id,
        style(post.preview()).cyan().bold()
    );
    println!();
    println!("  {}  {}", style("Author:").bold(), post.author.username);
    if let Some(group) = &post.group {
        println!("  {}   {} ({})", style("Group:").bold(), group.title, group.slug);
    }
    println!(
        "  {}    {}",
        style("Date:").bold(),
        post.pub_date.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!();
    for line in post.text.lines() {
        println!("  {line}");
    }
    println!();
    Ok(())
}
