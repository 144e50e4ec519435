//! News feed commands.

use anyhow::{bail, Result};
use dialoguer::{Confirm, Input};
use grocer_commerce::ids::NewsItemId;
use grocer_commerce::news::{NewsDraft, NewsPatch};
use grocer_store::views::{NewsCard, NewsFeed, Render};

use super::{reported, NewsArgs, NewsCommand};
use crate::context::Context;
use crate::output::clip;

/// Run the news command.
pub async fn run(args: NewsArgs, ctx: &Context) -> Result<()> {
    match args.command {
        Some(NewsCommand::List) | None => list_news(ctx).await,
        Some(NewsCommand::Show { id }) => show_news(&id, ctx).await,
        Some(NewsCommand::Add { title, text, image }) => add_news(title, text, image, ctx).await,
        Some(NewsCommand::Edit {
            id,
            title,
            text,
            image,
        }) => edit_news(&id, NewsPatch { title, text, image }, ctx).await,
        Some(NewsCommand::Delete { id, yes }) => delete_news(&id, yes, ctx).await,
    }
}

async fn list_news(ctx: &Context) -> Result<()> {
    let storefront = ctx.storefront().await;
    let feed = NewsFeed::new(storefront.news.context().clone());

    let cards = match feed.render() {
        Render::Ready(cards) => cards,
        Render::Failed(message) => bail!("Could not load news: {}", message),
        Render::Loading => bail!("News is still loading"),
    };
    if let Some(message) = feed.notice() {
        ctx.output.warn(&message);
    }

    if ctx.output.is_json() {
        let state = storefront.news.state();
        let items: Vec<_> = state.news.collection.iter().map(|item| &**item).collect();
        ctx.output.json(&items);
        return Ok(());
    }

    ctx.output.header("News");
    if cards.is_empty() {
        ctx.output.info("No news yet.");
        return Ok(());
    }

    for NewsCard {
        id,
        title,
        excerpt,
        published,
        ..
    } in &cards
    {
        ctx.output.info("");
        ctx.output.table_row(&[published.as_str(), clip(title, 60).as_str()], &[10, 60]);
        ctx.output.kv("id", id.as_str());
        ctx.output.kv("", excerpt);
    }

    Ok(())
}

async fn show_news(id: &str, ctx: &Context) -> Result<()> {
    let storefront = ctx.storefront().await;
    let item = reported(storefront.news.get_news_item(&NewsItemId::new(id)).await)?;

    if ctx.output.is_json() {
        ctx.output.json(&*item);
        return Ok(());
    }

    ctx.output.header(&item.title);
    ctx.output.kv("ID", item.id.as_str());
    ctx.output.kv("Published", &item.created_at.format("%Y-%m-%d %H:%M UTC").to_string());
    if let Some(image) = &item.image {
        ctx.output.kv("Image", image);
    }
    ctx.output.info("");
    println!("{}", item.text);

    Ok(())
}

async fn add_news(
    title: Option<String>,
    text: Option<String>,
    image: Option<String>,
    ctx: &Context,
) -> Result<()> {
    let title = match title {
        Some(title) => title,
        None => Input::new().with_prompt("Title").interact_text()?,
    };
    let text = match text {
        Some(text) => text,
        None => Input::new().with_prompt("Text").interact_text()?,
    };
    if title.trim().is_empty() {
        bail!("A news item needs a title");
    }

    let storefront = ctx.storefront().await;
    let item = reported(
        storefront
            .news
            .add_news_item(NewsDraft { title, text, image })
            .await,
    )?;

    if ctx.output.is_json() {
        ctx.output.json(&*item);
    } else {
        ctx.output.kv("ID", item.id.as_str());
    }
    Ok(())
}

async fn edit_news(id: &str, patch: NewsPatch, ctx: &Context) -> Result<()> {
    if patch == NewsPatch::default() {
        bail!("Nothing to change; pass --title, --text or --image");
    }

    let storefront = ctx.storefront().await;
    let item = reported(
        storefront
            .news
            .update_news_item(&NewsItemId::new(id), patch)
            .await,
    )?;

    if ctx.output.is_json() {
        ctx.output.json(&*item);
    }
    Ok(())
}

async fn delete_news(id: &str, yes: bool, ctx: &Context) -> Result<()> {
    let storefront = ctx.storefront().await;
    let id = NewsItemId::new(id);
    let title = storefront
        .news
        .state()
        .news
        .find(&id)
        .map(|item| item.title.clone())
        .unwrap_or_else(|| id.to_string());

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete news item '{}'?", title))
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Cancelled");
            return Ok(());
        }
    }

    reported(storefront.news.delete_news_item(&id).await)
}
