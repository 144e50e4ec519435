//! Account commands.

use anyhow::{bail, Result};
use dialoguer::Confirm;
use grocer_commerce::ids::AddressId;

use super::{reported, AccountArgs, AccountCommand};
use crate::context::Context;

/// Run the account command.
pub async fn run(args: AccountArgs, ctx: &Context) -> Result<()> {
    match args.command {
        Some(AccountCommand::Show) | None => show_account(ctx).await,
        Some(AccountCommand::RemoveAddress { id, yes }) => remove_address(&id, yes, ctx).await,
    }
}

async fn show_account(ctx: &Context) -> Result<()> {
    let storefront = ctx.storefront().await;
    let state = storefront.user.state();

    let Some(profile) = &state.profile else {
        bail!("Not signed in; set api.token or {}", crate::config::API_TOKEN_ENV);
    };

    if ctx.output.is_json() {
        let addresses: Vec<_> = state.addresses.collection.iter().map(|a| &**a).collect();
        ctx.output.json(&serde_json::json!({
            "profile": &**profile,
            "addresses": addresses,
        }));
        return Ok(());
    }

    ctx.output.header(&profile.full_name());
    ctx.output.kv("Email", &profile.email);
    if let Some(phone) = &profile.phone {
        ctx.output.kv("Phone", phone);
    }

    ctx.output.header("Addresses");
    if state.addresses.collection.is_empty() {
        ctx.output.info("No saved addresses.");
    }
    for address in &state.addresses.collection {
        ctx.output.list_item(&format!("{} ({})", address.label, address.id));
        for line in address.multi_line().lines() {
            ctx.output.kv("", line);
        }
    }

    Ok(())
}

async fn remove_address(id: &str, yes: bool, ctx: &Context) -> Result<()> {
    let storefront = ctx.storefront().await;
    let id = AddressId::new(id);
    let Some(address) = storefront.user.state().addresses.find(&id).cloned() else {
        bail!("No address with ID '{}'", id);
    };

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete address '{}' ({})?", address.label, address.one_line()))
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Cancelled");
            return Ok(());
        }
    }

    reported(storefront.user.delete_address(&id).await)
}
