//! Cart commands.
//!
//! Every mutation loads the persisted cart, applies the change through the
//! cart manager, and prints the re-rendered cart to stdout.

use std::io::{self, Write};

use devo_store_core::ProductId;
use devo_store_storefront::cart::{CartChange, CartManager, CartUpdate};
use devo_store_storefront::catalog::StaticCatalog;
use devo_store_storefront::render::{HtmlRenderer, TextRenderer, format_cart};
use devo_store_storefront::storage::FileStorage;

use super::Context;

type Manager = CartManager<FileStorage, StaticCatalog>;

/// Print the current cart.
pub fn show(ctx: &Context, html: bool) -> Result<(), Box<dyn std::error::Error>> {
    let manager = ctx.cart_manager()?;
    let view = manager.view();
    let mut out = io::stdout().lock();

    if html {
        let (items, count) = HtmlRenderer::render_fragments(&view)?;
        writeln!(out, "{items}")?;
        writeln!(out, "{count}")?;
    } else {
        write!(out, "{}", format_cart(&view))?;
    }
    Ok(())
}

/// Add one unit of a product.
pub fn add(ctx: &Context, id: ProductId) -> Result<(), Box<dyn std::error::Error>> {
    let mut manager = with_stdout(ctx.cart_manager()?);
    let update = manager.add_item(id)?;
    finish(&manager, update)
}

/// Remove a product's line.
pub fn remove(ctx: &Context, id: ProductId) -> Result<(), Box<dyn std::error::Error>> {
    let mut manager = with_stdout(ctx.cart_manager()?);
    let update = manager.remove_item(id);
    finish(&manager, update)
}

/// Set a product's quantity.
pub fn set(ctx: &Context, id: ProductId, quantity: i64) -> Result<(), Box<dyn std::error::Error>> {
    let mut manager = with_stdout(ctx.cart_manager()?);
    let update = manager.set_quantity(id, quantity)?;
    finish(&manager, update)
}

/// Empty the cart.
pub fn clear(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let mut manager = with_stdout(ctx.cart_manager()?);
    let update = manager.clear();
    finish(&manager, update)
}

/// Attach a stdout renderer after loading so the cart prints once per change.
fn with_stdout(manager: Manager) -> Manager {
    manager.with_renderer(TextRenderer::new(io::stdout()))
}

fn finish(manager: &Manager, update: CartUpdate) -> Result<(), Box<dyn std::error::Error>> {
    if update.change == CartChange::Unchanged {
        tracing::info!("Cart unchanged");
        write!(io::stdout().lock(), "{}", format_cart(&manager.view()))?;
    }
    // The process exits after this command, so an unsaved change is lost.
    update.save_error.map_or(Ok(()), |e| Err(e.into()))
}
