//! Checkout command.
//!
//! There is no payment gateway. The request that would be sent is printed as
//! JSON and the cart is cleared.

use std::io::{self, Write};

use devo_store_core::Email;

use super::Context;

/// Check out the persisted cart.
pub fn run(ctx: &Context, email: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    // Validate before touching the cart
    let email = email.map(Email::parse).transpose()?;

    let mut manager = ctx.cart_manager()?;
    let outcome = manager.checkout(email)?;

    writeln!(io::stdout().lock(), "{}", outcome.request.to_json_pretty()?)?;

    if let Some(e) = outcome.update.save_error {
        tracing::warn!("Checkout succeeded but the cleared cart was not saved: {e}");
    }
    Ok(())
}
