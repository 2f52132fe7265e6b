//! Plain-text renderer for terminals.

use std::fmt::Write as _;
use std::io::Write;

use super::CartRenderer;
use crate::cart::CartView;

/// Format a cart as a plain-text table.
#[must_use]
pub fn format_cart(view: &CartView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", view.labels.title);

    if view.is_empty() {
        let _ = writeln!(out, "  {}", view.labels.empty_title);
        let _ = writeln!(out, "  {}", view.labels.empty_hint);
        return out;
    }

    let name_width = view
        .items
        .iter()
        .map(|item| item.title.chars().count())
        .max()
        .unwrap_or(0);

    for item in &view.items {
        let _ = writeln!(
            out,
            "  [{id:>3}] {title:<name_width$}  {qty:>4} x {price:>10}  {line:>12}",
            id = item.id.as_i32(),
            title = item.title,
            qty = item.quantity,
            price = item.price,
            line = item.line_price,
        );
    }
    let _ = writeln!(out, "  {}: {}", view.labels.items, view.item_count);
    let _ = writeln!(out, "  {}: {}", view.labels.total, view.subtotal);
    out
}

/// Writes [`format_cart`] output to any `io::Write`.
#[derive(Debug)]
pub struct TextRenderer<W> {
    out: W,
}

impl<W: Write> TextRenderer<W> {
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> CartRenderer for TextRenderer<W> {
    fn render(&mut self, view: &CartView) {
        let text = format_cart(view);
        if let Err(e) = self.out.write_all(text.as_bytes()).and_then(|()| self.out.flush()) {
            tracing::warn!("Failed to write cart view: {e}");
        }
    }
}
