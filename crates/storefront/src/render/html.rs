//! HTML fragment renderer.
//!
//! Produces the same two fragments the storefront swaps into the page after a
//! cart change: the cart items panel and the header count badge.

use askama::Template;

use super::CartRenderer;
use crate::cart::CartView;

/// Cart items fragment template.
#[derive(Template)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate<'a> {
    pub cart: &'a CartView,
}

/// Cart count badge fragment template.
#[derive(Template)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u64,
}

/// Keeps the latest rendered fragments, like the DOM nodes they replace.
#[derive(Debug, Default, Clone)]
pub struct HtmlRenderer {
    items_html: String,
    count_html: String,
}

impl HtmlRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest cart items fragment.
    #[must_use]
    pub fn items_html(&self) -> &str {
        &self.items_html
    }

    /// Latest count badge fragment.
    #[must_use]
    pub fn count_html(&self) -> &str {
        &self.count_html
    }

    /// Render both fragments for `view`.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render_fragments(view: &CartView) -> askama::Result<(String, String)> {
        let items = CartItemsTemplate { cart: view }.render()?;
        let count = CartCountTemplate {
            count: view.item_count,
        }
        .render()?;
        Ok((items, count))
    }
}

impl CartRenderer for HtmlRenderer {
    fn render(&mut self, view: &CartView) {
        match Self::render_fragments(view) {
            Ok((items, count)) => {
                self.items_html = items;
                self.count_html = count;
            }
            Err(e) => tracing::warn!("Failed to render cart fragments: {e}"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use devo_store_core::ProductId;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::cart::Cart;
    use crate::catalog::{Product, ProductMetadata};
    use crate::display::DisplaySettings;

    fn product(id: i32, name: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            price: dec!(10.00),
            category: "tools".to_string(),
            metadata: ProductMetadata::default(),
        }
    }

    #[test]
    fn test_empty_cart_fragments() {
        let mut renderer = HtmlRenderer::new();
        renderer.render(&CartView::empty(&DisplaySettings::default()));

        assert!(renderer.items_html().contains("Your cart is empty"));
        assert!(!renderer.items_html().contains("cart-item\""));
        assert!(renderer.count_html().contains(">0</span>"));
        assert!(renderer.count_html().contains("is-empty"));
    }

    #[test]
    fn test_items_fragment_lists_lines() {
        let mut cart = Cart::new();
        cart.add(&product(1, "Widget"));
        cart.add(&product(1, "Widget"));
        cart.add(&product(2, "Gadget"));

        let mut renderer = HtmlRenderer::new();
        renderer.render(&CartView::build(&cart, &DisplaySettings::default()));

        let html = renderer.items_html();
        assert!(html.contains("data-id=\"1\""));
        assert!(html.contains("data-id=\"2\""));
        assert!(html.contains("$20.00"));
        assert!(html.contains("$30.00"));
        assert!(renderer.count_html().contains(">3</span>"));
        assert!(!renderer.count_html().contains("is-empty"));
    }

    #[test]
    fn test_items_fragment_has_quantity_controls() {
        let mut cart = Cart::new();
        cart.add(&product(1, "Widget"));
        cart.add(&product(1, "Widget"));
        let (items, _) =
            HtmlRenderer::render_fragments(&CartView::build(&cart, &DisplaySettings::default()))
                .unwrap();

        assert!(items.contains(
            r#"<button class="quantity-btn decrease" data-id="1" data-quantity="1">-</button>"#
        ));
        assert!(items.contains(
            r#"<button class="quantity-btn increase" data-id="1" data-quantity="3">+</button>"#
        ));
        assert!(!items.contains("disabled"));
    }

    #[test]
    fn test_increase_control_disabled_at_quantity_limit() {
        let line = crate::cart::LineItem {
            quantity: u32::MAX,
            ..crate::cart::LineItem::snapshot(&product(1, "Widget"))
        };
        let cart = Cart::try_from(vec![line]).unwrap();
        let (items, _) =
            HtmlRenderer::render_fragments(&CartView::build(&cart, &DisplaySettings::default()))
                .unwrap();
        assert!(items.contains(&format!(
            r#"data-quantity="{}" disabled>+</button>"#,
            u32::MAX
        )));
    }

    #[test]
    fn test_product_names_are_escaped() {
        let mut cart = Cart::new();
        cart.add(&product(1, "<script>alert(1)</script>"));
        let (items, _) =
            HtmlRenderer::render_fragments(&CartView::build(&cart, &DisplaySettings::default()))
                .unwrap();
        assert!(!items.contains("<script>"));
        assert!(items.contains("alert(1)"));
    }
}
