//! Cart renderers.
//!
//! A renderer turns a [`CartView`] into something a shopper sees. The cart
//! manager calls every registered renderer after each mutation, so views such
//! as the cart sidebar and the header badge never drift apart.

mod html;
mod text;

pub use html::{CartCountTemplate, CartItemsTemplate, HtmlRenderer};
pub use text::{TextRenderer, format_cart};

use std::cell::RefCell;
use std::rc::Rc;

use crate::cart::CartView;

/// Receives the current cart view after every change.
pub trait CartRenderer {
    fn render(&mut self, view: &CartView);
}

/// Lets a caller keep a handle on a renderer after registering it.
impl<R: CartRenderer + ?Sized> CartRenderer for Rc<RefCell<R>> {
    fn render(&mut self, view: &CartView) {
        self.borrow_mut().render(view);
    }
}
