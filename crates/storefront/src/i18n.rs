//! Localized strings for cart views and notices.
//!
//! Templates containing `{name}` or `{id}` are filled in by the helpers on
//! [`Messages`].

use devo_store_core::Locale;

/// Every user-facing string the cart produces, for one locale.
#[derive(Debug)]
pub struct Messages {
    pub cart_title: &'static str,
    pub empty_title: &'static str,
    pub empty_hint: &'static str,
    pub items_label: &'static str,
    pub total_label: &'static str,
    pub remove_label: &'static str,
    pub added_title: &'static str,
    added_body: &'static str,
    pub removed_title: &'static str,
    pub removed_body: &'static str,
    pub not_found_title: &'static str,
    not_found_body: &'static str,
    pub invalid_quantity_title: &'static str,
    pub invalid_quantity_body: &'static str,
    pub save_failed_title: &'static str,
    pub save_failed_body: &'static str,
    pub empty_checkout_title: &'static str,
    pub empty_checkout_body: &'static str,
    pub checkout_title: &'static str,
    pub checkout_body: &'static str,
}

impl Messages {
    /// Strings for `locale`.
    #[must_use]
    pub const fn for_locale(locale: Locale) -> &'static Self {
        match locale {
            Locale::En => &EN,
            Locale::Es => &ES,
            Locale::Fr => &FR,
            Locale::Id => &ID,
        }
    }

    /// Body of the "added to cart" notice.
    #[must_use]
    pub fn added_body(&self, product_name: &str) -> String {
        self.added_body.replace("{name}", product_name)
    }

    /// Body of the "product not found" notice.
    #[must_use]
    pub fn not_found_body(&self, product_id: impl std::fmt::Display) -> String {
        self.not_found_body.replace("{id}", &product_id.to_string())
    }
}

static EN: Messages = Messages {
    cart_title: "Shopping Cart",
    empty_title: "Your cart is empty",
    empty_hint: "Add some products to get started!",
    items_label: "Items",
    total_label: "Total",
    remove_label: "Remove item",
    added_title: "Added to cart",
    added_body: "{name} has been added to your cart",
    removed_title: "Removed from cart",
    removed_body: "Item has been removed from your cart",
    not_found_title: "Product not found",
    not_found_body: "Product {id} is not available",
    invalid_quantity_title: "Invalid quantity",
    invalid_quantity_body: "Quantity must be a whole number of zero or more",
    save_failed_title: "Cart not saved",
    save_failed_body: "Your cart could not be saved on this device",
    empty_checkout_title: "Empty cart",
    empty_checkout_body: "Please add items to your cart before checkout",
    checkout_title: "Checkout",
    checkout_body: "Proceeding to checkout...",
};

static ES: Messages = Messages {
    cart_title: "Carrito de compras",
    empty_title: "Tu carrito está vacío",
    empty_hint: "¡Agrega algunos productos para comenzar!",
    items_label: "Artículos",
    total_label: "Total",
    remove_label: "Eliminar artículo",
    added_title: "Agregado al carrito",
    added_body: "{name} se agregó a tu carrito",
    removed_title: "Eliminado del carrito",
    removed_body: "El artículo se eliminó de tu carrito",
    not_found_title: "Producto no encontrado",
    not_found_body: "El producto {id} no está disponible",
    invalid_quantity_title: "Cantidad no válida",
    invalid_quantity_body: "La cantidad debe ser un número entero igual o mayor que cero",
    save_failed_title: "Carrito no guardado",
    save_failed_body: "No se pudo guardar tu carrito en este dispositivo",
    empty_checkout_title: "Carrito vacío",
    empty_checkout_body: "Agrega artículos a tu carrito antes de pagar",
    checkout_title: "Pago",
    checkout_body: "Procediendo al pago...",
};

static FR: Messages = Messages {
    cart_title: "Panier",
    empty_title: "Votre panier est vide",
    empty_hint: "Ajoutez des produits pour commencer !",
    items_label: "Articles",
    total_label: "Total",
    remove_label: "Retirer l'article",
    added_title: "Ajouté au panier",
    added_body: "{name} a été ajouté à votre panier",
    removed_title: "Retiré du panier",
    removed_body: "L'article a été retiré de votre panier",
    not_found_title: "Produit introuvable",
    not_found_body: "Le produit {id} n'est pas disponible",
    invalid_quantity_title: "Quantité invalide",
    invalid_quantity_body: "La quantité doit être un nombre entier positif ou nul",
    save_failed_title: "Panier non enregistré",
    save_failed_body: "Votre panier n'a pas pu être enregistré sur cet appareil",
    empty_checkout_title: "Panier vide",
    empty_checkout_body: "Ajoutez des articles à votre panier avant de payer",
    checkout_title: "Paiement",
    checkout_body: "Redirection vers le paiement...",
};

static ID: Messages = Messages {
    cart_title: "Keranjang Belanja",
    empty_title: "Keranjang Anda kosong",
    empty_hint: "Tambahkan beberapa produk untuk memulai!",
    items_label: "Barang",
    total_label: "Total",
    remove_label: "Hapus barang",
    added_title: "Ditambahkan ke keranjang",
    added_body: "{name} telah ditambahkan ke keranjang Anda",
    removed_title: "Dihapus dari keranjang",
    removed_body: "Barang telah dihapus dari keranjang Anda",
    not_found_title: "Produk tidak ditemukan",
    not_found_body: "Produk {id} tidak tersedia",
    invalid_quantity_title: "Jumlah tidak valid",
    invalid_quantity_body: "Jumlah harus bilangan bulat nol atau lebih",
    save_failed_title: "Keranjang tidak tersimpan",
    save_failed_body: "Keranjang Anda tidak dapat disimpan di perangkat ini",
    empty_checkout_title: "Keranjang kosong",
    empty_checkout_body: "Tambahkan barang ke keranjang sebelum checkout",
    checkout_title: "Checkout",
    checkout_body: "Melanjutkan ke pembayaran...",
};
