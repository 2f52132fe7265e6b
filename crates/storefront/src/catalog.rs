//! Product catalog.
//!
//! The catalog is the read-only source of product definitions. The cart only
//! ever looks products up by id and copies their display fields; it never
//! holds references into the catalog across mutations.
//!
//! Catalogs can be built from the bundled product list ([`StaticCatalog::builtin`])
//! or loaded from a JSON or YAML file ([`StaticCatalog::from_path`]).

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;

use devo_store_core::{MAX_AMOUNT, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while building or loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Two products share an id.
    #[error("duplicate product id {0}")]
    DuplicateId(ProductId),

    /// A product has a negative unit price.
    #[error("product {id} has negative price {price}")]
    NegativePrice { id: ProductId, price: Decimal },

    /// A product price is above [`MAX_AMOUNT`].
    #[error("product {id} price {price} exceeds the amount limit")]
    PriceTooLarge { id: ProductId, price: Decimal },

    /// A product has an empty display name.
    #[error("product {0} has an empty name")]
    EmptyName(ProductId),

    /// The catalog file extension is not `.json`, `.yaml` or `.yml`.
    #[error("unsupported catalog format: {0}")]
    UnsupportedFormat(String),

    /// Reading the catalog file failed.
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    /// JSON catalog could not be parsed.
    #[error("invalid JSON catalog: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML catalog could not be parsed.
    #[error("invalid YAML catalog: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Descriptive product fields the cart never looks at.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProductMetadata {
    #[serde(default)]
    pub description: String,
    /// Average rating out of 5.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    #[serde(
        default,
        alias = "ratingCount",
        skip_serializing_if = "Option::is_none"
    )]
    pub reviews: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
}

/// A product offered by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Unit price in the base currency. Zero means free.
    pub price: Decimal,
    /// Category tag (e.g. `software`, `design`).
    pub category: String,
    #[serde(flatten)]
    pub metadata: ProductMetadata,
}

/// Lookup interface the cart manager depends on.
pub trait Catalog {
    /// Find a product by id.
    fn find_by_id(&self, id: ProductId) -> Option<&Product>;
}

impl<C: Catalog + ?Sized> Catalog for &C {
    fn find_by_id(&self, id: ProductId) -> Option<&Product> {
        (**self).find_by_id(id)
    }
}

impl<C: Catalog + ?Sized> Catalog for Arc<C> {
    fn find_by_id(&self, id: ProductId) -> Option<&Product> {
        (**self).find_by_id(id)
    }
}

/// Sort order for catalog listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductSort {
    /// Catalog order.
    #[default]
    Featured,
    PriceLowToHigh,
    PriceHighToLow,
    /// Highest rated first; unrated products last.
    Rating,
}

impl std::str::FromStr for ProductSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "featured" => Ok(Self::Featured),
            "price-low" => Ok(Self::PriceLowToHigh),
            "price-high" => Ok(Self::PriceHighToLow),
            "rating" => Ok(Self::Rating),
            _ => Err(format!("invalid sort order: {s}")),
        }
    }
}

/// Filter and sort options for [`StaticCatalog::list`].
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    /// Only include products whose category is one of these. Empty means all.
    pub categories: Vec<String>,
    pub sort: ProductSort,
}

/// In-memory catalog with an id index.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
}

impl StaticCatalog {
    /// Build a catalog, validating ids, prices and names.
    ///
    /// # Errors
    ///
    /// Returns an error for duplicate ids, empty names, or prices that are
    /// negative or above [`MAX_AMOUNT`].
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(products.len());
        for (position, product) in products.iter().enumerate() {
            if product.price < Decimal::ZERO {
                return Err(CatalogError::NegativePrice {
                    id: product.id,
                    price: product.price,
                });
            }
            if product.price > MAX_AMOUNT {
                return Err(CatalogError::PriceTooLarge {
                    id: product.id,
                    price: product.price,
                });
            }
            if product.name.trim().is_empty() {
                return Err(CatalogError::EmptyName(product.id));
            }
            if index.insert(product.id, position).is_some() {
                return Err(CatalogError::DuplicateId(product.id));
            }
        }
        Ok(Self { products, index })
    }

    /// The Devo Store launch catalog.
    #[must_use]
    pub fn builtin() -> Self {
        let products = builtin_products();
        let index = products
            .iter()
            .enumerate()
            .map(|(position, p)| (p.id, position))
            .collect();
        Self { products, index }
    }

    /// Parse a JSON array of products.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or validation fails.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        Self::new(serde_json::from_str(json)?)
    }

    /// Parse a YAML sequence of products.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or validation fails.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        Self::new(serde_yaml::from_str(yaml)?)
    }

    /// Load a catalog file, choosing the parser by extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, has an unknown
    /// extension, or fails to parse or validate.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let content = std::fs::read_to_string(path)?;
        let catalog = match extension.as_str() {
            "json" => Self::from_json_str(&content)?,
            "yaml" | "yml" => Self::from_yaml_str(&content)?,
            _ => return Err(CatalogError::UnsupportedFormat(path.display().to_string())),
        };
        tracing::info!(
            path = %path.display(),
            products = catalog.len(),
            "Loaded catalog"
        );
        Ok(catalog)
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Product counts per category, alphabetically.
    #[must_use]
    pub fn categories(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for product in &self.products {
            *counts.entry(product.category.as_str()).or_insert(0) += 1;
        }
        counts
    }

    /// Filtered and sorted listing.
    #[must_use]
    pub fn list(&self, query: &ProductQuery) -> Vec<&Product> {
        let mut products: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| {
                query.categories.is_empty()
                    || query
                        .categories
                        .iter()
                        .any(|c| c.eq_ignore_ascii_case(&p.category))
            })
            .collect();

        // Stable sorts keep catalog order among equal keys.
        match query.sort {
            ProductSort::Featured => {}
            ProductSort::PriceLowToHigh => products.sort_by_key(|p| p.price),
            ProductSort::PriceHighToLow => products.sort_by_key(|p| Reverse(p.price)),
            ProductSort::Rating => products.sort_by(|a, b| {
                let a = a.metadata.rating.unwrap_or(f32::NEG_INFINITY);
                let b = b.metadata.rating.unwrap_or(f32::NEG_INFINITY);
                b.total_cmp(&a)
            }),
        }
        products
    }
}

impl Catalog for StaticCatalog {
    fn find_by_id(&self, id: ProductId) -> Option<&Product> {
        self.index.get(&id).and_then(|&i| self.products.get(i))
    }
}

fn product(
    id: i32,
    name: &str,
    description: &str,
    cents: i64,
    category: &str,
    rating: f32,
    reviews: u32,
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_owned(),
        price: Decimal::new(cents, 2),
        category: category.to_owned(),
        metadata: ProductMetadata {
            description: description.to_owned(),
            rating: Some(rating),
            reviews: Some(reviews),
            features: Vec::new(),
        },
    }
}

fn builtin_products() -> Vec<Product> {
    vec![
        product(1, "Design Pro Suite", "Complete design toolkit for professionals", 9999, "design", 4.8, 124),
        product(2, "Code Master IDE", "Advanced development environment", 14999, "software", 4.9, 89),
        product(3, "Game Engine Pro", "Professional game development platform", 19999, "games", 4.7, 67),
        product(4, "Productivity Toolkit", "Essential tools for maximum efficiency", 7999, "tools", 4.6, 156),
        product(5, "Creative Assets Pack", "Premium design resources and templates", 5999, "design", 4.8, 203),
        product(6, "Security Suite", "Comprehensive digital security solution", 12999, "software", 4.9, 78),
        product(7, "Virtual Reality Experience", "Immersive VR gaming and entertainment", 17999, "games", 4.5, 45),
        product(8, "Analytics Dashboard", "Advanced data visualization and insights", 8999, "tools", 4.7, 92),
    ]
}
