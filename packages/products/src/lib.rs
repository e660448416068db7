//! # Storefront Products
//!
//! Product card generation shared by the live editor and the static renderer.
//! Same structure, truncation and currency formatting on both sides, so a
//! preview never disagrees with the published page on product rendering.
//!
//! Generated cards carry `data-sf-generated` and are never part of the
//! selectable-node scan.

mod card;
mod format;
mod product;

pub use card::{is_product_region, ProductInjector, PRODUCT_REGION_CLASSES};
pub use format::{format_price, truncate_description, CURRENCY_SYMBOL, DESCRIPTION_LIMIT};
pub use product::{active_products, Product};

// Asset resolution lives with the content model; re-exported for callers
// that only deal with products.
pub use storefront_content::{AssetResolver, BaseUrlResolver, PLACEHOLDER_IMAGE};
