//! # Storefront Templates
//!
//! The fixed catalog of page templates a store can be customized from.
//!
//! Every template is a complete, well-formed HTML document with the same
//! built-in regions:
//!
//! ```text
//! nav (logo + links) → hero (heading, paragraph, button) → product grid → footer
//! ```
//!
//! Templates are embedded in the binary. A catalog can also be pointed at a
//! directory on disk, in which case each [`TemplateCatalog::load`] performs one
//! file read, which is how the public page server picks up edited markup
//! without a rebuild.

mod catalog;
mod errors;

pub use catalog::{TemplateCatalog, TemplateDocument, TemplateKey, TemplateSource};
pub use errors::TemplateError;
