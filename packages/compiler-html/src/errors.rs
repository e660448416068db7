//! Error types for static rendering

use storefront_templates::TemplateError;
use thiserror::Error;

/// Failures that stop a page from rendering at all.
///
/// Content problems never end up here: malformed fields fall back to their
/// defaults and the render continues.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    Template(#[from] TemplateError),
}
