//! # Storefront Content
//!
//! The content document a store owner edits, and the pieces both renderers
//! share to apply it to a template.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ template markup (storefront-templates)      │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ identity: selectable nodes → stable ids     │
//! │ roles: hero title / subtitle / button       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ render_model: ids + content document        │
//! │  → ordered overrides via RenderBackend      │
//! └─────────────────────────────────────────────┘
//!          ↓                          ↓
//!   live editor tree          static markup rewriter
//! ```
//!
//! Ids are the join key between the live editor and the static renderer. Both
//! derive them from the same descriptors (tag, class, normalized text) in the
//! same document order, so an override captured in the editor lands on the
//! same node in the published page.

mod assets;
mod errors;
mod identity;
mod model;
mod presets;
mod render_model;
mod roles;
mod store;

pub mod markup_scan;
pub mod stylesheet;
pub mod text;

pub use assets::{is_absolute_url, AssetLoadError, AssetResolver, BaseUrlResolver, PLACEHOLDER_IMAGE};
pub use errors::{ContentParseError, StoreError};
pub use identity::{
    compose_base, is_allow_listed, sanitize, ElementDescriptor, ElementId, IdentifiedElement, IdentityResolver,
    GENERATED_ATTRIBUTE, ID_ATTRIBUTE, SELECTABLE_CLASSES, SELECTABLE_TAGS,
};
pub use model::{
    BackgroundKind, BackgroundSettings, ContentDocument, ElementState, HeroContent, Preset, TextStyle,
    CONTENT_VERSION,
};
pub use presets::builtin_presets;
pub use render_model::{ApplyScope, Offset, RenderBackend, RenderEntry, RenderModel, Visibility};
pub use roles::{HeroRole, HeroRoles};
pub use store::{ContentStore, MemoryContentStore, StoreProfile};
