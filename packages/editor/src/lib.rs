//! # Storefront Editor
//!
//! Live mutation engine for the store page customizer.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ template markup → LiveDocument (html5ever)  │
//! │  - ids stamped by tree walk                 │
//! │  - content + saved overrides applied        │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ EditorSession: events in, outcomes out      │
//! │  - selection, drag with center snap, nudge  │
//! │  - inline text edit, lock/hide/delete       │
//! │  - linear undo/redo history                 │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ capture → sparse ElementState map → save    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Ids are shared**: the tree walk resolves the same ids the static
//!    renderer's pattern scan does
//! 2. **Sparse overrides**: only nodes that deviate from the template are saved
//! 3. **Nothing is destroyed**: hide and delete are styles, always reversible
//! 4. **Silent interaction**: only saving can fail
//!
//! ## Usage
//!
//! ```rust,ignore
//! use storefront_editor::{EditorConfig, EditorEvent, EditorSession};
//!
//! let mut session = EditorSession::open(&markup, content, &products, &store, &resolver, EditorConfig::default());
//! session.enter_move_mode();
//!
//! let outcome = session.handle(EditorEvent::Click { target });
//! assert!(outcome.consumed);
//!
//! session.save(&content_store, "fireside.shop.example")?;
//! ```

mod backend;
mod config;
mod document;
mod errors;
mod events;
mod history;
mod identity;
mod selection;
mod session;
mod snap;

pub use config::EditorConfig;
pub use document::{ElementData, LiveDocument, NodeData, NodeId};
pub use errors::EditorError;
pub use events::{EditorEvent, EventOutcome, Feedback, HostNotification, Key, Modifiers};
pub use history::{Command, History, Side};
pub use identity::{scan_selectable, stamp_ids, SelectableNode};
pub use selection::resolve_target;
pub use session::{EditorSession, Layer, Mode, SELECTED_ATTRIBUTE};
pub use snap::{snap_offset, Rect, SnapDelta, SnapResult, Viewport};
