//! # Editor Session
//!
//! One owner editing one page. All state lives in an explicit
//! [`EditorSession`] value and changes only through its methods, driven by
//! [`EditorEvent`]s from the host surface.
//!
//! ## Modes
//!
//! - Outside move mode every event passes through untouched
//! - In move mode the session captures pointer, click, double-click and
//!   keyboard events targeting the embedded document
//!
//! Interaction problems (stale targets, locked or deleted nodes) are silent
//! no-ops. The only fallible operation is [`EditorSession::save`].

use crate::config::EditorConfig;
use crate::document::{LiveDocument, NodeId};
use crate::errors::EditorError;
use crate::events::{EditorEvent, EventOutcome, Feedback, HostNotification, Key, Modifiers};
use crate::history::{Command, History, Side};
use crate::identity::{scan_selectable, stamp_ids, SelectableNode};
use crate::selection::resolve_target;
use crate::snap::{snap_offset, Rect, Viewport};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use storefront_content::stylesheet::content_css;
use storefront_content::text::{escape_html, take_chars};
use storefront_content::{
    ApplyScope, AssetResolver, ContentDocument, ContentStore, ElementId, ElementState, HeroRole, HeroRoles, Offset,
    RenderBackend, RenderModel, StoreProfile, Visibility, ID_ATTRIBUTE, PLACEHOLDER_IMAGE,
};
use storefront_products::Product;
use tracing::{debug, info, warn};

/// Attribute marking the current selection in the preview
pub const SELECTED_ATTRIBUTE: &str = "data-sf-selected";

const LAYER_PREVIEW_CHARS: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Browse,
    Move,
}

/// One row of the layer list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Layer {
    pub id: ElementId,
    pub preview: String,
    pub hidden: bool,
    pub locked: bool,
}

#[derive(Debug, Clone)]
struct DragState {
    id: ElementId,
    origin: (f64, f64),
    base: Offset,
    rect: Rect,
    current: Offset,
}

#[derive(Debug, Clone)]
struct TextEdit {
    id: ElementId,
    node: NodeId,
    original: String,
    current: String,
}

pub struct EditorSession {
    document: LiveDocument,
    content: ContentDocument,
    roles: HeroRoles,
    /// Id ↔ node for allow-listed nodes and ad-hoc selections
    nodes_by_id: HashMap<ElementId, NodeId>,
    ids_by_node: HashMap<NodeId, ElementId>,
    listed: HashSet<NodeId>,
    /// Text of allow-listed nodes as the template shipped it
    template_text: HashMap<ElementId, String>,
    states: BTreeMap<ElementId, ElementState>,
    locked: HashSet<ElementId>,
    adhoc: HashSet<ElementId>,
    selection: Option<ElementId>,
    mode: Mode,
    drag: Option<DragState>,
    editing: Option<TextEdit>,
    history: History,
    viewport: Viewport,
    config: EditorConfig,
}

impl EditorSession {
    /// Build the live page: stamp ids, apply content and saved overrides,
    /// inject the content stylesheet and product cards.
    pub fn open(
        markup: &str,
        content: ContentDocument,
        products: &[Product],
        store: &StoreProfile,
        resolver: &dyn AssetResolver,
        config: EditorConfig,
    ) -> Self {
        let mut document = LiveDocument::parse(markup);
        let selectable = stamp_ids(&mut document);

        let template_text = selectable
            .iter()
            .map(|s| (s.identified.id.clone(), document.text_content(s.node)))
            .collect();

        let elements: Vec<_> = selectable.iter().map(|s| s.identified.clone()).collect();
        let model = RenderModel::build(&elements, &content, store);
        let applied = document.apply_model(&model, ApplyScope::ALL);

        document.inject_stylesheet(&content_css(&content.background, &model, resolver));
        let cards = document.inject_products(products, resolver);

        let mut session = Self {
            document,
            roles: model.roles.clone(),
            nodes_by_id: HashMap::new(),
            ids_by_node: HashMap::new(),
            listed: HashSet::new(),
            template_text,
            states: content.element_states.clone(),
            content,
            locked: HashSet::new(),
            adhoc: HashSet::new(),
            selection: None,
            mode: Mode::Browse,
            drag: None,
            editing: None,
            history: History::with_limit(config.history_limit),
            viewport: Viewport::default(),
            config,
        };
        session.index(&selectable);

        info!(
            selectable = selectable.len(),
            applied,
            cards,
            orphans = model.orphans.len(),
            "Opened editor session"
        );
        session
    }

    fn index(&mut self, selectable: &[SelectableNode]) {
        for entry in selectable {
            self.nodes_by_id.insert(entry.identified.id.clone(), entry.node);
            self.ids_by_node.insert(entry.node, entry.identified.id.clone());
            self.listed.insert(entry.node);
        }
    }

    // Accessors

    pub fn document(&self) -> &LiveDocument {
        &self.document
    }

    pub fn content(&self) -> &ContentDocument {
        &self.content
    }

    pub fn roles(&self) -> &HeroRoles {
        &self.roles
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_move_mode(&self) -> bool {
        self.mode == Mode::Move
    }

    pub fn selection(&self) -> Option<&ElementId> {
        self.selection.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn node(&self, id: &ElementId) -> Option<NodeId> {
        self.nodes_by_id.get(id).copied()
    }

    pub fn state(&self, id: &ElementId) -> ElementState {
        self.states.get(id).cloned().unwrap_or_default()
    }

    pub fn offset(&self, id: &ElementId) -> Offset {
        let state = self.state(id);
        Offset::new(state.offset_left, state.offset_top)
    }

    pub fn is_locked(&self, id: &ElementId) -> bool {
        self.locked.contains(id)
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Serialized page for the preview surface
    pub fn to_html(&self) -> String {
        self.document.to_html()
    }

    // Mode

    pub fn enter_move_mode(&mut self) {
        if self.mode != Mode::Move {
            debug!("Entering move mode");
            self.mode = Mode::Move;
        }
    }

    /// Leave move mode, finishing any drag or text edit in progress
    pub fn exit_move_mode(&mut self) -> EventOutcome {
        if self.mode == Mode::Browse {
            return EventOutcome::pass_through();
        }
        debug!("Leaving move mode");

        if let Some(drag) = self.drag.take() {
            self.finish_drag(drag);
        }
        let outcome = self.commit_edit();
        self.mode = Mode::Browse;
        outcome
    }

    // Events

    pub fn handle(&mut self, event: EditorEvent) -> EventOutcome {
        if let EditorEvent::AssetLoadFailed { target, error } = &event {
            debug!(url = %error.url, "Preview asset failed to load, showing placeholder");
            if self.document.tag(*target) == Some("img") {
                self.document.set_attribute(*target, "src", PLACEHOLDER_IMAGE);
            }
            return EventOutcome::pass_through();
        }

        if self.mode == Mode::Browse {
            return EventOutcome::pass_through();
        }

        match event {
            EditorEvent::Click { target } => {
                if self.editing.is_some() {
                    return EventOutcome::consumed();
                }
                self.select(target);
                EventOutcome::consumed().with_feedback(Feedback::Selection(self.selection.clone()))
            }
            EditorEvent::PointerDown { target, x, y, rect } => self.pointer_down(target, x, y, rect),
            EditorEvent::PointerMove { x, y } => self.pointer_move(x, y),
            EditorEvent::PointerUp { x, y } => self.pointer_up(x, y),
            EditorEvent::DoubleClick { target } => self.begin_edit(target),
            EditorEvent::TextInput { text } => {
                let Some(edit) = self.editing.as_mut() else {
                    return EventOutcome::pass_through();
                };
                edit.current = text;
                let (node, current) = (edit.node, edit.current.clone());
                self.document.set_text(node, &current);
                EventOutcome::consumed()
            }
            EditorEvent::Blur => {
                if self.editing.is_some() {
                    self.commit_edit()
                } else {
                    EventOutcome::pass_through()
                }
            }
            EditorEvent::KeyDown { key, modifiers } => self.key_down(key, modifiers),
            EditorEvent::AssetLoadFailed { .. } => EventOutcome::pass_through(),
        }
    }

    /// Select whatever `target` resolves to, returning the new selection.
    /// Locked, deleted or unresolvable targets leave the selection alone and
    /// return `None`.
    pub fn select(&mut self, target: NodeId) -> Option<ElementId> {
        let node = resolve_target(&self.document, target, &self.listed, self.config.ancestor_depth)?;
        let id = self.id_for_node(node);

        if self.locked.contains(&id) || self.state(&id).deleted {
            debug!(id = %id, "Ignoring selection of locked or deleted node");
            return None;
        }

        self.set_selection(Some(id.clone()));
        Some(id)
    }

    pub fn clear_selection(&mut self) {
        self.set_selection(None);
    }

    fn set_selection(&mut self, id: Option<ElementId>) {
        if let Some(prev) = self.selection.take() {
            if let Some(node) = self.node(&prev) {
                self.document.remove_attribute(node, SELECTED_ATTRIBUTE);
            }
        }
        if let Some(node) = id.as_ref().and_then(|id| self.node(id)) {
            self.document.set_attribute(node, SELECTED_ATTRIBUTE, "true");
        }
        self.selection = id;
    }

    fn id_for_node(&mut self, node: NodeId) -> ElementId {
        if let Some(id) = self.ids_by_node.get(&node) {
            return id.clone();
        }

        // Heuristic picks get a session-only id; they are never persisted
        let id = ElementId::new(format!("adhoc-{}", self.adhoc.len() + 1));
        self.document.set_attribute(node, ID_ATTRIBUTE, id.as_str());
        self.nodes_by_id.insert(id.clone(), node);
        self.ids_by_node.insert(node, id.clone());
        self.adhoc.insert(id.clone());
        id
    }

    // Drag

    fn pointer_down(&mut self, target: NodeId, x: f64, y: f64, rect: Rect) -> EventOutcome {
        if self.drag.is_some() || self.editing.is_some() {
            return EventOutcome::consumed();
        }

        let Some(id) = self.select(target) else {
            return EventOutcome::consumed();
        };

        let base = self.offset(&id);
        self.drag = Some(DragState {
            id: id.clone(),
            origin: (x, y),
            base,
            rect,
            current: base,
        });
        EventOutcome::consumed().with_feedback(Feedback::Selection(Some(id)))
    }

    fn drag_to(&mut self, x: f64, y: f64) -> Option<Feedback> {
        let drag = self.drag.as_mut()?;
        let candidate = drag.base.translate(x - drag.origin.0, y - drag.origin.1);
        let snapped = snap_offset(candidate, drag.base, drag.rect, self.viewport, self.config.snap_threshold);
        drag.current = snapped.offset;
        let id = drag.id.clone();

        self.write_offset(&id, snapped.offset);
        Some(Feedback::Drag {
            id,
            offset: snapped.offset,
            delta: snapped.delta,
            snapped_x: snapped.snapped_x,
            snapped_y: snapped.snapped_y,
        })
    }

    fn pointer_move(&mut self, x: f64, y: f64) -> EventOutcome {
        match self.drag_to(x, y) {
            Some(feedback) => EventOutcome::consumed().with_feedback(feedback),
            None => EventOutcome::consumed(),
        }
    }

    fn pointer_up(&mut self, x: f64, y: f64) -> EventOutcome {
        if self.drag.is_none() {
            return EventOutcome::consumed();
        }
        self.drag_to(x, y);
        let Some(drag) = self.drag.take() else {
            return EventOutcome::consumed();
        };
        let feedback = self.finish_drag(drag);
        EventOutcome::consumed().with_feedback(feedback)
    }

    fn finish_drag(&mut self, drag: DragState) -> Feedback {
        let recorded = self.history.push(Command::Move {
            id: drag.id.clone(),
            from: drag.base,
            to: drag.current,
        });
        debug!(id = %drag.id, recorded, left = drag.current.left, top = drag.current.top, "Finished drag");
        Feedback::Moved {
            id: drag.id,
            offset: drag.current,
        }
    }

    /// Move the selection by one nudge step
    pub fn nudge(&mut self, dx: f64, dy: f64) -> Option<Feedback> {
        let id = self.selection.clone()?;
        if self.locked.contains(&id) {
            return None;
        }

        let from = self.offset(&id);
        let to = from.translate(dx, dy);
        self.write_offset(&id, to);
        self.history.push(Command::Move {
            id: id.clone(),
            from,
            to,
        });
        Some(Feedback::Moved { id, offset: to })
    }

    fn key_down(&mut self, key: Key, modifiers: Modifiers) -> EventOutcome {
        if self.editing.is_some() {
            return match key {
                Key::Escape => self.commit_edit(),
                Key::Enter if modifiers.command() => self.commit_edit(),
                // Typing belongs to the editable node
                _ => EventOutcome::pass_through(),
            };
        }

        // The gesture owns the offset until release
        if self.drag.is_some() {
            return EventOutcome::consumed();
        }

        let step = if modifiers.shift {
            self.config.nudge_step_large
        } else {
            self.config.nudge_step
        };

        let feedback = match key {
            Key::Char(c) if modifiers.command() && c.eq_ignore_ascii_case(&'z') && modifiers.shift => self.redo(),
            Key::Char(c) if modifiers.command() && c.eq_ignore_ascii_case(&'z') => self.undo(),
            Key::Char(c) if modifiers.command() && c.eq_ignore_ascii_case(&'y') => self.redo(),
            Key::ArrowLeft => self.nudge(-step, 0.0),
            Key::ArrowRight => self.nudge(step, 0.0),
            Key::ArrowUp => self.nudge(0.0, -step),
            Key::ArrowDown => self.nudge(0.0, step),
            Key::Escape => {
                self.clear_selection();
                Some(Feedback::Selection(None))
            }
            _ => None,
        };

        let outcome = EventOutcome::consumed();
        match feedback {
            Some(feedback) => outcome.with_feedback(feedback),
            None => outcome,
        }
    }

    // Inline text editing

    fn begin_edit(&mut self, target: NodeId) -> EventOutcome {
        if self.editing.is_some() || self.drag.is_some() {
            return EventOutcome::consumed();
        }
        let Some(id) = self.select(target) else {
            return EventOutcome::consumed();
        };
        let Some(node) = self.node(&id) else {
            return EventOutcome::consumed();
        };

        let original = self.document.text_content(node);
        self.document.set_attribute(node, "contenteditable", "true");
        self.editing = Some(TextEdit {
            id: id.clone(),
            node,
            current: original.clone(),
            original,
        });
        EventOutcome::consumed().with_feedback(Feedback::Editing(id))
    }

    fn commit_edit(&mut self) -> EventOutcome {
        let Some(edit) = self.editing.take() else {
            return EventOutcome::pass_through();
        };
        self.document.remove_attribute(edit.node, "contenteditable");

        if edit.current == edit.original {
            return EventOutcome::consumed();
        }

        self.write_text(&edit.id, &edit.current);
        self.history.push(Command::Text {
            id: edit.id.clone(),
            from: edit.original,
            to: edit.current.clone(),
        });
        debug!(id = %edit.id, "Committed inline edit");

        EventOutcome::consumed().with_notification(HostNotification::ContentEdited {
            id: edit.id,
            text: edit.current,
        })
    }

    // Undo / redo

    pub fn undo(&mut self) -> Option<Feedback> {
        let command = self.history.undo()?.clone();
        self.replay(&command, Side::From)
    }

    pub fn redo(&mut self) -> Option<Feedback> {
        let command = self.history.redo()?.clone();
        self.replay(&command, Side::To)
    }

    fn replay(&mut self, command: &Command, side: Side) -> Option<Feedback> {
        match command {
            Command::Move { id, from, to } => {
                let offset = if side == Side::From { *from } else { *to };
                self.write_offset(id, offset);
                Some(Feedback::Moved { id: id.clone(), offset })
            }
            Command::Text { id, from, to } => {
                let text = if side == Side::From { from } else { to };
                self.write_text(id, text);
                None
            }
        }
    }

    // Layer operations

    pub fn lock(&mut self, id: &ElementId) -> bool {
        if self.node(id).is_none() {
            return false;
        }
        if self.selection.as_ref() == Some(id) {
            self.clear_selection();
        }
        self.locked.insert(id.clone())
    }

    pub fn unlock(&mut self, id: &ElementId) -> bool {
        self.locked.remove(id)
    }

    pub fn set_hidden(&mut self, id: &ElementId, hidden: bool) -> bool {
        if self.node(id).is_none() {
            return false;
        }
        self.update_state(id, |state| state.hidden = hidden);
        true
    }

    /// Delete needs the owner's confirmation; it is a reversible hide that
    /// also drops the node from the layer list
    pub fn delete(&mut self, id: &ElementId, confirmed: bool) -> bool {
        if !confirmed || self.node(id).is_none() {
            return false;
        }
        if self.selection.as_ref() == Some(id) {
            self.clear_selection();
        }
        self.update_state(id, |state| state.deleted = true);
        true
    }

    pub fn restore(&mut self, id: &ElementId) -> bool {
        if !self.state(id).deleted {
            return false;
        }
        self.update_state(id, |state| state.deleted = false);
        true
    }

    /// Fresh scan of the selectable nodes, deleted ones skipped
    pub fn layers(&self) -> Vec<Layer> {
        scan_selectable(&self.document)
            .into_iter()
            .filter_map(|s| {
                let id = s.identified.id;
                let state = self.state(&id);
                (!state.deleted).then(|| Layer {
                    preview: take_chars(&self.document.text_content(s.node), LAYER_PREVIEW_CHARS).to_string(),
                    hidden: state.hidden,
                    locked: self.locked.contains(&id),
                    id,
                })
            })
            .collect()
    }

    /// Deleted nodes, for a restore list
    pub fn deleted(&self) -> Vec<ElementId> {
        self.states
            .iter()
            .filter(|(id, state)| state.deleted && self.nodes_by_id.contains_key(*id))
            .map(|(id, _)| id.clone())
            .collect()
    }

    // State writes

    fn update_state(&mut self, id: &ElementId, f: impl FnOnce(&mut ElementState)) {
        let mut state = self.state(id);
        f(&mut state);
        if state.is_default() {
            self.states.remove(id);
        } else {
            self.states.insert(id.clone(), state.clone());
        }

        if let Some(node) = self.node(id) {
            self.document.show(node, Visibility::from_state(&state));
            self.document.place(node, Offset::new(state.offset_left, state.offset_top));
        }
    }

    fn write_offset(&mut self, id: &ElementId, offset: Offset) {
        self.update_state(id, |state| {
            state.offset_left = offset.left;
            state.offset_top = offset.top;
        });
    }

    fn write_text(&mut self, id: &ElementId, text: &str) {
        if !self.document.set_content(id, text) {
            return;
        }

        match self.roles.role_of(id) {
            Some(HeroRole::Title) => self.content.hero.title = text.to_string(),
            Some(HeroRole::Subtitle) => self.content.hero.subtitle = escape_html(text),
            Some(HeroRole::Button) => self.content.hero.button_text = text.to_string(),
            None if self.adhoc.contains(id) => {}
            None => {
                let unchanged = self.template_text.get(id).is_some_and(|t| t == text);
                let text = (!unchanged).then(|| text.to_string());
                self.update_state(id, |state| state.text = text);
            }
        }
    }

    // Capture and save

    /// Sparse override map: every scanned node that deviates from default,
    /// plus saved overrides whose node is no longer in the template
    pub fn capture(&self) -> BTreeMap<ElementId, ElementState> {
        let scanned: HashSet<ElementId> = scan_selectable(&self.document)
            .into_iter()
            .map(|s| s.identified.id)
            .collect();

        let mut captured = BTreeMap::new();
        for (id, state) in &self.states {
            if state.is_default() || self.adhoc.contains(id) {
                continue;
            }
            if !scanned.contains(id) && !self.content.element_states.contains_key(id) {
                continue;
            }
            captured.insert(id.clone(), state.clone());
        }

        let orphans = captured.keys().filter(|id| !scanned.contains(*id)).count();
        if orphans > 0 {
            warn!(orphans, "Keeping overrides for nodes missing from the template");
        }
        captured
    }

    /// The content document as it would be saved now
    pub fn content_document(&self) -> ContentDocument {
        let mut content = self.content.clone();
        content.element_states = self.capture();
        content
    }

    /// Persist the captured content. Last write wins.
    pub fn save(&mut self, store: &dyn ContentStore, store_key: &str) -> Result<ContentDocument, EditorError> {
        let content = self.content_document();
        let value = content.to_value()?;
        store.save_content(store_key, &value)?;

        info!(store = %store_key, overrides = content.element_states.len(), "Saved content");
        self.content = content.clone();
        Ok(content)
    }
}
