//! Designer session: the working check, its layout and the drag controller.

use crate::drag::{DragCommit, DragController, DragSettings};
use crate::element::ElementId;
use crate::fields::{CheckField, CheckFields};
use crate::layout::{Layout, SavedLayout};
use crate::layout_file::{LayoutFileError, export_layout, import_layout};
use crate::layout_store::LayoutStore;
use crate::preview::{PAGE_SIZE, PreviewTree, render_preview};
use crate::settings::{DesignerConfig, Settings};
use crate::store::{KeyValueStore, StoreResult};
use crate::templates::{BaseTemplate, Template, TemplateError, TemplateResult, TemplateStore};
use crate::words::amount_text_to_words;
use kurbo::Point;
use std::fmt;
use std::sync::Arc;

type LayoutListener = Box<dyn FnMut(ElementId, Point)>;

/// A design session over an injected store.
///
/// `layout` is the working layout, always complete. `touched` records only
/// the positions the user has set in this session (by dragging, resetting,
/// loading or importing); a template can only be saved once it is non-empty.
pub struct Designer<S: KeyValueStore + ?Sized> {
    fields: CheckFields,
    layout: Layout,
    touched: Layout,
    drag: DragController,
    config: DesignerConfig,
    layouts: LayoutStore<S>,
    templates: TemplateStore<S>,
    on_layout_change: Option<LayoutListener>,
}

impl<S: KeyValueStore + ?Sized> fmt::Debug for Designer<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Designer")
            .field("fields", &self.fields)
            .field("layout", &self.layout)
            .field("touched", &self.touched)
            .field("drag", &self.drag)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<S: KeyValueStore + ?Sized> Designer<S> {
    pub fn new(store: Arc<S>, config: DesignerConfig) -> Self {
        let settings = DragSettings {
            snap_to_grid: config.snap_to_grid,
            grid_size: config.grid_size,
            ..DragSettings::default()
        };
        Self {
            fields: CheckFields::default(),
            layout: Layout::defaults(),
            touched: Layout::new(),
            drag: DragController::new(PAGE_SIZE.to_rect(), settings),
            config,
            layouts: LayoutStore::new(Arc::clone(&store)),
            templates: TemplateStore::new(store),
            on_layout_change: None,
        }
    }

    /// Create a session configured from the stored settings.
    pub fn from_settings(store: Arc<S>) -> StoreResult<Self> {
        let config = Settings::new(Arc::clone(&store)).designer_config()?;
        Ok(Self::new(store, config))
    }

    /// Observe every position change: committed drags and resets.
    pub fn set_on_layout_change(&mut self, listener: impl FnMut(ElementId, Point) + 'static) {
        self.on_layout_change = Some(Box::new(listener));
    }

    pub fn fields(&self) -> &CheckFields {
        &self.fields
    }

    pub fn set_fields(&mut self, fields: CheckFields) {
        self.fields = fields;
    }

    /// Update one field. Changing the amount rewrites the amount in words.
    pub fn set_field(&mut self, field: CheckField, value: &str) {
        *self.fields.get_mut(field) = value.to_string();
        if field == CheckField::Amount {
            self.fields.amount_words = amount_text_to_words(value).unwrap_or_default();
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Positions set during this session.
    pub fn touched_layout(&self) -> &Layout {
        &self.touched
    }

    pub fn config(&self) -> DesignerConfig {
        self.config
    }

    /// Preview of the current fields, including an element mid-drag.
    pub fn preview(&self) -> PreviewTree {
        match self.drag.live_position() {
            Some((id, position)) => {
                let mut layout = self.layout.clone();
                layout.set(id, position);
                render_preview(&self.fields, &layout)
            }
            None => render_preview(&self.fields, &self.layout),
        }
    }

    pub fn toggle_drag_mode(&mut self) -> bool {
        self.drag.toggle_drag_mode()
    }

    pub fn set_snap_to_grid(&mut self, snap: bool) {
        self.config.snap_to_grid = snap;
        self.drag.set_snap_to_grid(snap);
    }

    /// Press on the preview. Starts dragging the topmost element under
    /// `pointer` when drag mode is on.
    pub fn pointer_down(&mut self, pointer: Point) -> Option<ElementId> {
        if !self.drag.is_drag_mode() {
            return None;
        }
        let id = self.preview().element_at(pointer)?.id;
        self.drag
            .pointer_down(id, pointer, self.layout.position(id))
            .then_some(id)
    }

    pub fn pointer_move(&mut self, pointer: Point) -> Option<Point> {
        self.drag.pointer_move(pointer)
    }

    /// Release the pointer, applying the drag to the working layout.
    pub fn pointer_up(&mut self) -> Option<DragCommit> {
        let commit = self.drag.pointer_up()?;
        self.apply_position(commit.element, commit.position);
        Some(commit)
    }

    fn apply_position(&mut self, id: ElementId, position: Point) {
        self.layout.set(id, position);
        self.touched.set(id, position);
        if let Some(listener) = self.on_layout_change.as_mut() {
            listener(id, position);
        }
    }

    /// Move every element back to its default position, notifying each.
    pub fn reset_positions(&mut self) -> Vec<(ElementId, Point)> {
        let defaults = Layout::defaults();
        for (id, position) in defaults.iter() {
            self.apply_position(id, position);
        }
        defaults.iter().collect()
    }

    /// Start over from the default layout with nothing touched.
    pub fn start_blank(&mut self) {
        self.layout = Layout::defaults();
        self.touched = Layout::new();
    }

    fn replace_layout(&mut self, layout: Layout) {
        self.layout = layout.merge_with_defaults();
        self.touched = layout;
    }

    pub fn save_layout(&self, name: &str) -> StoreResult<SavedLayout> {
        self.layouts.save(name, &self.layout)
    }

    /// Load the named layout over the defaults. Returns `false` if no layout
    /// has that name.
    pub fn load_layout(&mut self, name: &str) -> StoreResult<bool> {
        let Some(saved) = self.layouts.load(name)? else {
            return Ok(false);
        };
        self.replace_layout(saved.layout);
        Ok(true)
    }

    pub fn saved_layout_names(&self) -> StoreResult<Vec<String>> {
        self.layouts.names()
    }

    /// The working layout as a layout file document.
    pub fn export_layout(&self) -> Result<String, LayoutFileError> {
        export_layout(&self.layout)
    }

    /// Replace the working layout with the one in a layout file document.
    /// On failure the working layout is unchanged.
    pub fn import_layout(&mut self, json: &str) -> Result<(), LayoutFileError> {
        let layout = import_layout(json)?;
        self.replace_layout(layout);
        Ok(())
    }

    /// Start from a gallery template.
    pub fn apply_base_template(&mut self, template: &BaseTemplate) {
        self.replace_layout(template.layout.clone());
    }

    /// Use the layout of a saved template, if it has one.
    pub fn apply_template(&mut self, template: &Template) {
        if let Some(layout) = &template.layout {
            self.replace_layout(layout.clone());
        }
    }

    /// Save the current fields and touched positions as a template.
    pub fn save_template(&self, name: &str) -> TemplateResult<Template> {
        if self.touched.is_empty() {
            return Err(TemplateError::EmptyLayout);
        }
        self.templates
            .save(name, self.fields.clone(), Some(self.touched.clone()))
    }

    pub fn saved_templates(&self) -> StoreResult<Vec<Template>> {
        self.templates.all()
    }
}
