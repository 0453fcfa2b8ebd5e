//! Pointer-driven repositioning of template elements.
//!
//! The controller turns pointer events into element offsets. It owns no
//! layout: committed positions go to the caller through the return value of
//! [`DragController::pointer_up`] and the optional listener.

use crate::element::ElementId;
use crate::snap::{GRID_SIZE, clamp_to_container, snap_to_grid};
use kurbo::{Point, Rect, Size, Vec2};
use std::fmt;

/// Estimated element footprint used to keep dragged elements inside the
/// container.
pub const ELEMENT_SIZE_ESTIMATE: Size = Size::new(100.0, 50.0);

/// Drag behaviour settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSettings {
    pub snap_to_grid: bool,
    pub grid_size: f64,
    pub element_size: Size,
}

impl Default for DragSettings {
    fn default() -> Self {
        Self {
            snap_to_grid: false,
            grid_size: GRID_SIZE,
            element_size: ELEMENT_SIZE_ESTIMATE,
        }
    }
}

/// An element being dragged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveDrag {
    pub element: ElementId,
    /// Pointer position relative to the element's top-left at press time.
    pub offset: Vec2,
    /// Last computed position, `None` until the pointer moves.
    pub current: Option<Point>,
}

/// State of the drag interaction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    /// Drag mode is off; pointer events are ignored.
    #[default]
    Idle,
    /// Drag mode is on, waiting for a press on an element.
    Armed,
    /// An element is following the pointer.
    Dragging(ActiveDrag),
}

/// A position committed when a drag ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragCommit {
    pub element: ElementId,
    pub position: Point,
}

type Listener = Box<dyn FnMut(ElementId, Point)>;

/// Drag state machine over a container rectangle.
pub struct DragController {
    state: DragState,
    settings: DragSettings,
    /// Container rectangle in pointer coordinates.
    container: Rect,
    listener: Option<Listener>,
}

impl fmt::Debug for DragController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragController")
            .field("state", &self.state)
            .field("settings", &self.settings)
            .field("container", &self.container)
            .field("listener", &self.listener.is_some())
            .finish()
    }
}

impl DragController {
    pub fn new(container: Rect, settings: DragSettings) -> Self {
        Self {
            state: DragState::Idle,
            settings,
            container,
            listener: None,
        }
    }

    /// Report every committed position to `listener`, in commit order.
    pub fn set_listener(&mut self, listener: impl FnMut(ElementId, Point) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn settings(&self) -> DragSettings {
        self.settings
    }

    pub fn set_snap_to_grid(&mut self, snap: bool) {
        self.settings.snap_to_grid = snap;
    }

    pub fn set_container(&mut self, container: Rect) {
        self.container = container;
    }

    /// Whether drag mode is on.
    pub fn is_drag_mode(&self) -> bool {
        !matches!(self.state, DragState::Idle)
    }

    /// Switch drag mode on or off. Switching off abandons a drag in progress
    /// without committing it. Returns the new mode.
    pub fn toggle_drag_mode(&mut self) -> bool {
        self.state = match self.state {
            DragState::Idle => DragState::Armed,
            DragState::Armed | DragState::Dragging(_) => {
                log::debug!("Drag mode off");
                DragState::Idle
            }
        };
        self.is_drag_mode()
    }

    /// Start dragging `element`, whose top-left corner is at
    /// `element_top_left`. Ignored unless the controller is armed.
    pub fn pointer_down(&mut self, element: ElementId, pointer: Point, element_top_left: Point) -> bool {
        if self.state != DragState::Armed {
            return false;
        }
        self.state = DragState::Dragging(ActiveDrag {
            element,
            offset: pointer - element_top_left,
            current: None,
        });
        true
    }

    /// Follow the pointer. Returns the element's new position while dragging.
    pub fn pointer_move(&mut self, pointer: Point) -> Option<Point> {
        let DragState::Dragging(drag) = &mut self.state else {
            return None;
        };

        let mut position = pointer - self.container.origin().to_vec2() - drag.offset;
        if self.settings.snap_to_grid {
            position = snap_to_grid(position, self.settings.grid_size);
        }
        let position = clamp_to_container(position, self.container.size(), self.settings.element_size);

        drag.current = Some(position);
        Some(position)
    }

    /// End the drag, committing the last computed position if the pointer
    /// moved since the press.
    pub fn pointer_up(&mut self) -> Option<DragCommit> {
        let DragState::Dragging(drag) = self.state else {
            return None;
        };
        self.state = DragState::Armed;

        let position = drag.current?;
        let commit = DragCommit {
            element: drag.element,
            position,
        };
        log::debug!("Committed {} at ({}, {})", commit.element, position.x, position.y);
        if let Some(listener) = self.listener.as_mut() {
            listener(commit.element, commit.position);
        }
        Some(commit)
    }

    /// The element being dragged and its uncommitted position, if any.
    pub fn live_position(&self) -> Option<(ElementId, Point)> {
        match self.state {
            DragState::Dragging(ActiveDrag {
                element,
                current: Some(position),
                ..
            }) => Some((element, position)),
            _ => None,
        }
    }
}
