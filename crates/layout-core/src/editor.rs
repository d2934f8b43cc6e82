use serde::{Deserialize, Serialize};

use crate::export::ExportValue;
use crate::model::Layout;
use crate::reconcile::{DragEnd, DragStart, apply_drag_end};
use crate::resize::{DEFAULT_COLUMN_WIDTH, MIN_COLUMN_WIDTH, ResizeEngine, ResizeLimits};
use crate::target::{DragKind, DropTarget};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub min_column_width: f64,
    pub default_column_width: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            min_column_width: MIN_COLUMN_WIDTH,
            default_column_width: DEFAULT_COLUMN_WIDTH,
        }
    }
}

impl EditorConfig {
    /// Replaces non-positive (or NaN) widths with the defaults and keeps the
    /// default width at or above the minimum.
    pub fn with_defaults(mut self) -> Self {
        if self.min_column_width.is_nan() || self.min_column_width <= 0.0 {
            self.min_column_width = MIN_COLUMN_WIDTH;
        }
        if self.default_column_width.is_nan() || self.default_column_width <= 0.0 {
            self.default_column_width = DEFAULT_COLUMN_WIDTH;
        }
        if self.default_column_width < self.min_column_width {
            self.default_column_width = self.min_column_width;
        }
        self
    }

    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(s).map(Self::with_defaults)
    }

    pub fn resize_limits(&self) -> ResizeLimits {
        ResizeLimits {
            min_width: self.min_column_width,
            default_width: self.default_column_width,
        }
    }
}

/// Everything the interaction layer can report to an [`Editor`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EditorEvent {
    DragStart(DragStart),
    DragEnd(DragEnd),
    DividerPressed { row: usize, left: usize, x: f64 },
    PointerMoved { x: f64 },
    PointerReleased,
}

/// One editing session: owns the current layout snapshot and the interaction
/// mode. Every edit installs a new snapshot; none is modified in place.
pub struct Editor {
    layout: Layout,
    config: EditorConfig,
    resize: ResizeEngine,
    active_drag: Option<DragStart>,
}

impl Editor {
    pub fn new(layout: Layout, config: EditorConfig) -> Self {
        let config = config.with_defaults();
        Self {
            layout,
            config,
            resize: ResizeEngine::new(config.resize_limits()),
            active_drag: None,
        }
    }

    pub fn with_seed() -> Self {
        Self::new(Layout::seed(), EditorConfig::default())
    }

    pub fn snapshot(&self) -> &Layout {
        &self.layout
    }

    pub fn replace_snapshot(&mut self, next: Layout) {
        self.layout = next;
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn is_resizing(&self) -> bool {
        self.resize.is_resizing()
    }

    pub fn is_dragging(&self) -> bool {
        self.active_drag.is_some()
    }

    pub fn dragging_kind(&self) -> Option<DragKind> {
        self.active_drag.as_ref().map(|drag| drag.kind)
    }

    /// Starts a drag gesture unless a divider is being dragged.
    pub fn on_drag_start(&mut self, start: DragStart) -> bool {
        if self.resize.is_resizing() {
            tracing::debug!(active = %start.active_id, "drag suppressed by resize");
            return false;
        }
        self.active_drag = Some(start);
        true
    }

    /// Finishes a drag gesture. Returns whether the layout changed.
    pub fn on_drag_end(&mut self, end: DragEnd) -> bool {
        if self.resize.is_resizing() {
            tracing::debug!(active = %end.active_id, "drag end ignored during resize");
            return false;
        }
        self.active_drag = None;
        let next = apply_drag_end(&self.layout, &end);
        self.commit(next)
    }

    /// Captures a divider for resizing unless a drag is in flight.
    pub fn on_divider_pressed(&mut self, row: usize, left: usize, x: f64) -> bool {
        if let Some(drag) = &self.active_drag {
            tracing::debug!(active = %drag.active_id, "resize suppressed by drag");
            return false;
        }
        self.resize.press(row, left, x);
        true
    }

    /// Returns whether any column width changed.
    pub fn on_pointer_move(&mut self, x: f64) -> bool {
        match self.resize.pointer_move(x, &self.layout) {
            Some(next) => self.commit(next),
            None => false,
        }
    }

    pub fn on_pointer_released(&mut self) {
        self.resize.release();
    }

    /// Whether the zone named by `token` should highlight for the active drag.
    pub fn highlights(&self, token: &str) -> bool {
        let Some(kind) = self.dragging_kind() else {
            return false;
        };
        DropTarget::parse(token, &self.layout).accepts(kind)
    }

    pub fn export(&self) -> ExportValue {
        ExportValue::from_layout(&self.layout)
    }

    /// Dispatches `event`. Returns whether the layout changed.
    pub fn handle(&mut self, event: EditorEvent) -> bool {
        match event {
            EditorEvent::DragStart(start) => {
                self.on_drag_start(start);
                false
            }
            EditorEvent::DragEnd(end) => self.on_drag_end(end),
            EditorEvent::DividerPressed { row, left, x } => {
                self.on_divider_pressed(row, left, x);
                false
            }
            EditorEvent::PointerMoved { x } => self.on_pointer_move(x),
            EditorEvent::PointerReleased => {
                self.on_pointer_released();
                false
            }
        }
    }

    fn commit(&mut self, next: Layout) -> bool {
        if next == self.layout {
            return false;
        }
        self.replace_snapshot(next);
        true
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::with_seed()
    }
}
