use serde::{Deserialize, Serialize};

use crate::model::Layout;

pub const MIN_COLUMN_WIDTH: f64 = 80.0;
pub const DEFAULT_COLUMN_WIDTH: f64 = 240.0;

/// Width limits applied while dragging a column divider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeLimits {
    pub min_width: f64,
    /// Width assumed for a column that has none yet.
    pub default_width: f64,
}

impl Default for ResizeLimits {
    fn default() -> Self {
        Self {
            min_width: MIN_COLUMN_WIDTH,
            default_width: DEFAULT_COLUMN_WIDTH,
        }
    }
}

/// The divider drag in progress: the divider right of column `left` in `row`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResizeCapture {
    pub row: usize,
    pub left: usize,
    pub last_x: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ResizeState {
    #[default]
    Idle,
    Resizing(ResizeCapture),
}

/// Redistributes width between two adjacent columns while a divider is dragged.
#[derive(Debug, Clone, Default)]
pub struct ResizeEngine {
    state: ResizeState,
    limits: ResizeLimits,
}

impl ResizeEngine {
    pub fn new(limits: ResizeLimits) -> Self {
        Self {
            state: ResizeState::Idle,
            limits,
        }
    }

    pub fn state(&self) -> ResizeState {
        self.state
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self.state, ResizeState::Resizing(_))
    }

    /// Captures the divider right of column `left`. A second press replaces
    /// the current capture.
    pub fn press(&mut self, row: usize, left: usize, x: f64) {
        if let ResizeState::Resizing(previous) = self.state {
            tracing::debug!(?previous, "resize capture replaced");
        }
        self.state = ResizeState::Resizing(ResizeCapture {
            row,
            left,
            last_x: x,
        });
    }

    /// Feeds a pointer position. Returns the resized tree, or `None` when idle
    /// or when the captured divider has no column on its right.
    ///
    /// The pointer position is recorded even when nothing is resized.
    pub fn pointer_move(&mut self, x: f64, layout: &Layout) -> Option<Layout> {
        let ResizeState::Resizing(capture) = &mut self.state else {
            return None;
        };
        let delta = x - capture.last_x;
        capture.last_x = x;
        let capture = *capture;

        let columns = &layout.rows.get(capture.row)?.columns;
        let left = columns.get(capture.left)?;
        let right = columns.get(capture.left.checked_add(1)?)?;

        let ResizeLimits {
            min_width,
            default_width,
        } = self.limits;
        let left_width = (left.width.unwrap_or(default_width) + delta).max(min_width);
        let right_width = (right.width.unwrap_or(default_width) - delta).max(min_width);
        tracing::trace!(
            row = capture.row,
            left = capture.left,
            delta,
            left_width,
            right_width,
            "resize"
        );

        let mut next = layout.clone();
        let columns = &mut next.rows[capture.row].columns;
        columns[capture.left].width = Some(left_width);
        columns[capture.left + 1].width = Some(right_width);
        Some(next)
    }

    /// Ends the capture wherever the pointer is. The last widths stay.
    pub fn release(&mut self) {
        self.state = ResizeState::Idle;
    }
}
