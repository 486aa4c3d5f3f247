//! Focus traversal strategies.
//!
//! A navigator holds the set of focusable widgets of whoever currently owns
//! input (a picker, or the base screen) and moves a focus cursor through
//! them in response to directional input.
//!
//! # Navigate trait
//!
//! [`Navigate`] is the capability every strategy implements. Registration
//! order is traversal order: widgets are appended by
//! [`Navigate::add_buttons`] and the first one registered receives initial
//! focus unless a strategy defines a positional rule.
//!
//! # Navigator
//!
//! The set of strategies is closed. [`Navigator`] is an enum over the
//! concrete types and delegates every [`Navigate`] method to the active
//! variant, so owners can store "some navigator" without a trait object.
//! [`NavigatorKind`] names a strategy without holding any state; pickers use
//! it to build a fresh navigator on every show.

extern crate alloc;

use alloc::vec::Vec;

use crate::geometry::Bounds;
use crate::transform::{TransformArena, XfrmId};
use crate::ui::components::button::{Label, WidgetId};

/// Directional input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Everything a navigator needs to know about a widget.
///
/// Navigators keep the transform handle rather than a position, so the
/// focus cursor always lands on the widget's current world position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Focusable {
    pub id: WidgetId,
    pub xfrm: XfrmId,
    pub bounds: Bounds,
    pub aria: Label,
}

// ---------------------------------------------------------------------------
// Navigate trait
// ---------------------------------------------------------------------------

/// Focus traversal capability.
pub trait Navigate {
    /// Append widgets to the focus set, in traversal order.
    fn add_buttons(&mut self, xfrms: &TransformArena, buttons: &[Focusable]);

    /// Select and return the widget that receives focus first.
    ///
    /// Returns `None` only when the focus set is empty.
    fn initial_cursor(&mut self, x: usize, y: usize) -> Option<Focusable>;

    /// Move focus one step and return the newly focused widget.
    fn move_focus(&mut self, direction: Direction) -> Option<Focusable>;

    /// The currently focused widget.
    fn current(&self) -> Option<&Focusable>;

    /// Forget every widget. Safe to call on an empty navigator.
    fn clear(&mut self);

    /// Number of focusable widgets.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ---------------------------------------------------------------------------
// RowNavigator
// ---------------------------------------------------------------------------

/// Row-major traversal.
///
/// Each [`Navigate::add_buttons`] batch is split into rows of widgets that
/// share a world y coordinate; consecutive batches never merge into one row.
/// Left/right wrap around within a row. Up/down move between rows, stop at
/// the first and last row, and clamp the column to the new row's length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowNavigator {
    rows: Vec<Vec<Focusable>>,
    row: usize,
    col: usize,
}

impl RowNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Current `(row, column)` position.
    pub fn position(&self) -> (usize, usize) {
        (self.row, self.col)
    }
}

impl Navigate for RowNavigator {
    fn add_buttons(&mut self, xfrms: &TransformArena, buttons: &[Focusable]) {
        let mut last_y: Option<Option<i32>> = None;
        for button in buttons {
            let y = xfrms.world_pos(button.xfrm).map(|pos| pos.y).ok();
            let same_row = last_y == Some(y);
            match self.rows.last_mut() {
                Some(row) if same_row => row.push(button.clone()),
                _ => self.rows.push(alloc::vec![button.clone()]),
            }
            last_y = Some(y);
        }
    }

    fn initial_cursor(&mut self, x: usize, y: usize) -> Option<Focusable> {
        let last_row = self.rows.len().checked_sub(1)?;
        self.row = y.min(last_row);
        self.col = x.min(self.rows[self.row].len() - 1);
        self.current().cloned()
    }

    fn move_focus(&mut self, direction: Direction) -> Option<Focusable> {
        if self.rows.is_empty() {
            return None;
        }
        match direction {
            Direction::Left => {
                let len = self.rows[self.row].len();
                self.col = (self.col + len - 1) % len;
            }
            Direction::Right => {
                let len = self.rows[self.row].len();
                self.col = (self.col + 1) % len;
            }
            Direction::Up => {
                if self.row > 0 {
                    self.row -= 1;
                    self.col = self.col.min(self.rows[self.row].len() - 1);
                }
            }
            Direction::Down => {
                if self.row + 1 < self.rows.len() {
                    self.row += 1;
                    self.col = self.col.min(self.rows[self.row].len() - 1);
                }
            }
        }
        self.current().cloned()
    }

    fn current(&self) -> Option<&Focusable> {
        self.rows.get(self.row)?.get(self.col)
    }

    fn clear(&mut self) {
        self.rows.clear();
        self.row = 0;
        self.col = 0;
    }

    fn len(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }
}

// ---------------------------------------------------------------------------
// LinearNavigator
// ---------------------------------------------------------------------------

/// Single-sequence traversal: left/up step back, right/down step forward,
/// wrapping at both ends. Positions are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinearNavigator {
    items: Vec<Focusable>,
    index: usize,
}

impl LinearNavigator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Navigate for LinearNavigator {
    fn add_buttons(&mut self, _xfrms: &TransformArena, buttons: &[Focusable]) {
        self.items.extend_from_slice(buttons);
    }

    fn initial_cursor(&mut self, x: usize, _y: usize) -> Option<Focusable> {
        let last = self.items.len().checked_sub(1)?;
        self.index = x.min(last);
        self.current().cloned()
    }

    fn move_focus(&mut self, direction: Direction) -> Option<Focusable> {
        let len = self.items.len();
        if len == 0 {
            return None;
        }
        self.index = match direction {
            Direction::Left | Direction::Up => (self.index + len - 1) % len,
            Direction::Right | Direction::Down => (self.index + 1) % len,
        };
        self.current().cloned()
    }

    fn current(&self) -> Option<&Focusable> {
        self.items.get(self.index)
    }

    fn clear(&mut self) {
        self.items.clear();
        self.index = 0;
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}

// ---------------------------------------------------------------------------
// Navigator
// ---------------------------------------------------------------------------

/// Names a navigation strategy without holding any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavigatorKind {
    #[default]
    Row,
    Linear,
}

impl NavigatorKind {
    /// Every strategy, in declaration order.
    pub const ALL: [NavigatorKind; 2] = [NavigatorKind::Row, NavigatorKind::Linear];

    /// Build a fresh, empty navigator of this kind.
    pub fn build(self) -> Navigator {
        match self {
            NavigatorKind::Row => Navigator::Row(RowNavigator::new()),
            NavigatorKind::Linear => Navigator::Linear(LinearNavigator::new()),
        }
    }
}

/// One of the concrete navigation strategies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigator {
    Row(RowNavigator),
    Linear(LinearNavigator),
}

impl Default for Navigator {
    fn default() -> Self {
        NavigatorKind::default().build()
    }
}

impl Navigator {
    pub fn kind(&self) -> NavigatorKind {
        match self {
            Navigator::Row(_) => NavigatorKind::Row,
            Navigator::Linear(_) => NavigatorKind::Linear,
        }
    }

    /// Whether a widget with this id is in the focus set.
    pub fn contains(&self, id: WidgetId) -> bool {
        match self {
            Navigator::Row(nav) => nav.rows.iter().flatten().any(|f| f.id == id),
            Navigator::Linear(nav) => nav.items.iter().any(|f| f.id == id),
        }
    }
}

impl Navigate for Navigator {
    fn add_buttons(&mut self, xfrms: &TransformArena, buttons: &[Focusable]) {
        match self {
            Navigator::Row(nav) => nav.add_buttons(xfrms, buttons),
            Navigator::Linear(nav) => nav.add_buttons(xfrms, buttons),
        }
    }

    fn initial_cursor(&mut self, x: usize, y: usize) -> Option<Focusable> {
        match self {
            Navigator::Row(nav) => nav.initial_cursor(x, y),
            Navigator::Linear(nav) => nav.initial_cursor(x, y),
        }
    }

    fn move_focus(&mut self, direction: Direction) -> Option<Focusable> {
        match self {
            Navigator::Row(nav) => nav.move_focus(direction),
            Navigator::Linear(nav) => nav.move_focus(direction),
        }
    }

    fn current(&self) -> Option<&Focusable> {
        match self {
            Navigator::Row(nav) => nav.current(),
            Navigator::Linear(nav) => nav.current(),
        }
    }

    fn clear(&mut self) {
        match self {
            Navigator::Row(nav) => nav.clear(),
            Navigator::Linear(nav) => nav.clear(),
        }
    }

    fn len(&self) -> usize {
        match self {
            Navigator::Row(nav) => nav.len(),
            Navigator::Linear(nav) => nav.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::components::button::bounded;
    use embedded_graphics::prelude::*;

    /// Register `count` widgets laid out `per_row` to a row, 10px apart.
    fn grid(xfrms: &mut TransformArena, count: u32, per_row: u32) -> Vec<Focusable> {
        (0..count)
            .map(|i| {
                let xfrm = xfrms.alloc(None).unwrap();
                let pos = Point::new((i % per_row) as i32 * 10, (i / per_row) as i32 * 10);
                xfrms.set_local(xfrm, pos).unwrap();
                Focusable {
                    id: WidgetId(i),
                    xfrm,
                    bounds: Bounds::centered(Size::new(8, 8)),
                    aria: bounded("w"),
                }
            })
            .collect()
    }

    fn focused_id(nav: &impl Navigate) -> Option<u32> {
        nav.current().map(|f| f.id.0)
    }

    #[test]
    fn test_row_navigator_splits_batch_by_y() {
        let mut xfrms = TransformArena::new();
        let mut nav = RowNavigator::new();
        let buttons = grid(&mut xfrms, 7, 5);
        nav.add_buttons(&xfrms, &buttons);

        assert_eq!(nav.row_count(), 2);
        assert_eq!(nav.len(), 7);
    }

    #[test]
    fn test_row_navigator_batches_never_merge() {
        let mut xfrms = TransformArena::new();
        let buttons = grid(&mut xfrms, 4, 5);
        let mut nav = RowNavigator::new();
        nav.add_buttons(&xfrms, &buttons[..2]);
        nav.add_buttons(&xfrms, &buttons[2..]);
        assert_eq!(nav.row_count(), 2);
    }

    #[test]
    fn test_row_navigator_wraps_horizontally() {
        let mut xfrms = TransformArena::new();
        let buttons = grid(&mut xfrms, 3, 5);
        let mut nav = RowNavigator::new();
        nav.add_buttons(&xfrms, &buttons);

        assert_eq!(nav.initial_cursor(0, 0).map(|f| f.id.0), Some(0));
        nav.move_focus(Direction::Left);
        assert_eq!(focused_id(&nav), Some(2));
        nav.move_focus(Direction::Right);
        assert_eq!(focused_id(&nav), Some(0));
    }

    #[test]
    fn test_row_navigator_clamps_vertically() {
        let mut xfrms = TransformArena::new();
        let buttons = grid(&mut xfrms, 7, 5);
        let mut nav = RowNavigator::new();
        nav.add_buttons(&xfrms, &buttons);
        nav.initial_cursor(4, 0);

        nav.move_focus(Direction::Up);
        assert_eq!(nav.position(), (0, 4));

        // Second row only has two widgets.
        nav.move_focus(Direction::Down);
        assert_eq!(nav.position(), (1, 1));
        assert_eq!(focused_id(&nav), Some(6));

        nav.move_focus(Direction::Down);
        assert_eq!(nav.position(), (1, 1));
    }

    #[test]
    fn test_initial_cursor_clamps_and_handles_empty() {
        let mut xfrms = TransformArena::new();
        let mut nav = RowNavigator::new();
        assert_eq!(nav.initial_cursor(0, 0), None);

        let buttons = grid(&mut xfrms, 3, 5);
        nav.add_buttons(&xfrms, &buttons);
        assert_eq!(nav.initial_cursor(9, 9).map(|f| f.id.0), Some(2));
    }

    #[test]
    fn test_clear_is_reusable() {
        let mut xfrms = TransformArena::new();
        let buttons = grid(&mut xfrms, 3, 5);

        for kind in NavigatorKind::ALL {
            let mut nav = kind.build();
            nav.clear();
            nav.add_buttons(&xfrms, &buttons);
            nav.initial_cursor(1, 0);
            nav.clear();
            assert!(nav.is_empty());
            assert!(nav.current().is_none());
            assert!(nav.move_focus(Direction::Right).is_none());

            nav.add_buttons(&xfrms, &buttons[..1]);
            assert_eq!(nav.initial_cursor(0, 0).map(|f| f.id.0), Some(0));
            assert_eq!(nav.kind(), kind);
        }
    }

    #[test]
    fn test_linear_navigator_wraps_both_axes() {
        let mut xfrms = TransformArena::new();
        let buttons = grid(&mut xfrms, 7, 5);
        let mut nav = NavigatorKind::Linear.build();
        nav.add_buttons(&xfrms, &buttons);
        nav.initial_cursor(0, 0);

        nav.move_focus(Direction::Up);
        assert_eq!(focused_id(&nav), Some(6));
        nav.move_focus(Direction::Down);
        nav.move_focus(Direction::Down);
        assert_eq!(focused_id(&nav), Some(1));
        assert!(nav.contains(WidgetId(4)));
        assert!(!nav.contains(WidgetId(40)));
    }
}
