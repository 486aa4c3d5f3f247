//! Input focus state for a screen.
//!
//! The [`Cursor`] is the single record of where input focus is: the focused
//! widget's world position, id and bounds, the [`Navigator`] that owns
//! directional input, and the dismiss stack that resolves a cancel input to
//! the topmost open modal.
//!
//! Exactly one writer owns the cursor at a time: the topmost open picker, or
//! the base screen when no picker is open. Pickers take a [`CursorState`]
//! snapshot when they open and restore it verbatim when they close, which is
//! what makes nesting unwind to the right place.

use core::mem;

use embedded_graphics::mono_font::ascii::FONT_4X6;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use log::debug;

use crate::error::{ModalError, ModalResult};
use crate::geometry::{Bounds, Vec2};
use crate::picker::PickerId;
use crate::transform::TransformArena;
use crate::ui::components::button::{Label, WidgetId};
use crate::ui::navigator::{Direction, Focusable, Navigate, Navigator};
use crate::ui::styling::ColorIndex;
use crate::ui::surface;

/// Maximum number of simultaneously open modals
pub const MAX_MODAL_DEPTH: usize = 8;

/// The focused widget, resolved to world space
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusTarget {
    pub id: WidgetId,
    pub position: Vec2,
    pub bounds: Bounds,
    pub aria: Label,
}

/// One entry of the dismiss stack: who closes when cancel is pressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dismiss {
    Picker(PickerId),
}

/// Snapshot taken by a picker when it opens.
///
/// The snapshot owns the navigator that was active before the picker took
/// over; restoring the snapshot hands it back to the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorState {
    focus: Option<FocusTarget>,
    navigator: Navigator,
}

impl CursorState {
    pub fn focus(&self) -> Option<&FocusTarget> {
        self.focus.as_ref()
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }
}

/// Focus cursor and dismiss stack
#[derive(Debug, Default)]
pub struct Cursor {
    focus: Option<FocusTarget>,
    navigator: Navigator,
    cancel_stack: heapless::Vec<Dismiss, MAX_MODAL_DEPTH>,
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focus(&self) -> Option<&FocusTarget> {
        self.focus.as_ref()
    }

    pub fn position(&self) -> Option<Vec2> {
        self.focus.as_ref().map(|f| f.position)
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut Navigator {
        &mut self.navigator
    }

    /// Capture focus and move the active navigator into a snapshot.
    ///
    /// The cursor is left with an empty default navigator until
    /// [`Cursor::install_navigator`] is called.
    pub fn save_state(&mut self) -> CursorState {
        CursorState {
            focus: self.focus.clone(),
            navigator: mem::take(&mut self.navigator),
        }
    }

    /// Make `navigator` the active one, returning the one it replaces.
    pub fn install_navigator(&mut self, navigator: Navigator) -> Navigator {
        mem::replace(&mut self.navigator, navigator)
    }

    /// Put a snapshot back, returning the navigator it displaces.
    pub fn restore_state(&mut self, state: CursorState) -> Navigator {
        debug!("Cursor restored to {:?}", state.focus.as_ref().map(|f| f.id));
        self.focus = state.focus;
        mem::replace(&mut self.navigator, state.navigator)
    }

    pub fn move_to(&mut self, target: FocusTarget) {
        debug!("Cursor moved to {:?} at {:?}", target.id, target.position);
        self.focus = Some(target);
    }

    /// Focus a navigator entry at its current world position.
    ///
    /// Returns `false` (and leaves focus alone) if the widget's transform is
    /// no longer live.
    pub fn focus_widget(&mut self, xfrms: &TransformArena, focusable: &Focusable) -> bool {
        match xfrms.world_pos(focusable.xfrm) {
            Ok(position) => {
                self.move_to(FocusTarget {
                    id: focusable.id,
                    position,
                    bounds: focusable.bounds,
                    aria: focusable.aria.clone(),
                });
                true
            }
            Err(_) => false,
        }
    }

    /// Step the active navigator and follow it.
    pub fn move_focus(&mut self, xfrms: &TransformArena, direction: Direction) -> bool {
        match self.navigator.move_focus(direction) {
            Some(target) => self.focus_widget(xfrms, &target),
            None => false,
        }
    }

    // -----------------------------------------------------------------------
    // Dismiss stack
    // -----------------------------------------------------------------------

    pub fn push_cancel(&mut self, entry: Dismiss) -> ModalResult<()> {
        self.cancel_stack.push(entry).map_err(|_| ModalError::TooDeep {
            max: MAX_MODAL_DEPTH,
        })?;
        debug!("Pushed {:?}, depth {}", entry, self.cancel_stack.len());
        Ok(())
    }

    /// Pop the top entry, which must be `expected`.
    ///
    /// The stack is left untouched on error.
    pub fn pop_cancel(&mut self, expected: Dismiss) -> ModalResult<()> {
        match self.cancel_stack.last() {
            None => Err(ModalError::CancelStackEmpty),
            Some(&found) if found != expected => Err(ModalError::CancelOrder { expected, found }),
            Some(_) => {
                self.cancel_stack.pop();
                debug!("Popped {:?}, depth {}", expected, self.cancel_stack.len());
                Ok(())
            }
        }
    }

    /// Pop whatever is on top.
    pub fn pop_top(&mut self) -> Option<Dismiss> {
        self.cancel_stack.pop()
    }

    pub fn peek_cancel(&self) -> Option<Dismiss> {
        self.cancel_stack.last().copied()
    }

    pub fn cancel_depth(&self) -> usize {
        self.cancel_stack.len()
    }

    /// Dismiss entries from bottom (oldest) to top.
    pub fn cancel_entries(&self) -> &[Dismiss] {
        &self.cancel_stack
    }

    /// Outline the focused widget and print its accessible name under it.
    pub fn draw<D: DrawTarget<Color = Rgb565>>(
        &self,
        display: &mut D,
        color: ColorIndex,
    ) -> Result<(), D::Error> {
        let Some(focus) = &self.focus else {
            return Ok(());
        };
        let mut frame = focus.bounds;
        frame.grow(1);
        surface::outline_bounds(display, focus.position, frame, 1, color)?;

        if !focus.aria.is_empty() {
            let tooltip = Point::new(
                focus.position.x + frame.left,
                focus.position.y + frame.bottom + 1,
            );
            surface::print(display, &focus.aria, tooltip, color, &FONT_4X6)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::components::button::bounded;
    use alloc::vec::Vec;

    fn picker_ids(count: usize) -> Vec<PickerId> {
        let mut keys = slotmap::SlotMap::<PickerId, ()>::with_key();
        (0..count).map(|_| keys.insert(())).collect()
    }

    fn target(id: u32) -> FocusTarget {
        FocusTarget {
            id: WidgetId(id),
            position: Point::new(id as i32, 0),
            bounds: Bounds::centered(Size::new(4, 4)),
            aria: bounded("t"),
        }
    }

    #[test]
    fn test_pop_cancel_enforces_lifo() {
        let mut cursor = Cursor::new();
        let ids = picker_ids(2);
        let a = Dismiss::Picker(ids[0]);
        let b = Dismiss::Picker(ids[1]);
        cursor.push_cancel(a).unwrap();
        cursor.push_cancel(b).unwrap();

        assert_eq!(
            cursor.pop_cancel(a),
            Err(ModalError::CancelOrder {
                expected: a,
                found: b
            })
        );
        assert_eq!(cursor.cancel_depth(), 2);

        cursor.pop_cancel(b).unwrap();
        cursor.pop_cancel(a).unwrap();
        assert_eq!(cursor.pop_cancel(a), Err(ModalError::CancelStackEmpty));
    }

    #[test]
    fn test_pop_top_takes_most_recent() {
        let mut cursor = Cursor::new();
        let ids = picker_ids(2);
        assert_eq!(cursor.pop_top(), None);
        cursor.push_cancel(Dismiss::Picker(ids[0])).unwrap();
        cursor.push_cancel(Dismiss::Picker(ids[1])).unwrap();

        assert_eq!(cursor.peek_cancel(), Some(Dismiss::Picker(ids[1])));
        assert_eq!(cursor.pop_top(), Some(Dismiss::Picker(ids[1])));
        assert_eq!(cursor.cancel_entries(), &[Dismiss::Picker(ids[0])]);
    }

    #[test]
    fn test_push_cancel_is_bounded() {
        let mut cursor = Cursor::new();
        let ids = picker_ids(MAX_MODAL_DEPTH + 1);
        for id in &ids[..MAX_MODAL_DEPTH] {
            cursor.push_cancel(Dismiss::Picker(*id)).unwrap();
        }
        assert_eq!(
            cursor.push_cancel(Dismiss::Picker(ids[MAX_MODAL_DEPTH])),
            Err(ModalError::TooDeep {
                max: MAX_MODAL_DEPTH
            })
        );
    }

    #[test]
    fn test_save_and_restore_round_trip() {
        let mut cursor = Cursor::new();
        cursor.move_to(target(3));
        let before_nav = cursor.navigator().clone();

        let saved = cursor.save_state();
        assert_eq!(saved.focus(), Some(&target(3)));
        cursor.install_navigator(crate::ui::navigator::NavigatorKind::Linear.build());
        cursor.move_to(target(9));

        let displaced = cursor.restore_state(saved);
        assert_eq!(displaced.kind(), crate::ui::navigator::NavigatorKind::Linear);
        assert_eq!(cursor.focus(), Some(&target(3)));
        assert_eq!(cursor.navigator(), &before_nav);
    }
}
