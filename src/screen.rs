// src/screen.rs
//! Screen host: owns the transform arena, the cursor and every picker.
//!
//! Picker callbacks receive `&mut Screen`, so a callback can show, hide or
//! fill other pickers. A picker opened from inside the topmost picker's
//! callbacks nests on top of it; opening a picker beside an open one from
//! anywhere else is rejected with [`ModalError::SiblingPicker`].

extern crate alloc;

use core::mem;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use log::{debug, warn};
use slotmap::SlotMap;

use crate::config::UiConfig;
use crate::error::{ModalError, ModalResult, TransformResult};
use crate::picker::{GroupDef, PickedButton, Picker, PickerId, Released, ShowOptions};
use crate::transform::{TransformArena, XfrmId};
use crate::ui::components::button::{Action, Button, ButtonSpec, WidgetId, WidgetIdAllocator};
use crate::ui::cursor::{Cursor, Dismiss};
use crate::ui::navigator::{Direction, Focusable, Navigate};

/// Input events understood by the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Up,
    Down,
    Left,
    Right,
    /// Activate the focused widget
    Select,
    /// Dismiss the topmost picker
    Cancel,
}

/// Outcome of [`Screen::handle_input`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    Handled,
    NotHandled,
    /// A base-screen widget was selected while no picker was open
    Selected(WidgetId),
}

pub struct Screen {
    config: UiConfig,
    xfrms: TransformArena,
    root: XfrmId,
    cursor: Cursor,
    ids: WidgetIdAllocator,
    pickers: SlotMap<PickerId, Picker>,
    /// Picker whose callbacks are running, if any
    dispatching: Option<PickerId>,
}

fn slot(pickers: &mut SlotMap<PickerId, Picker>, id: PickerId) -> ModalResult<&mut Picker> {
    pickers.get_mut(id).ok_or(ModalError::UnknownPicker(id))
}

impl Screen {
    pub fn new(config: UiConfig) -> Self {
        let (xfrms, root) = TransformArena::with_root(config.center());
        Self {
            config,
            xfrms,
            root,
            cursor: Cursor::new(),
            ids: WidgetIdAllocator::default(),
            pickers: SlotMap::with_key(),
            dispatching: None,
        }
    }

    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    pub fn xfrms(&self) -> &TransformArena {
        &self.xfrms
    }

    pub fn xfrms_mut(&mut self) -> &mut TransformArena {
        &mut self.xfrms
    }

    /// Transform at the center of the display
    pub fn root(&self) -> XfrmId {
        self.root
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn alloc_widget_id(&mut self) -> WidgetId {
        self.ids.allocate()
    }

    // -----------------------------------------------------------------------
    // Base screen widgets
    // -----------------------------------------------------------------------

    /// Create a base-screen button. Without an explicit parent the button
    /// is placed relative to the display center.
    pub fn create_button(&mut self, mut spec: ButtonSpec<'_>) -> TransformResult<Button> {
        if spec.parent.is_none() {
            spec.parent = Some(self.root);
        }
        let id = self.ids.allocate();
        Button::new(&mut self.xfrms, id, spec)
    }

    /// Add base-screen widgets to the focus set.
    ///
    /// Only possible while no picker is open; returns `false` otherwise.
    /// The first widget registered receives focus.
    pub fn register_focusables(&mut self, focusables: &[Focusable]) -> bool {
        if self.cursor.cancel_depth() > 0 {
            warn!("Base widgets registered while a picker is open");
            return false;
        }
        self.cursor.navigator_mut().add_buttons(&self.xfrms, focusables);
        if self.cursor.focus().is_none()
            && let Some(first) = self.cursor.navigator_mut().initial_cursor(0, 0)
        {
            self.cursor.focus_widget(&self.xfrms, &first);
        }
        true
    }

    // -----------------------------------------------------------------------
    // Pickers
    // -----------------------------------------------------------------------

    pub fn create_picker(&mut self) -> ModalResult<PickerId> {
        let xfrm = self.xfrms.alloc(Some(self.root))?;
        let id = self.pickers.insert_with_key(|id| Picker::new(id, xfrm));
        debug!("Created picker {:?}", id);
        Ok(id)
    }

    /// Drop a hidden picker and release its transform.
    pub fn remove_picker(&mut self, id: PickerId) -> ModalResult<()> {
        let picker = slot(&mut self.pickers, id)?;
        if picker.is_visible() {
            return Err(ModalError::AlreadyVisible(id));
        }
        picker.destroy(&mut self.xfrms);
        self.pickers.remove(id);
        Ok(())
    }

    pub fn picker(&self, id: PickerId) -> Option<&Picker> {
        self.pickers.get(id)
    }

    /// Queue a group for the picker's next show.
    pub fn add_group(&mut self, id: PickerId, group: GroupDef) -> ModalResult<()> {
        slot(&mut self.pickers, id)?.add_group(group);
        Ok(())
    }

    /// The picker that currently owns input, if any.
    pub fn topmost(&self) -> Option<PickerId> {
        match self.cursor.peek_cancel()? {
            Dismiss::Picker(id) => Some(id),
        }
    }

    pub fn open_count(&self) -> usize {
        self.cursor.cancel_depth()
    }

    pub fn is_visible(&self, id: PickerId) -> bool {
        self.picker(id).is_some_and(Picker::is_visible)
    }

    /// Open a picker on top of whatever owns input.
    pub fn show(&mut self, id: PickerId, opts: ShowOptions, hide_on_click: bool) -> ModalResult<()> {
        if let Some(open) = self.topmost()
            && open != id
            && self.dispatching != Some(open)
        {
            warn!("Picker {:?} shown beside open picker {:?}", id, open);
            return Err(ModalError::SiblingPicker {
                requested: id,
                open,
            });
        }
        let picker = slot(&mut self.pickers, id)?;
        picker.open(&mut self.xfrms, &mut self.cursor, &mut self.ids, opts, hide_on_click)
    }

    /// Close a visible picker. It must be the topmost one.
    pub fn hide(&mut self, id: PickerId) -> ModalResult<()> {
        if !slot(&mut self.pickers, id)?.is_visible() {
            warn!("Hide of hidden picker {:?}", id);
            return Err(ModalError::NotVisible(id));
        }
        self.close_picker(id)
    }

    /// Dismiss the topmost picker. Returns `false` when none is open.
    pub fn cancel(&mut self) -> ModalResult<bool> {
        let Some(id) = self.topmost() else {
            return Ok(false);
        };
        debug!("Cancel dismisses {:?}", id);
        self.hide(id)?;
        Ok(true)
    }

    /// Route a click on one of a picker's buttons.
    ///
    /// Only the topmost picker takes clicks.
    pub fn on_button_clicked(&mut self, id: PickerId, widget: WidgetId) -> ModalResult<()> {
        let top = self.cursor.peek_cancel();
        let picker = slot(&mut self.pickers, id)?;
        if !picker.is_visible() {
            return Err(ModalError::NotVisible(id));
        }
        if let Some(found) = top
            && found != Dismiss::Picker(id)
        {
            warn!("Click on picker {:?} under {:?}", id, found);
            return Err(ModalError::CancelOrder {
                expected: Dismiss::Picker(id),
                found,
            });
        }
        let (action, picked) = picker
            .find_button(&self.xfrms, widget)
            .ok_or(ModalError::UnknownWidget { picker: id, widget })?;

        match action {
            Action::Delete => self.delete_clicked(id),
            Action::Pick | Action::Custom(_) => self.pick_clicked(id, picked),
        }
    }

    fn pick_clicked(&mut self, id: PickerId, picked: PickedButton) -> ModalResult<()> {
        let picker = slot(&mut self.pickers, id)?;
        let hide_on_click = picker.hide_on_click();
        let shown = picker.show_count();
        let mut on_click = picker.on_click.take();

        if let Some(handler) = on_click.as_mut() {
            self.dispatch(Some(id), |screen| handler(screen, picked.icon.as_str(), &picked));
        }

        let nested = self.topmost() != Some(id);
        let Some(picker) = self.pickers.get_mut(id) else {
            // The handler removed it
            return Ok(());
        };
        if !picker.is_visible() || picker.show_count() != shown {
            // The handler closed it, and possibly opened it again with new
            // callbacks; the old handler is dropped here.
            return Ok(());
        }
        if !hide_on_click {
            picker.on_click = on_click;
            return Ok(());
        }
        if nested {
            debug!("Picker {:?} closes once its nested picker unwinds", id);
            picker.close_pending = true;
            return Ok(());
        }
        self.close_picker(id)
    }

    fn delete_clicked(&mut self, id: PickerId) -> ModalResult<()> {
        self.close_picker(id)
    }

    /// Pop the picker's own dismiss entry and close it, then close every
    /// picker underneath whose one-shot click was waiting for it.
    fn close_picker(&mut self, id: PickerId) -> ModalResult<()> {
        self.close_one(id)?;
        while let Some(top) = self.topmost()
            && self.pickers.get(top).is_some_and(Picker::close_pending)
        {
            self.close_one(top)?;
        }
        Ok(())
    }

    fn close_one(&mut self, id: PickerId) -> ModalResult<()> {
        let picker = slot(&mut self.pickers, id)?;
        self.cursor.pop_cancel(Dismiss::Picker(id))?;
        let released = picker.close(&mut self.xfrms, &mut self.cursor);
        self.notify_closed(released);
        Ok(())
    }

    /// Run the callbacks a closing picker handed back. They run on behalf of
    /// the picker underneath, so they may open pickers on top of it.
    fn notify_closed(&mut self, released: Released) {
        let owner = self.topmost();
        self.dispatch(owner, |screen| {
            if let Some(on_hide) = released.on_hide {
                on_hide(screen);
            }
            if let Some(on_delete) = released.on_delete {
                on_delete(screen);
            }
        });
    }

    fn dispatch(&mut self, owner: Option<PickerId>, f: impl FnOnce(&mut Self)) {
        let prev = mem::replace(&mut self.dispatching, owner);
        f(self);
        self.dispatching = prev;
    }

    // -----------------------------------------------------------------------
    // Input and drawing
    // -----------------------------------------------------------------------

    pub fn handle_input(&mut self, input: Input) -> ModalResult<InputResult> {
        let direction = match input {
            Input::Up => Direction::Up,
            Input::Down => Direction::Down,
            Input::Left => Direction::Left,
            Input::Right => Direction::Right,
            Input::Cancel => {
                return Ok(if self.cancel()? {
                    InputResult::Handled
                } else {
                    InputResult::NotHandled
                });
            }
            Input::Select => {
                let Some(target) = self.cursor.focus().map(|f| f.id) else {
                    return Ok(InputResult::NotHandled);
                };
                return match self.topmost() {
                    Some(id) => {
                        self.on_button_clicked(id, target)?;
                        Ok(InputResult::Handled)
                    }
                    None => Ok(InputResult::Selected(target)),
                };
            }
        };

        Ok(if self.cursor.move_focus(&self.xfrms, direction) {
            InputResult::Handled
        } else {
            InputResult::NotHandled
        })
    }

    /// Draw open pickers bottom to top, then the focus cursor.
    pub fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        for entry in self.cursor.cancel_entries() {
            let Dismiss::Picker(id) = *entry;
            if let Some(picker) = self.picker(id) {
                picker.draw(&self.xfrms, display, &self.config)?;
            }
        }
        self.cursor.draw(display, self.config.cursor_color)
    }
}
