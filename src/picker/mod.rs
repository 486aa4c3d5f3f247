//! Modal picker dialogs
//!
//! A [`Picker`] is a transient panel of icon buttons, optionally grouped,
//! optionally titled and optionally carrying a delete action, shown on top
//! of whatever currently owns the screen.
//!
//! # Lifecycle
//!
//! `Hidden -> Visible -> Hidden`. Opening a picker:
//!
//! 1. records the callbacks, title and `hide_on_click`,
//! 2. builds a fresh navigator of the requested kind,
//! 3. snapshots the cursor (focus and active navigator),
//! 4. installs its own navigator in the cursor,
//! 5. pushes its dismiss entry,
//! 6. creates the delete button when `on_delete` is set,
//! 7. turns every pending [`GroupDef`] into live buttons,
//! 8. lays the panel out from scratch and moves focus into it.
//!
//! Closing reverses it: the picker's navigator is cleared, the snapshot is
//! restored, every widget is destroyed and the callbacks are released.
//! Because each picker restores exactly the state it captured, a picker
//! opened from inside another one unwinds back to its parent, not to the
//! screen underneath both.
//!
//! Callback dispatch lives in [`Screen`](crate::screen::Screen), which owns
//! the pickers and hands itself to the callbacks.

extern crate alloc;

use alloc::boxed::Box;
use alloc::vec::Vec;

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use log::debug;
use slotmap::new_key_type;

use crate::config::UiConfig;
use crate::error::{ModalError, ModalResult};
use crate::geometry::{Bounds, Vec2};
use crate::screen::Screen;
use crate::transform::{TransformArena, XfrmId};
use crate::ui::components::button::{
    Action, Button, ButtonSpec, IconId, Label, PickerButton, WidgetId, WidgetIdAllocator, bounded,
};
use crate::ui::cursor::{Cursor, CursorState, Dismiss, MAX_MODAL_DEPTH};
use crate::ui::navigator::{Navigate, NavigatorKind};
use crate::ui::styling::ButtonStyle;
use crate::ui::surface;

pub mod defs;
pub mod group;

pub use defs::{GroupDef, PickerButtonDef};
pub use group::{MAX_PER_ROW, PickerGroup};

/// Header height reserved for a title when there is no delete button
pub const HEADER_HEIGHT_PX: i32 = 16;

/// Offset of the first group from the top of the panel
const PANEL_TOP_MARGIN_PX: i32 = 2;

/// Vertical gap between consecutive groups
const GROUP_SPACING_PX: i32 = 1;

/// Border/background margin around the laid-out content
const PANEL_BORDER_PX: i32 = 2;

/// Icon id of the delete button
pub const DELETE_ICON: &str = "delete";

new_key_type! {
    /// Handle of a picker owned by a [`Screen`]
    pub struct PickerId;
}

/// Snapshot of the button that was clicked, handed to `on_click`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedButton {
    pub id: WidgetId,
    pub icon: IconId,
    pub label: Option<Label>,
    pub position: Vec2,
    pub bounds: Bounds,
}

pub type ClickHandler = Box<dyn FnMut(&mut Screen, &str, &PickedButton)>;
pub type HideHandler = Box<dyn FnOnce(&mut Screen)>;
pub type DeleteHandler = Box<dyn FnOnce(&mut Screen)>;

/// How a picker should behave for one show.
///
/// # Examples
///
/// ```ignore
/// let opts = ShowOptions::new()
///     .with_title("Colors")
///     .on_click(|screen, icon, _| log::info!("picked {icon}"))
///     .on_hide(|_| log::info!("closed"));
/// screen.show(picker, opts, true)?;
/// ```
#[derive(Default)]
pub struct ShowOptions {
    title: Option<Label>,
    on_click: Option<ClickHandler>,
    on_hide: Option<HideHandler>,
    on_delete: Option<DeleteHandler>,
    navigator: NavigatorKind,
}

impl ShowOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(bounded(title));
        self
    }

    pub fn on_click(mut self, handler: impl FnMut(&mut Screen, &str, &PickedButton) + 'static) -> Self {
        self.on_click = Some(Box::new(handler));
        self
    }

    pub fn on_hide(mut self, handler: impl FnOnce(&mut Screen) + 'static) -> Self {
        self.on_hide = Some(Box::new(handler));
        self
    }

    /// Adds a delete button to the panel header.
    pub fn on_delete(mut self, handler: impl FnOnce(&mut Screen) + 'static) -> Self {
        self.on_delete = Some(Box::new(handler));
        self
    }

    pub fn with_navigator(mut self, kind: NavigatorKind) -> Self {
        self.navigator = kind;
        self
    }
}

/// Callbacks a picker gives up when it closes
pub(crate) struct Released {
    pub on_hide: Option<HideHandler>,
    pub on_delete: Option<DeleteHandler>,
}

/// A modal panel of picker groups.
pub struct Picker {
    id: PickerId,
    xfrm: XfrmId,
    pending: Vec<GroupDef>,
    groups: Vec<PickerGroup>,
    prev_state: Option<CursorState>,
    delete_btn: Option<Button>,
    panel: Bounds,
    visible: bool,
    hide_on_click: bool,
    title: Option<Label>,
    /// Incremented on every successful open
    shows: u32,
    /// One-shot click accepted while a nested picker sits on top
    pub(crate) close_pending: bool,
    pub(crate) on_click: Option<ClickHandler>,
    on_hide: Option<HideHandler>,
    on_delete: Option<DeleteHandler>,
}

impl Picker {
    pub(crate) fn new(id: PickerId, xfrm: XfrmId) -> Self {
        Self {
            id,
            xfrm,
            pending: Vec::new(),
            groups: Vec::new(),
            prev_state: None,
            delete_btn: None,
            panel: Bounds::empty(),
            visible: false,
            hide_on_click: true,
            title: None,
            shows: 0,
            close_pending: false,
            on_click: None,
            on_hide: None,
            on_delete: None,
        }
    }

    pub fn id(&self) -> PickerId {
        self.id
    }

    pub fn xfrm(&self) -> XfrmId {
        self.xfrm
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn hide_on_click(&self) -> bool {
        self.hide_on_click
    }

    /// Number of times the picker has been opened
    pub fn show_count(&self) -> u32 {
        self.shows
    }

    pub fn close_pending(&self) -> bool {
        self.close_pending
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Panel bounds relative to the picker transform, including the border
    pub fn panel(&self) -> Bounds {
        self.panel
    }

    pub fn groups(&self) -> &[PickerGroup] {
        &self.groups
    }

    pub fn delete_button(&self) -> Option<&Button> {
        self.delete_btn.as_ref()
    }

    /// Group definitions waiting for the next show
    pub fn pending_groups(&self) -> &[GroupDef] {
        &self.pending
    }

    /// Cursor snapshot taken at show time, while visible
    pub fn saved_state(&self) -> Option<&CursorState> {
        self.prev_state.as_ref()
    }

    /// Number of live buttons owned by this picker
    pub fn live_buttons(&self) -> usize {
        let grouped: usize = self
            .groups
            .iter()
            .map(|g| g.buttons().iter().filter(|b| b.is_live()).count())
            .sum();
        grouped + self.delete_btn.iter().filter(|b| b.is_live()).count()
    }

    /// Queue a group for the next show. Groups are consumed by the show
    /// that builds them, so every show starts from the groups added since
    /// the previous one.
    pub fn add_group(&mut self, group: GroupDef) {
        self.pending.push(group);
    }

    /// Look up a live button by id, returning its action and a snapshot.
    pub fn find_button(&self, xfrms: &TransformArena, id: WidgetId) -> Option<(Action, PickedButton)> {
        let button: &Button = match &self.delete_btn {
            Some(delete) if delete.id() == id => delete,
            _ => self.groups.iter().find_map(|g| g.find(id)).map(|b| &**b)?,
        };
        let action = button.click()?;
        let position = xfrms.world_pos(button.xfrm()?).ok()?;
        Some((
            action,
            PickedButton {
                id,
                icon: bounded(button.icon()),
                label: button.label().map(bounded),
                position,
                bounds: button.bounds(),
            },
        ))
    }

    /// Hidden -> Visible. See the module docs for the sequence.
    ///
    /// Preconditions are checked before anything is mutated, so on error the
    /// picker and cursor are exactly as they were.
    pub(crate) fn open(
        &mut self,
        xfrms: &mut TransformArena,
        cursor: &mut Cursor,
        ids: &mut WidgetIdAllocator,
        opts: ShowOptions,
        hide_on_click: bool,
    ) -> ModalResult<()> {
        if self.visible {
            return Err(ModalError::AlreadyVisible(self.id));
        }
        let focusable = self.pending.iter().map(GroupDef::len).sum::<usize>()
            + usize::from(opts.on_delete.is_some());
        if focusable == 0 {
            return Err(ModalError::NothingToFocus);
        }
        if cursor.cancel_depth() >= MAX_MODAL_DEPTH {
            return Err(ModalError::TooDeep {
                max: MAX_MODAL_DEPTH,
            });
        }

        self.on_click = opts.on_click;
        self.on_hide = opts.on_hide;
        self.on_delete = opts.on_delete;
        self.hide_on_click = hide_on_click;
        self.title = opts.title;

        self.prev_state = Some(cursor.save_state());
        cursor.install_navigator(opts.navigator.build());
        cursor.push_cancel(Dismiss::Picker(self.id))?;

        if let Err(err) = self.build(xfrms, cursor, ids) {
            cursor.pop_cancel(Dismiss::Picker(self.id)).ok();
            drop(self.close(xfrms, cursor));
            return Err(err);
        }
        self.visible = true;
        self.close_pending = false;
        self.shows = self.shows.wrapping_add(1);
        debug!(
            "Picker {:?} shown: {} groups, depth {}",
            self.id,
            self.groups.len(),
            cursor.cancel_depth()
        );
        Ok(())
    }

    fn build(
        &mut self,
        xfrms: &mut TransformArena,
        cursor: &mut Cursor,
        ids: &mut WidgetIdAllocator,
    ) -> ModalResult<()> {
        if self.on_delete.is_some() {
            let spec = ButtonSpec::new(DELETE_ICON, Action::Delete)
                .with_parent(self.xfrm)
                .with_style(ButtonStyle::RedBorderedWhite)
                .with_label("delete");
            self.delete_btn = Some(Button::new(xfrms, ids.allocate(), spec)?);
        }

        for def in self.pending.drain(..) {
            let mut group = PickerGroup::new(xfrms, self.xfrm)?;
            for button in &def.buttons {
                group.push(PickerButton::new(xfrms, ids.allocate(), self.xfrm, button)?);
            }
            self.groups.push(group);
        }

        self.layout(xfrms, cursor)
    }

    /// Assemble the panel from scratch and focus the initial widget.
    fn layout(&mut self, xfrms: &mut TransformArena, cursor: &mut Cursor) -> ModalResult<()> {
        if let Some(delete) = self.delete_btn.as_ref().and_then(Button::focusable) {
            cursor.navigator_mut().add_buttons(xfrms, &[delete]);
        }

        self.panel = Bounds::empty();

        let mut top = PANEL_TOP_MARGIN_PX;
        if let Some(delete) = &self.delete_btn {
            top += delete.height() as i32;
        } else if self.title.is_some() {
            top += HEADER_HEIGHT_PX;
        }

        for (idx, group) in self.groups.iter_mut().enumerate() {
            group.layout(xfrms)?;
            if idx == 0 {
                top += group.buttons().first().map_or(0, |b| (b.height() >> 1) as i32);
            } else {
                top += GROUP_SPACING_PX;
            }
            if let Some(group_xfrm) = group.xfrm() {
                xfrms.set_local(group_xfrm, Point::new(0, top))?;
            }
            self.panel.add(group.bounds().translated(Point::new(0, top)));
            top += group.bounds().height() as i32;
            cursor.navigator_mut().add_buttons(xfrms, &group.focusables());
        }

        if let Some(delete) = &self.delete_btn
            && let Some(delete_xfrm) = delete.xfrm()
        {
            let x = self.panel.right - (delete.width() >> 1) as i32 + 1;
            let y = self.panel.top + (delete.height() >> 1) as i32;
            xfrms.set_local(delete_xfrm, Point::new(x, y))?;
        }

        self.panel.grow(PANEL_BORDER_PX);
        xfrms.set_local(
            self.xfrm,
            Point::new(
                -((self.panel.width() >> 1) as i32),
                -((self.panel.height() >> 1) as i32),
            ),
        )?;

        let first = cursor
            .navigator_mut()
            .initial_cursor(0, 0)
            .ok_or(ModalError::NothingToFocus)?;
        cursor.focus_widget(xfrms, &first);
        debug!("Picker {:?} laid out, panel {:?}", self.id, self.panel);
        Ok(())
    }

    /// Visible -> Hidden, without touching the dismiss stack.
    ///
    /// Restores the cursor snapshot, destroys every widget and hands back the
    /// callbacks that still have to run. The click handler is dropped.
    pub(crate) fn close(&mut self, xfrms: &mut TransformArena, cursor: &mut Cursor) -> Released {
        self.visible = false;
        self.close_pending = false;
        cursor.navigator_mut().clear();
        if let Some(prev) = self.prev_state.take() {
            let mut own = cursor.restore_state(prev);
            own.clear();
        }

        for group in &mut self.groups {
            group.destroy(xfrms);
        }
        self.groups.clear();
        if let Some(mut delete) = self.delete_btn.take() {
            delete.destroy(xfrms);
        }
        self.panel = Bounds::empty();
        self.on_click = None;
        debug!("Picker {:?} hidden, depth {}", self.id, cursor.cancel_depth());

        Released {
            on_hide: self.on_hide.take(),
            on_delete: self.on_delete.take(),
        }
    }

    /// Release the picker's own transform. The picker must be hidden.
    pub(crate) fn destroy(&mut self, xfrms: &mut TransformArena) {
        self.pending.clear();
        xfrms.release(self.xfrm);
    }

    pub fn draw<D: DrawTarget<Color = Rgb565>>(
        &self,
        xfrms: &TransformArena,
        display: &mut D,
        config: &UiConfig,
    ) -> Result<(), D::Error> {
        if !self.visible {
            return Ok(());
        }
        let Ok(origin) = xfrms.world_pos(self.xfrm) else {
            return Ok(());
        };

        surface::fill_bounds(display, origin, self.panel, config.panel_fill)?;
        surface::outline_bounds(display, origin, self.panel, 1, config.panel_border)?;
        if let Some(title) = &self.title {
            let at = origin + Point::new(self.panel.left + 2, self.panel.top + 4);
            surface::print(display, title, at, config.title_color, &FONT_6X10)?;
        }
        for group in &self.groups {
            group.draw(xfrms, display)?;
        }
        if let Some(delete) = &self.delete_btn {
            delete.draw(xfrms, display)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        xfrms: TransformArena,
        cursor: Cursor,
        ids: WidgetIdAllocator,
        picker: Picker,
    }

    fn fixture() -> Fixture {
        let mut xfrms = TransformArena::new();
        let root = xfrms.alloc(None).unwrap();
        let id = slotmap::SlotMap::<PickerId, ()>::with_key().insert(());
        let picker = Picker::new(id, xfrms.alloc(Some(root)).unwrap());
        Fixture {
            xfrms,
            cursor: Cursor::new(),
            ids: WidgetIdAllocator::default(),
            picker,
        }
    }

    fn flat(icon: &str) -> PickerButtonDef {
        PickerButtonDef::new(icon)
            .with_style(ButtonStyle::Flat)
            .with_size(10, 10)
    }

    fn open(f: &mut Fixture, opts: ShowOptions) -> ModalResult<()> {
        f.picker
            .open(&mut f.xfrms, &mut f.cursor, &mut f.ids, opts, true)
    }

    #[test]
    fn test_layout_single_group_no_header() {
        let mut f = fixture();
        f.picker
            .add_group(GroupDef::new().with_button(flat("a")).with_button(flat("b")));
        open(&mut f, ShowOptions::new()).unwrap();

        // top = 2 + 10/2 = 7; group bounds are (-5,-5)..(16,5)
        let group = &f.picker.groups()[0];
        assert_eq!(f.xfrms.local(group.xfrm().unwrap()).unwrap(), Point::new(0, 7));
        assert_eq!(
            f.picker.panel(),
            Bounds {
                left: -7,
                top: 0,
                right: 18,
                bottom: 14,
            }
        );
        // Centered: -(25/2), -(14/2)
        assert_eq!(f.xfrms.local(f.picker.xfrm()).unwrap(), Point::new(-12, -7));
    }

    #[test]
    fn test_title_reserves_header() {
        let mut f = fixture();
        f.picker.add_group(GroupDef::new().with_button(flat("a")));
        open(&mut f, ShowOptions::new().with_title("Pick")).unwrap();

        let group = &f.picker.groups()[0];
        assert_eq!(
            f.xfrms.local(group.xfrm().unwrap()).unwrap(),
            Point::new(0, PANEL_TOP_MARGIN_PX + HEADER_HEIGHT_PX + 5)
        );
        assert_eq!(f.picker.title(), Some("Pick"));
    }

    #[test]
    fn test_groups_are_stacked_with_spacing() {
        let mut f = fixture();
        f.picker.add_group(GroupDef::new().with_button(flat("a")));
        f.picker.add_group(GroupDef::new().with_button(flat("b")));
        open(&mut f, ShowOptions::new()).unwrap();

        let first = f.xfrms.local(f.picker.groups()[0].xfrm().unwrap()).unwrap();
        let second = f.xfrms.local(f.picker.groups()[1].xfrm().unwrap()).unwrap();
        assert_eq!(first.y, 7);
        assert_eq!(second.y, 7 + 10 + GROUP_SPACING_PX);
    }

    #[test]
    fn test_delete_button_is_focused_first_and_placed_top_right() {
        let mut f = fixture();
        f.picker.add_group(GroupDef::new().with_button(flat("a")));
        open(&mut f, ShowOptions::new().on_delete(|_| {})).unwrap();

        let delete = f.picker.delete_button().unwrap();
        assert_eq!(f.cursor.focus().map(|t| t.id), Some(delete.id()));
        assert_eq!(f.cursor.navigator().len(), 2);

        // Panel before growth is the single 10x10 button: top = 2 + 22 + 5.
        let local = f.xfrms.local(delete.xfrm().unwrap()).unwrap();
        assert_eq!(local, Point::new(5 - 11 + 1, 24 + 11));
    }

    #[test]
    fn test_show_without_buttons_is_rejected_untouched() {
        let mut f = fixture();
        f.picker.add_group(GroupDef::new());
        assert_eq!(open(&mut f, ShowOptions::new()), Err(ModalError::NothingToFocus));
        assert_eq!(f.cursor.cancel_depth(), 0);
        assert!(!f.picker.is_visible());
        assert_eq!(f.picker.pending_groups().len(), 1);
    }

    #[test]
    fn test_show_twice_is_rejected() {
        let mut f = fixture();
        f.picker.add_group(GroupDef::from_icons(&["a"]));
        open(&mut f, ShowOptions::new()).unwrap();
        f.picker.add_group(GroupDef::from_icons(&["b"]));
        assert_eq!(
            open(&mut f, ShowOptions::new()),
            Err(ModalError::AlreadyVisible(f.picker.id()))
        );
        assert_eq!(f.cursor.cancel_depth(), 1);
    }

    #[test]
    fn test_close_releases_all_widgets() {
        let mut f = fixture();
        let baseline = f.xfrms.live_count();
        f.picker.add_group(GroupDef::from_icons(&["a", "b", "c"]));
        open(&mut f, ShowOptions::new().on_delete(|_| {})).unwrap();
        assert_eq!(f.picker.live_buttons(), 4);

        f.cursor.pop_cancel(Dismiss::Picker(f.picker.id())).unwrap();
        let released = f.picker.close(&mut f.xfrms, &mut f.cursor);
        assert!(released.on_delete.is_some());
        assert_eq!(f.picker.live_buttons(), 0);
        assert!(f.picker.groups().is_empty());
        assert_eq!(f.xfrms.live_count(), baseline);
        assert!(f.cursor.focus().is_none());
        assert!(f.cursor.navigator().is_empty());
    }

    #[test]
    fn test_hidden_picker_draws_nothing() {
        let mut f = fixture();
        f.picker.add_group(GroupDef::new().with_button(flat("a")));
        open(&mut f, ShowOptions::new()).unwrap();
        f.cursor.pop_cancel(Dismiss::Picker(f.picker.id())).unwrap();
        drop(f.picker.close(&mut f.xfrms, &mut f.cursor));

        let mut display = embedded_graphics::mock_display::MockDisplay::<Rgb565>::new();
        f.picker
            .draw(&f.xfrms, &mut display, &UiConfig::default())
            .unwrap();
        assert_eq!(display, embedded_graphics::mock_display::MockDisplay::new());
    }

    #[test]
    fn test_find_button_reports_icon_and_action() {
        let mut f = fixture();
        f.picker
            .add_group(GroupDef::new().with_button(flat("a").with_label("Apple")));
        open(&mut f, ShowOptions::new()).unwrap();

        let id = f.picker.groups()[0].buttons()[0].id();
        let (action, picked) = f.picker.find_button(&f.xfrms, id).unwrap();
        assert_eq!(action, Action::Pick);
        assert_eq!(picked.icon.as_str(), "a");
        assert_eq!(picked.label.as_deref(), Some("Apple"));
        assert!(f.picker.find_button(&f.xfrms, WidgetId(999)).is_none());
    }
}
