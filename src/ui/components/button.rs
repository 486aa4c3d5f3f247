// src/ui/components/button.rs
//! Icon buttons

use core::ops::Deref;

use embedded_graphics::mono_font::ascii::FONT_4X6;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use crate::error::TransformResult;
use crate::geometry::{Bounds, Vec2};
use crate::picker::defs::PickerButtonDef;
use crate::transform::{TransformArena, XfrmId};
use crate::ui::navigator::Focusable;
use crate::ui::styling::ButtonStyle;
use crate::ui::surface;

/// Maximum length of an icon identifier
pub const ICON_ID_LEN: usize = 16;

/// Maximum length of a label or title
pub const LABEL_LEN: usize = 32;

/// Icon box size used when a definition does not give one
pub const ICON_SIZE_PX: u32 = 16;

/// Largest icon box side; bigger requests are clamped
pub const MAX_ICON_SIZE_PX: u32 = 256;

pub type IconId = heapless::String<ICON_ID_LEN>;
pub type Label = heapless::String<LABEL_LEN>;

/// Copy as much of `text` as fits into a fixed-capacity string.
pub fn bounded<const N: usize>(text: &str) -> heapless::String<N> {
    let mut out = heapless::String::new();
    for ch in text.chars() {
        if out.push(ch).is_err() {
            break;
        }
    }
    out
}

/// Screen-unique widget identity, used for focus tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(pub u32);

/// Hands out increasing [`WidgetId`]s; ids are never reused.
#[derive(Debug, Default)]
pub struct WidgetIdAllocator {
    next: u32,
}

impl WidgetIdAllocator {
    pub fn allocate(&mut self) -> WidgetId {
        let id = WidgetId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// What a button asks its owner to do when clicked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Report the button's icon to the owning picker
    Pick,
    /// The owning picker's delete action
    Delete,
    /// Application-defined action
    Custom(u16),
}

/// Construction parameters for a [`Button`].
#[derive(Debug, Clone, Copy)]
pub struct ButtonSpec<'a> {
    pub parent: Option<XfrmId>,
    pub style: ButtonStyle,
    pub icon: &'a str,
    pub label: Option<&'a str>,
    pub icon_size: Size,
    pub position: Vec2,
    pub action: Action,
}

impl<'a> ButtonSpec<'a> {
    pub fn new(icon: &'a str, action: Action) -> Self {
        Self {
            parent: None,
            style: ButtonStyle::default(),
            icon,
            label: None,
            icon_size: Size::new(ICON_SIZE_PX, ICON_SIZE_PX),
            position: Point::zero(),
            action,
        }
    }

    pub fn with_parent(mut self, parent: XfrmId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_style(mut self, style: ButtonStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_label(mut self, label: &'a str) -> Self {
        self.label = Some(label);
        self
    }

    pub fn with_icon_size(mut self, size: Size) -> Self {
        self.icon_size = size;
        self
    }

    pub fn at(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }
}

/// Icon button owned by exactly one container.
///
/// The button's bounds are centered on its transform origin and cover the
/// icon box plus the style's padding and border. Clicking does not run any
/// code: [`Button::click`] hands back the [`Action`] and the owner decides
/// what it means.
///
/// After [`Button::destroy`] the button is inert: it draws nothing, returns
/// no action, and offers no focus target.
#[derive(Debug)]
pub struct Button {
    id: WidgetId,
    xfrm: Option<XfrmId>,
    bounds: Bounds,
    icon: IconId,
    label: Option<Label>,
    style: ButtonStyle,
    action: Option<Action>,
}

impl Button {
    /// Create a button, allocating its transform node in `xfrms`.
    pub fn new(
        xfrms: &mut TransformArena,
        id: WidgetId,
        spec: ButtonSpec<'_>,
    ) -> TransformResult<Self> {
        let xfrm = xfrms.alloc(spec.parent)?;
        xfrms.set_local(xfrm, spec.position)?;

        let chrome = spec.style.look().chrome();
        let size = Size::new(
            spec.icon_size.width.min(MAX_ICON_SIZE_PX).saturating_add(chrome),
            spec.icon_size.height.min(MAX_ICON_SIZE_PX).saturating_add(chrome),
        );

        Ok(Self {
            id,
            xfrm: Some(xfrm),
            bounds: Bounds::centered(size),
            icon: bounded(spec.icon),
            label: spec.label.map(bounded),
            style: spec.style,
            action: Some(spec.action),
        })
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// Transform handle, `None` once destroyed
    pub fn xfrm(&self) -> Option<XfrmId> {
        self.xfrm
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn width(&self) -> u32 {
        self.bounds.width()
    }

    pub fn height(&self) -> u32 {
        self.bounds.height()
    }

    pub fn icon(&self) -> &str {
        &self.icon
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn style(&self) -> ButtonStyle {
        self.style
    }

    /// Accessible name: the label, or the icon id when there is none
    pub fn aria(&self) -> &str {
        self.label().unwrap_or(&self.icon)
    }

    pub fn is_live(&self) -> bool {
        self.xfrm.is_some()
    }

    /// The action this button triggers, or `None` once destroyed
    pub fn click(&self) -> Option<Action> {
        self.action
    }

    /// Focus target for a navigator, or `None` once destroyed
    pub fn focusable(&self) -> Option<Focusable> {
        let xfrm = self.xfrm?;
        Some(Focusable {
            id: self.id,
            xfrm,
            bounds: self.bounds,
            aria: bounded(self.aria()),
        })
    }

    /// Release the transform node and detach the action.
    pub fn destroy(&mut self, xfrms: &mut TransformArena) {
        if let Some(xfrm) = self.xfrm.take() {
            xfrms.release(xfrm);
        }
        self.action = None;
    }

    pub fn draw<D: DrawTarget<Color = Rgb565>>(
        &self,
        xfrms: &TransformArena,
        display: &mut D,
    ) -> Result<(), D::Error> {
        let Some(origin) = self.xfrm.and_then(|xfrm| xfrms.world_pos(xfrm).ok()) else {
            return Ok(());
        };
        let look = self.style.look();

        if let Some(shadow) = look.shadow {
            surface::fill_bounds(display, origin + Point::new(0, 1), self.bounds, shadow)?;
        }
        surface::fill_bounds(display, origin, self.bounds, look.fill)?;
        if let Some((color, width)) = look.border {
            surface::outline_bounds(display, origin, self.bounds, width, color)?;
        }

        // Icon art is resolved outside this crate; the glyph is the icon id.
        let glyph_width = FONT_4X6.character_size.width * self.icon.chars().count() as u32;
        let glyph_height = FONT_4X6.character_size.height;
        let glyph_origin = origin
            + Point::new(
                -((glyph_width >> 1) as i32),
                -((glyph_height >> 1) as i32),
            );
        surface::print(display, &self.icon, glyph_origin, look.foreground, &FONT_4X6)
    }
}

/// A [`Button`] that reports its icon to the owning picker when clicked.
#[derive(Debug)]
pub struct PickerButton {
    button: Button,
}

impl PickerButton {
    pub fn new(
        xfrms: &mut TransformArena,
        id: WidgetId,
        picker_xfrm: XfrmId,
        def: &PickerButtonDef,
    ) -> TransformResult<Self> {
        let mut spec = ButtonSpec::new(&def.icon, Action::Pick)
            .with_parent(picker_xfrm)
            .with_style(def.style.unwrap_or_default());
        if let Some(label) = def.label.as_deref() {
            spec = spec.with_label(label);
        }
        if let Some((width, height)) = def.size {
            spec = spec.with_icon_size(Size::new(width, height));
        }
        Ok(Self {
            button: Button::new(xfrms, id, spec)?,
        })
    }

    pub fn destroy(&mut self, xfrms: &mut TransformArena) {
        self.button.destroy(xfrms);
    }
}

impl Deref for PickerButton {
    type Target = Button;

    fn deref(&self) -> &Button {
        &self.button
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::styling::colors::{WHITE, indexed};
    use embedded_graphics::mock_display::MockDisplay;

    fn flat_spec(icon: &str) -> ButtonSpec<'_> {
        ButtonSpec::new(icon, Action::Custom(7))
            .with_style(ButtonStyle::Flat)
            .with_icon_size(Size::new(10, 10))
    }

    #[test]
    fn test_size_includes_style_chrome() {
        let mut xfrms = TransformArena::new();
        let flat = Button::new(&mut xfrms, WidgetId(1), flat_spec("a")).unwrap();
        assert_eq!((flat.width(), flat.height()), (10, 10));

        let bordered = Button::new(
            &mut xfrms,
            WidgetId(2),
            ButtonSpec::new("b", Action::Delete).with_style(ButtonStyle::RedBorderedWhite),
        )
        .unwrap();
        assert_eq!((bordered.width(), bordered.height()), (22, 22));
        assert_eq!(bordered.bounds().left, -11);
    }

    #[test]
    fn test_oversized_icon_is_clamped() {
        let mut xfrms = TransformArena::new();
        let huge = Button::new(
            &mut xfrms,
            WidgetId(1),
            flat_spec("big").with_icon_size(Size::new(u32::MAX, 12)),
        )
        .unwrap();
        assert_eq!((huge.width(), huge.height()), (MAX_ICON_SIZE_PX, 12));
        assert_eq!(huge.bounds().left, -((MAX_ICON_SIZE_PX >> 1) as i32));
    }

    #[test]
    fn test_aria_prefers_label() {
        let mut xfrms = TransformArena::new();
        let plain = Button::new(&mut xfrms, WidgetId(1), flat_spec("dot")).unwrap();
        let labelled =
            Button::new(&mut xfrms, WidgetId(2), flat_spec("dot").with_label("Dot")).unwrap();
        assert_eq!(plain.aria(), "dot");
        assert_eq!(labelled.aria(), "Dot");
    }

    #[test]
    fn test_destroy_makes_button_inert() {
        let mut xfrms = TransformArena::new();
        let mut button = Button::new(&mut xfrms, WidgetId(1), flat_spec("x")).unwrap();
        assert_eq!(button.click(), Some(Action::Custom(7)));
        assert_eq!(xfrms.live_count(), 1);

        button.destroy(&mut xfrms);
        assert!(!button.is_live());
        assert_eq!(button.click(), None);
        assert!(button.focusable().is_none());
        assert_eq!(xfrms.live_count(), 0);

        let mut display = MockDisplay::<Rgb565>::new();
        button.draw(&xfrms, &mut display).unwrap();
        assert_eq!(display, MockDisplay::new());
    }

    #[test]
    fn test_draw_fills_face_at_world_position() {
        let mut xfrms = TransformArena::new();
        let root = xfrms.alloc(None).unwrap();
        xfrms.set_local(root, Point::new(20, 20)).unwrap();
        let button = Button::new(
            &mut xfrms,
            WidgetId(1),
            ButtonSpec::new("", Action::Pick)
                .with_parent(root)
                .with_style(ButtonStyle::RedBorderedWhite)
                .at(Point::new(5, 0)),
        )
        .unwrap();

        let mut display = MockDisplay::<Rgb565>::new();
        display.set_allow_overdraw(true);
        button.draw(&xfrms, &mut display).unwrap();

        assert_eq!(display.get_pixel(Point::new(25, 20)), Some(indexed(WHITE)));
        assert_eq!(
            display.affected_area(),
            button.bounds().to_rectangle(Point::new(25, 20))
        );
    }

    #[test]
    fn test_bounded_truncates() {
        let text: heapless::String<4> = bounded("abcdef");
        assert_eq!(text.as_str(), "abcd");
    }
}
