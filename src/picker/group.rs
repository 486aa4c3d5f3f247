//! Grid layout of picker buttons.

extern crate alloc;

use alloc::vec::Vec;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use crate::error::TransformResult;
use crate::geometry::Bounds;
use crate::transform::{TransformArena, XfrmId};
use crate::ui::components::button::{PickerButton, WidgetId};
use crate::ui::navigator::Focusable;

/// Maximum number of buttons per grid row
pub const MAX_PER_ROW: usize = 5;

/// An ordered set of buttons laid out in rows of at most [`MAX_PER_ROW`].
///
/// Every cell has the same size: the union of all buttons' bounds, so the
/// largest button sets the pitch. Columns are separated by one pixel.
#[derive(Debug)]
pub struct PickerGroup {
    xfrm: Option<XfrmId>,
    buttons: Vec<PickerButton>,
    bounds: Bounds,
}

impl PickerGroup {
    /// Create an empty group whose transform hangs off the picker's.
    pub fn new(xfrms: &mut TransformArena, picker_xfrm: XfrmId) -> TransformResult<Self> {
        Ok(Self {
            xfrm: Some(xfrms.alloc(Some(picker_xfrm))?),
            buttons: Vec::new(),
            bounds: Bounds::empty(),
        })
    }

    pub fn xfrm(&self) -> Option<XfrmId> {
        self.xfrm
    }

    pub fn buttons(&self) -> &[PickerButton] {
        &self.buttons
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn push(&mut self, button: PickerButton) {
        self.buttons.push(button);
    }

    pub fn find(&self, id: WidgetId) -> Option<&PickerButton> {
        self.buttons.iter().find(|b| b.id() == id)
    }

    /// Focus targets for every live button, in layout order.
    pub fn focusables(&self) -> Vec<Focusable> {
        self.buttons.iter().filter_map(|b| b.focusable()).collect()
    }

    /// Place every button on the grid and recompute the group bounds.
    ///
    /// The result depends only on the buttons' sizes and order, so running it
    /// twice is harmless. A group without buttons gets empty bounds.
    pub fn layout(&mut self, xfrms: &mut TransformArena) -> TransformResult<()> {
        let Some(group_xfrm) = self.xfrm else {
            return Ok(());
        };

        let mut cell = Bounds::empty();
        for button in &self.buttons {
            cell.add(button.bounds());
        }
        let cell_width = cell.width() as i32;
        let cell_height = cell.height() as i32;

        self.bounds = Bounds::empty();
        for (idx, button) in self.buttons.iter().enumerate() {
            let Some(xfrm) = button.xfrm() else {
                continue;
            };
            let row = (idx / MAX_PER_ROW) as i32;
            let col = (idx % MAX_PER_ROW) as i32;
            let local = Point::new(col * cell_width + col, row * cell_height);

            xfrms.set_parent(xfrm, Some(group_xfrm))?;
            xfrms.set_local(xfrm, local)?;
            self.bounds.add(button.bounds().translated(local));
        }
        Ok(())
    }

    pub fn draw<D: DrawTarget<Color = Rgb565>>(
        &self,
        xfrms: &TransformArena,
        display: &mut D,
    ) -> Result<(), D::Error> {
        for button in &self.buttons {
            button.draw(xfrms, display)?;
        }
        Ok(())
    }

    /// Destroy every button and release the group's own transform.
    pub fn destroy(&mut self, xfrms: &mut TransformArena) {
        for button in &mut self.buttons {
            button.destroy(xfrms);
        }
        self.buttons.clear();
        if let Some(xfrm) = self.xfrm.take() {
            xfrms.release(xfrm);
        }
        self.bounds = Bounds::empty();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picker::defs::PickerButtonDef;
    use crate::ui::styling::ButtonStyle;

    fn group_of(xfrms: &mut TransformArena, sizes: &[(u32, u32)]) -> PickerGroup {
        let picker = xfrms.alloc(None).unwrap();
        let mut group = PickerGroup::new(xfrms, picker).unwrap();
        for (i, &(w, h)) in sizes.iter().enumerate() {
            let def = PickerButtonDef::new("i")
                .with_style(ButtonStyle::Flat)
                .with_size(w, h);
            group.push(PickerButton::new(xfrms, WidgetId(i as u32), picker, &def).unwrap());
        }
        group
    }

    fn local_of(xfrms: &TransformArena, group: &PickerGroup, idx: usize) -> Point {
        xfrms.local(group.buttons()[idx].xfrm().unwrap()).unwrap()
    }

    #[test]
    fn test_grid_places_sixth_button_on_second_row() {
        let mut xfrms = TransformArena::new();
        let mut group = group_of(&mut xfrms, &[(10, 10); 7]);
        group.layout(&mut xfrms).unwrap();

        assert_eq!(local_of(&xfrms, &group, 5), Point::new(0, 10));
        assert_eq!(local_of(&xfrms, &group, 1), Point::new(11, 0));
        assert_eq!(local_of(&xfrms, &group, 4), Point::new(44, 0));
        assert_eq!(
            group.bounds(),
            Bounds {
                left: -5,
                top: -5,
                right: 49,
                bottom: 15,
            }
        );
    }

    #[test]
    fn test_cell_is_sized_by_largest_button() {
        let mut xfrms = TransformArena::new();
        let mut group = group_of(&mut xfrms, &[(10, 10), (20, 6), (4, 4)]);
        group.layout(&mut xfrms).unwrap();

        // Union of centered 10x10 and 20x6 is 20 wide, 10 tall.
        assert_eq!(local_of(&xfrms, &group, 1), Point::new(21, 0));
        assert_eq!(local_of(&xfrms, &group, 2), Point::new(42, 0));
    }

    #[test]
    fn test_layout_is_idempotent() {
        let mut xfrms = TransformArena::new();
        let mut group = group_of(&mut xfrms, &[(10, 10), (12, 8), (6, 6), (10, 10), (9, 9), (7, 7)]);
        group.layout(&mut xfrms).unwrap();
        let bounds = group.bounds();
        let positions: Vec<Point> = (0..6).map(|i| local_of(&xfrms, &group, i)).collect();

        group.layout(&mut xfrms).unwrap();
        assert_eq!(group.bounds(), bounds);
        let again: Vec<Point> = (0..6).map(|i| local_of(&xfrms, &group, i)).collect();
        assert_eq!(again, positions);
    }

    #[test]
    fn test_buttons_are_reparented_to_group() {
        let mut xfrms = TransformArena::new();
        let mut group = group_of(&mut xfrms, &[(10, 10)]);
        group.layout(&mut xfrms).unwrap();
        let button = group.buttons()[0].xfrm().unwrap();
        assert_eq!(xfrms.parent(button).unwrap(), group.xfrm());
    }

    #[test]
    fn test_empty_group_has_empty_bounds() {
        let mut xfrms = TransformArena::new();
        let mut group = group_of(&mut xfrms, &[]);
        group.layout(&mut xfrms).unwrap();
        assert!(group.bounds().is_empty());
        assert!(group.focusables().is_empty());
    }

    #[test]
    fn test_destroy_releases_everything() {
        let mut xfrms = TransformArena::new();
        let mut group = group_of(&mut xfrms, &[(10, 10); 3]);
        group.layout(&mut xfrms).unwrap();
        assert_eq!(xfrms.live_count(), 5);

        group.destroy(&mut xfrms);
        assert_eq!(xfrms.live_count(), 1);
        assert!(group.buttons().is_empty());
        assert!(group.xfrm().is_none());
        assert!(group.bounds().is_empty());
    }
}
