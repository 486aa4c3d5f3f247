//! Button styles
//!
//! A [`ButtonStyle`] is an immutable, named look. Widgets store the variant
//! and resolve it to a concrete [`ButtonLook`] when measuring or drawing, so
//! styles can be passed around by value and serialized in palette files.

use serde::{Deserialize, Serialize};

use super::colors::{BLACK, BLUE, ColorIndex, LIGHT_PURPLE, PURPLE, RED, TRANSPARENT, WHITE};

// ============================================================================
// Button Styles
// ============================================================================

/// Predefined button styles.
///
/// # Examples
///
/// ```ignore
/// let look = ButtonStyle::RedBorderedWhite.look();
/// assert_eq!(look.border, Some((RED, 1)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ButtonStyle {
    /// White face with a drop shadow. Default for picker buttons.
    #[default]
    LightShadowedWhite,

    /// White face with a red border, used for destructive actions.
    RedBorderedWhite,

    /// Purple face with a light border.
    BorderedPurple,

    /// No padding, no border, no fill. The button is exactly its icon box.
    Flat,
}

/// Concrete drawing parameters of a [`ButtonStyle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonLook {
    /// Face color ([`TRANSPARENT`] = not filled)
    pub fill: ColorIndex,

    /// Border color and thickness
    pub border: Option<(ColorIndex, u32)>,

    /// Shadow color drawn one pixel below the face
    pub shadow: Option<ColorIndex>,

    /// Icon glyph color
    pub foreground: ColorIndex,

    /// Space between the icon box and the border, on every side
    pub padding: u32,
}

impl ButtonStyle {
    pub const fn look(&self) -> ButtonLook {
        match self {
            ButtonStyle::LightShadowedWhite => ButtonLook {
                fill: WHITE,
                border: None,
                shadow: Some(BLUE),
                foreground: BLACK,
                padding: 2,
            },
            ButtonStyle::RedBorderedWhite => ButtonLook {
                fill: WHITE,
                border: Some((RED, 1)),
                shadow: None,
                foreground: RED,
                padding: 2,
            },
            ButtonStyle::BorderedPurple => ButtonLook {
                fill: PURPLE,
                border: Some((LIGHT_PURPLE, 1)),
                shadow: None,
                foreground: WHITE,
                padding: 2,
            },
            ButtonStyle::Flat => ButtonLook {
                fill: TRANSPARENT,
                border: None,
                shadow: None,
                foreground: WHITE,
                padding: 0,
            },
        }
    }
}

impl ButtonLook {
    /// Total extra size added around the icon box on each axis.
    pub const fn chrome(&self) -> u32 {
        let border = match self.border {
            Some((_, width)) => width,
            None => 0,
        };
        2 * (self.padding + border)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_has_no_chrome() {
        assert_eq!(ButtonStyle::Flat.look().chrome(), 0);
    }

    #[test]
    fn test_bordered_chrome_counts_border() {
        assert_eq!(ButtonStyle::RedBorderedWhite.look().chrome(), 6);
        assert_eq!(ButtonStyle::LightShadowedWhite.look().chrome(), 4);
    }
}
