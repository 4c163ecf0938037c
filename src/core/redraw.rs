//! Redraw mask: which UI elements changed across a transition.
//!
//! The mask layout is bit-exact for all consumers: one bit per button for
//! cursor moves within a page, all sixteen bits set for a page change.

use super::types::{ButtonId, Position};

bitflags::bitflags! {
    /// Bitmask telling a renderer what to repaint.
    ///
    /// Combine with bitwise OR; `bits()` is the `u16` wire value.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct RedrawMask: u16 {
        /// Nothing changed.
        const NONE = 0;
        /// Page changed: repaint everything.
        const FULL = u16::MAX;
    }
}

impl RedrawMask {
    /// Mask with exactly one button's bit set.
    ///
    /// Button ids are bounded by `Limits::max_buttons` (at most 16), so the
    /// shift cannot overflow for ids the engine accepts.
    pub fn button(button: ButtonId) -> Self {
        debug_assert!(button < 16);
        Self::from_bits_retain(1u16 << button)
    }
}

/// Minimal redraw for a state change from `old` to `new`.
///
/// Page changed: full redraw. Button changed on the same page: exactly the
/// old and new button bits, so a renderer deselects the old glyph and
/// selects the new one. No change: empty mask.
///
/// # Example
///
/// ```rust
/// use pageflow::{redraw_mask, Position, RedrawMask};
///
/// let moved = redraw_mask(Position::new(0, 1), Position::new(0, 4));
/// assert_eq!(moved, RedrawMask::button(1) | RedrawMask::button(4));
///
/// let paged = redraw_mask(Position::new(0, 1), Position::new(2, 0));
/// assert_eq!(paged, RedrawMask::FULL);
/// ```
pub fn redraw_mask(old: Position, new: Position) -> RedrawMask {
    if old.page != new.page {
        RedrawMask::FULL
    } else if old.button != new.button {
        RedrawMask::button(old.button) | RedrawMask::button(new.button)
    } else {
        RedrawMask::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_change_is_a_full_redraw() {
        let mask = redraw_mask(Position::new(0, 3), Position::new(1, 3));
        assert_eq!(mask, RedrawMask::FULL);
        assert_eq!(mask.bits(), u16::MAX);
    }

    #[test]
    fn button_change_sets_exactly_two_bits() {
        let mask = redraw_mask(Position::new(2, 0), Position::new(2, 5));
        assert_eq!(mask.bits().count_ones(), 2);
        assert!(mask.contains(RedrawMask::button(0)));
        assert!(mask.contains(RedrawMask::button(5)));
    }

    #[test]
    fn no_change_is_an_empty_mask() {
        let mask = redraw_mask(Position::new(7, 7), Position::new(7, 7));
        assert!(mask.is_empty());
        assert_eq!(mask.bits(), 0);
    }

    #[test]
    fn button_mask_places_the_expected_bit() {
        for button in 0..16u16 {
            assert_eq!(RedrawMask::button(button).bits(), 1 << button);
        }
    }

    #[test]
    fn page_change_wins_over_button_change() {
        let mask = redraw_mask(Position::new(0, 0), Position::new(1, 1));
        assert_eq!(mask, RedrawMask::FULL);
    }
}
