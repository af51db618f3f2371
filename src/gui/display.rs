use crate::app::TimerView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Glyph {
    Digit(u8),
    Colon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct GlyphSlot {
    pub(crate) glyph: Glyph,
    pub(crate) visible: bool,
}

/// Lays out `hh:mm:ss` left to right. Hidden slots still occupy their space.
pub(crate) fn layout(view: &TimerView) -> [GlyphSlot; 8] {
    let [h1, h2, m1, m2, s1, s2] = view.digits.as_array();

    let digit = |v: u8| GlyphSlot {
        glyph: Glyph::Digit(v),
        visible: view.digits_visible,
    };
    let colon = GlyphSlot {
        glyph: Glyph::Colon,
        visible: view.colon_visible,
    };

    [
        digit(h1),
        digit(h2),
        colon,
        digit(m1),
        digit(m2),
        colon,
        digit(s1),
        digit(s2),
    ]
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::app::{Digits, RunState};

    fn view(elapsed: u64, colon_visible: bool, digits_visible: bool) -> TimerView {
        TimerView {
            digits: Digits::from_elapsed(elapsed),
            run_state: RunState::Running,
            colon_visible,
            digits_visible,
        }
    }

    #[test]
    fn slots_in_display_order() {
        let slots = layout(&view(3600 + 23 * 60 + 45, true, true));
        let glyphs: Vec<Glyph> = slots.iter().map(|s| s.glyph).collect();
        assert_eq!(
            glyphs,
            vec![
                Glyph::Digit(0),
                Glyph::Digit(1),
                Glyph::Colon,
                Glyph::Digit(2),
                Glyph::Digit(3),
                Glyph::Colon,
                Glyph::Digit(4),
                Glyph::Digit(5),
            ]
        );
        assert!(slots.iter().all(|s| s.visible));
    }

    #[test]
    fn hidden_colon_keeps_digits() {
        let slots = layout(&view(0, false, true));
        for slot in slots {
            match slot.glyph {
                Glyph::Colon => assert!(!slot.visible),
                Glyph::Digit(_) => assert!(slot.visible),
            }
        }
    }

    #[test]
    fn whole_display_hidden() {
        let slots = layout(&view(0, false, false));
        assert!(slots.iter().all(|s| !s.visible));
    }
}
