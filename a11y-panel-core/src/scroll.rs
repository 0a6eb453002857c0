//! Scroll position hint for the panel's options list.

/// Distance from the end that still counts as scrolled to the bottom.
const BOTTOM_SLACK_PX: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollZone {
    Top,
    Middle,
    Bottom,
}

impl ScrollZone {
    pub const ALL: [Self; 3] = [Self::Top, Self::Middle, Self::Bottom];

    #[must_use]
    pub fn classify(scroll_top: f64, scroll_height: f64, client_height: f64) -> Self {
        if scroll_top <= 0.0 {
            Self::Top
        } else if scroll_top + client_height >= scroll_height - BOTTOM_SLACK_PX {
            Self::Bottom
        } else {
            Self::Middle
        }
    }

    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::Top => "scroll-top",
            Self::Middle => "scroll-middle",
            Self::Bottom => "scroll-bottom",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_edges_and_middle() {
        assert_eq!(ScrollZone::classify(0.0, 800.0, 300.0), ScrollZone::Top);
        assert_eq!(ScrollZone::classify(200.0, 800.0, 300.0), ScrollZone::Middle);
        assert_eq!(ScrollZone::classify(496.0, 800.0, 300.0), ScrollZone::Bottom);
        assert_eq!(ScrollZone::classify(500.0, 800.0, 300.0), ScrollZone::Bottom);
    }

    #[test]
    fn short_list_is_at_top() {
        assert_eq!(ScrollZone::classify(0.0, 100.0, 300.0), ScrollZone::Top);
    }
}
