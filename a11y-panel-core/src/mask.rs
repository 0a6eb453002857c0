//! Reading-mask controller: a horizontal band that follows the pointer.

/// Vertical offset between the pointer and the top of the mask window.
pub const POINTER_OFFSET_PX: i32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskTransition {
    /// Start tracking the pointer.
    Attach,
    /// Stop tracking and restore the cursor.
    Detach,
    Unchanged,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReadingMask {
    active: bool,
}

impl ReadingMask {
    #[must_use]
    pub const fn is_active(self) -> bool {
        self.active
    }

    pub const fn set_enabled(&mut self, enabled: bool) -> MaskTransition {
        let transition = match (self.active, enabled) {
            (false, true) => MaskTransition::Attach,
            (true, false) => MaskTransition::Detach,
            _ => MaskTransition::Unchanged,
        };
        self.active = enabled;
        transition
    }

    /// `background-position` for the overlay given the pointer's viewport y.
    #[must_use]
    pub fn position_for(client_y: i32) -> String {
        format!("0px {}px", client_y.saturating_sub(POINTER_OFFSET_PX))
    }
}
