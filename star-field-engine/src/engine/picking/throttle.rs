use bevy::prelude::*;

/// Rate limit for pointer-move picking.
///
/// Moves inside the interval only replace the pending cursor position; the
/// latest one is picked once the interval has elapsed since the last pick.
#[derive(Resource, Debug, Clone)]
pub struct PickThrottle {
    interval: f32,
    pending: Option<Vec2>,
    last_pick: Option<f32>,
}

impl PickThrottle {
    pub fn new(interval_secs: f32) -> Self {
        Self {
            interval: interval_secs.max(0.0),
            pending: None,
            last_pick: None,
        }
    }

    pub fn record_move(&mut self, cursor: Vec2) {
        self.pending = Some(cursor);
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The cursor to pick at `now`, if one is due.
    pub fn poll(&mut self, now: f32) -> Option<Vec2> {
        let due = self
            .last_pick
            .is_none_or(|last| now - last >= self.interval);
        if !due {
            return None;
        }
        let cursor = self.pending.take()?;
        self.last_pick = Some(now);
        Some(cursor)
    }

    pub fn reset(&mut self) {
        self.pending = None;
        self.last_pick = None;
    }
}

impl Default for PickThrottle {
    fn default() -> Self {
        Self::new(constants::render_settings::PICK_DEBOUNCE_SECS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_move_picks_immediately() {
        let mut throttle = PickThrottle::new(0.05);
        throttle.record_move(Vec2::new(1.0, 2.0));
        assert_eq!(throttle.poll(10.0), Some(Vec2::new(1.0, 2.0)));
        assert_eq!(throttle.poll(10.0), None);
    }

    #[test]
    fn moves_inside_the_interval_coalesce_to_the_latest() {
        let mut throttle = PickThrottle::new(0.05);
        throttle.record_move(Vec2::ZERO);
        throttle.poll(1.0);

        throttle.record_move(Vec2::new(5.0, 5.0));
        assert_eq!(throttle.poll(1.01), None);
        throttle.record_move(Vec2::new(6.0, 6.0));
        assert_eq!(throttle.poll(1.03), None);
        assert!(throttle.has_pending());
        assert_eq!(throttle.poll(1.06), Some(Vec2::new(6.0, 6.0)));
        assert!(!throttle.has_pending());
    }
}
