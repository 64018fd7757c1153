//! Round countdown

/// Result of one countdown tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    /// Seconds left after this tick
    Running(u32),
    /// Reached zero on this tick
    Expired,
    /// Already expired; nothing to do
    Stopped,
}

/// Whole-second countdown that reports expiry exactly once per reset
#[derive(Debug, Clone)]
pub struct RoundTimer {
    length: u32,
    remaining: u32,
    expired: bool,
}

impl RoundTimer {
    pub fn new(length: u32) -> Self {
        Self {
            length,
            remaining: length,
            expired: false,
        }
    }

    pub fn reset(&mut self) {
        self.remaining = self.length;
        self.expired = false;
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn tick(&mut self) -> Countdown {
        if self.expired {
            return Countdown::Stopped;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.expired = true;
            Countdown::Expired
        } else {
            Countdown::Running(self.remaining)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expires_on_thirtieth_tick() {
        let mut timer = RoundTimer::new(30);
        for expected in (1..30).rev() {
            assert_eq!(timer.tick(), Countdown::Running(expected));
        }
        assert_eq!(timer.tick(), Countdown::Expired);
        assert_eq!(timer.remaining(), 0);
        assert_eq!(timer.tick(), Countdown::Stopped);
        assert_eq!(timer.tick(), Countdown::Stopped);
    }

    #[test]
    fn test_reset_rearms() {
        let mut timer = RoundTimer::new(2);
        timer.tick();
        assert_eq!(timer.tick(), Countdown::Expired);

        timer.reset();
        assert_eq!(timer.remaining(), 2);
        assert_eq!(timer.tick(), Countdown::Running(1));
    }
}
