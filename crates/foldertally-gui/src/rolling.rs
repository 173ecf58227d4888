/// Rolling total — the animated number shown in the middle of the window.
///
/// While a scan streams snapshots the displayed value chases the latest
/// streamed total a fraction of the gap per frame, so the digits visibly
/// roll instead of jumping. Once the true total is known the display hands
/// over to a core [`Settle`] sequence, and when that ends a short colour
/// flash marks completion.
///
/// Nothing here feeds back into the scan; the true total always comes from
/// the scanner's `ScanResult`.
use foldertally_core::scanner::{CancellationToken, Settle};

/// Fraction of the remaining gap closed per frame while streaming.
const CHASE_DIVISOR: u64 = 4;

/// Flash intensity lost per frame.
const FLASH_DECAY: f32 = 0.04;

#[derive(Debug, Default)]
pub struct RollingTotal {
    displayed: u64,
    target: u64,
    settle: Option<Settle>,
    settle_cancel: Option<CancellationToken>,
    flash: f32,
}

impl RollingTotal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value to draw this frame.
    pub fn displayed(&self) -> u64 {
        self.displayed
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    /// Completion flash strength in `0.0..=1.0`.
    pub fn flash(&self) -> f32 {
        self.flash
    }

    pub fn is_settling(&self) -> bool {
        self.settle.is_some()
    }

    /// Forget everything and show zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Chase a newly streamed running total.
    pub fn chase(&mut self, target: u64) {
        if self.settle.is_none() {
            self.target = target;
        }
    }

    /// Jump straight to `value` with no animation.
    pub fn snap(&mut self, value: u64) {
        self.settle = None;
        self.settle_cancel = None;
        self.displayed = value;
        self.target = value;
    }

    /// Start converging on the final `total` over `steps` frames.
    pub fn begin_settle(&mut self, total: u64, steps: u32) {
        let token = CancellationToken::new();
        self.settle = Some(Settle::new(self.displayed, total, steps).with_cancellation(token.clone()));
        self.settle_cancel = Some(token);
        self.target = total;
    }

    /// Cut the settle sequence short; the next frame shows the true total.
    pub fn cancel_settle(&self) {
        if let Some(token) = &self.settle_cancel {
            token.cancel();
        }
    }

    /// Advance one frame. Returns `true` while anything is still moving.
    pub fn step(&mut self) -> bool {
        if let Some(settle) = self.settle.as_mut() {
            match settle.next() {
                Some(value) => self.displayed = value,
                None => {
                    self.settle = None;
                    self.settle_cancel = None;
                    self.displayed = self.target;
                    self.flash = 1.0;
                }
            }
            return true;
        }

        if self.displayed != self.target {
            self.displayed = chase_step(self.displayed, self.target);
        }

        if self.flash > 0.0 {
            self.flash = (self.flash - FLASH_DECAY).max(0.0);
        }

        self.displayed != self.target || self.flash > 0.0
    }
}

fn chase_step(from: u64, to: u64) -> u64 {
    if to > from {
        from + ((to - from) / CHASE_DIVISOR).max(1)
    } else {
        from - ((from - to) / CHASE_DIVISOR).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_until_still(rolling: &mut RollingTotal) -> usize {
        let mut frames = 0;
        while rolling.step() {
            frames += 1;
            assert!(frames < 10_000, "animation never came to rest");
        }
        frames
    }

    #[test]
    fn test_chase_reaches_target_monotonically() {
        let mut rolling = RollingTotal::new();
        rolling.chase(1_000);
        let mut last = 0;
        while rolling.displayed() != 1_000 {
            rolling.step();
            assert!(rolling.displayed() >= last);
            last = rolling.displayed();
        }
    }

    #[test]
    fn test_settle_lands_on_total_then_flashes() {
        let mut rolling = RollingTotal::new();
        rolling.snap(400);
        rolling.begin_settle(1_000, 8);
        assert!(rolling.is_settling());

        for _ in 0..8 {
            rolling.step();
        }
        assert_eq!(rolling.displayed(), 1_000);

        rolling.step();
        assert!(!rolling.is_settling());
        assert_eq!(rolling.flash(), 1.0);

        run_until_still(&mut rolling);
        assert_eq!(rolling.flash(), 0.0);
        assert_eq!(rolling.displayed(), 1_000);
    }

    #[test]
    fn test_cancelled_settle_shows_true_total() {
        let mut rolling = RollingTotal::new();
        rolling.begin_settle(987_654, 500);
        rolling.step();
        assert!(rolling.displayed() < 987_654);

        rolling.cancel_settle();
        rolling.step();
        assert_eq!(rolling.displayed(), 987_654);
    }

    #[test]
    fn test_stream_updates_ignored_while_settling() {
        let mut rolling = RollingTotal::new();
        rolling.begin_settle(50, 3);
        rolling.chase(10);
        assert_eq!(rolling.target(), 50);
    }
}
