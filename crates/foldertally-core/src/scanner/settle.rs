/// Cosmetic settle sequence for rolling-digit displays.
///
/// Given the last total a display showed and the true, already-final total,
/// [`Settle`] yields values that ease out towards the true total. It is pure
/// presentation: the true total is fixed before the sequence starts and is
/// always the last value yielded, whether the sequence runs to the end or is
/// cut short by cancellation.
use crate::scanner::CancellationToken;

#[derive(Debug, Clone)]
pub struct Settle {
    from: u64,
    to: u64,
    steps: u32,
    step: u32,
    cancel: Option<CancellationToken>,
    done: bool,
}

impl Settle {
    /// A sequence of `steps` values (at least one) from `from` to `to`.
    pub fn new(from: u64, to: u64, steps: u32) -> Self {
        Self {
            from,
            to,
            steps: steps.max(1),
            step: 0,
            cancel: None,
            done: false,
        }
    }

    /// Jump straight to the true total once `token` is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// The true total this sequence converges on.
    pub fn target(&self) -> u64 {
        self.to
    }

    /// Feed every remaining value to `f` and return the true total.
    pub fn run_to_end(self, mut f: impl FnMut(u64)) -> u64 {
        let target = self.to;
        for value in self {
            f(value);
        }
        target
    }

    /// Quadratic ease-out: `from + (to - from) * (1 - (1 - k/n)^2)`.
    fn eased(&self, k: u32) -> u64 {
        let n = u128::from(self.steps);
        let k = u128::from(k);
        let weight = k * (2 * n - k);
        let denom = n * n;
        if self.to >= self.from {
            let offset = u128::from(self.to - self.from) * weight / denom;
            self.from + offset as u64
        } else {
            let offset = u128::from(self.from - self.to) * weight / denom;
            self.from - offset as u64
        }
    }
}

impl Iterator for Settle {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.done {
            return None;
        }
        self.step += 1;

        let cancelled = self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled);
        if cancelled || self.step >= self.steps {
            self.done = true;
            return Some(self.to);
        }
        Some(self.eased(self.step))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ends_exactly_on_target() {
        let values: Vec<u64> = Settle::new(1_000, 123_457, 10).collect();
        assert_eq!(values.len(), 10);
        assert_eq!(*values.last().unwrap(), 123_457);
    }

    #[test]
    fn test_rising_sequence_is_monotonic() {
        let values: Vec<u64> = Settle::new(0, 9_999, 16).collect();
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
        assert!(values[0] > 0);
    }

    #[test]
    fn test_falling_sequence_is_monotonic() {
        let values: Vec<u64> = Settle::new(500, 100, 5).collect();
        assert!(values.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(*values.last().unwrap(), 100);
    }

    #[test]
    fn test_single_step_and_zero_steps() {
        assert_eq!(Settle::new(3, 7, 1).collect::<Vec<_>>(), vec![7]);
        assert_eq!(Settle::new(3, 7, 0).collect::<Vec<_>>(), vec![7]);
    }

    #[test]
    fn test_cancel_jumps_to_target() {
        let token = CancellationToken::new();
        let mut settle = Settle::new(0, 1_000, 50).with_cancellation(token.clone());
        let first = settle.next().unwrap();
        assert!(first < 1_000);

        token.cancel();
        assert_eq!(settle.next(), Some(1_000));
        assert_eq!(settle.next(), None);
    }

    #[test]
    fn test_run_to_end_returns_target() {
        let mut seen = Vec::new();
        let total = Settle::new(10, 20, 4).run_to_end(|v| seen.push(v));
        assert_eq!(total, 20);
        assert_eq!(seen.last(), Some(&20));
    }

    #[test]
    fn test_huge_values_do_not_overflow() {
        let last = Settle::new(0, u64::MAX, 7).last();
        assert_eq!(last, Some(u64::MAX));
    }
}
