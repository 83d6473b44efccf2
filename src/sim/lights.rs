//! Start light sequence
//!
//! OFF -> 1 -> 2 -> ... -> N -> GO. The first light comes on immediately when the
//! sequence begins; each further step waits one interval. GO clears the lights.

use serde::{Deserialize, Serialize};

/// Result of advancing the sequence by at most one step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightStep {
    /// Nothing due yet (or sequence idle)
    Hold,
    /// A light came on; total lit count
    Lit(u8),
    /// Lights cleared, race starts
    Go,
}

/// Countdown light state machine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartLights {
    count: u8,
    interval_ms: f64,
    lit: u8,
    /// Timestamp of the next step while active
    next_step_at: Option<f64>,
}

impl StartLights {
    pub fn new(count: u8, interval_ms: f64) -> Self {
        Self {
            count: count.max(1),
            interval_ms,
            lit: 0,
            next_step_at: None,
        }
    }

    /// Lights currently on (0 = off)
    #[inline]
    pub fn lit(&self) -> u8 {
        self.lit
    }

    /// Whether a countdown is running
    #[inline]
    pub fn is_active(&self) -> bool {
        self.next_step_at.is_some()
    }

    /// Start the sequence at `now`, lighting the first light.
    /// Refused (returns false) while a countdown is already running.
    pub fn begin(&mut self, now: f64) -> bool {
        if self.is_active() {
            return false;
        }
        self.lit = 1;
        self.next_step_at = Some(now + self.interval_ms);
        true
    }

    /// Advance at most one step. Call repeatedly until `Hold` to catch up
    /// after a long frame.
    pub fn advance(&mut self, now: f64) -> LightStep {
        let Some(due) = self.next_step_at else {
            return LightStep::Hold;
        };
        if now < due {
            return LightStep::Hold;
        }

        if self.lit >= self.count {
            self.lit = 0;
            self.next_step_at = None;
            return LightStep::Go;
        }

        self.lit += 1;
        self.next_step_at = Some(due + self.interval_ms);
        LightStep::Lit(self.lit)
    }

    /// Stop any running countdown and switch the lights off
    pub fn cancel(&mut self) {
        self.lit = 0;
        self.next_step_at = None;
    }

    /// Time of the GO step if the sequence runs uninterrupted from `began_at`
    pub fn go_time(&self, began_at: f64) -> f64 {
        began_at + self.count as f64 * self.interval_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(lights: &mut StartLights, now: f64) -> Vec<LightStep> {
        let mut steps = Vec::new();
        loop {
            match lights.advance(now) {
                LightStep::Hold => break,
                step => steps.push(step),
            }
        }
        steps
    }

    #[test]
    fn test_full_sequence() {
        let mut lights = StartLights::new(5, 650.0);
        assert_eq!(lights.lit(), 0);
        assert!(lights.begin(0.0));
        assert_eq!(lights.lit(), 1);

        let mut max_lit = lights.lit();
        let mut go_count = 0;
        let mut now = 0.0;
        while now < 5000.0 {
            now += 16.0;
            for step in drain(&mut lights, now) {
                match step {
                    LightStep::Lit(n) => max_lit = max_lit.max(n),
                    LightStep::Go => go_count += 1,
                    LightStep::Hold => unreachable!(),
                }
            }
        }

        assert_eq!(max_lit, 5);
        assert_eq!(go_count, 1);
        assert_eq!(lights.lit(), 0);
        assert!(!lights.is_active());
    }

    #[test]
    fn test_step_timing() {
        let mut lights = StartLights::new(5, 650.0);
        lights.begin(1000.0);
        assert_eq!(lights.advance(1649.0), LightStep::Hold);
        assert_eq!(lights.advance(1650.0), LightStep::Lit(2));
        assert_eq!(lights.advance(1650.0), LightStep::Hold);
        assert_eq!(lights.go_time(1000.0), 4250.0);
    }

    #[test]
    fn test_catch_up_after_hitch() {
        let mut lights = StartLights::new(5, 650.0);
        lights.begin(0.0);
        let steps = drain(&mut lights, 10_000.0);
        assert_eq!(
            steps,
            vec![
                LightStep::Lit(2),
                LightStep::Lit(3),
                LightStep::Lit(4),
                LightStep::Lit(5),
                LightStep::Go
            ]
        );
    }

    #[test]
    fn test_begin_refused_while_active() {
        let mut lights = StartLights::new(5, 650.0);
        assert!(lights.begin(0.0));
        lights.advance(650.0);
        assert!(!lights.begin(700.0));
        assert_eq!(lights.lit(), 2);
    }

    #[test]
    fn test_cancel() {
        let mut lights = StartLights::new(5, 650.0);
        lights.begin(0.0);
        lights.advance(1300.0);
        lights.cancel();
        assert_eq!(lights.lit(), 0);
        assert_eq!(lights.advance(99_999.0), LightStep::Hold);
        assert!(lights.begin(2000.0));
    }
}
