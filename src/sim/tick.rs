//! Frame tick
//!
//! The host calls [`tick`] once per animation frame with the frame timestamp.
//! Commands in [`TickInput`] are applied first, then the countdown, race and
//! finish steps run for whichever phase the race is in.

use super::lights::LightStep;
use super::state::{RaceEvent, RaceOutcome, RacePhase, RaceState};

/// Commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pick a team (ignored while busy)
    pub select: Option<String>,
    /// Request the start sequence
    pub start: bool,
    /// Stop and clear the race
    pub reset: bool,
    /// Hide the result display
    pub dismiss_result: bool,
    /// New viewport width from the layout provider
    pub view_width: Option<f64>,
}

/// Advance the race to timestamp `now` (ms)
pub fn tick(state: &mut RaceState, input: &TickInput, now: f64) {
    // Reset first so nothing below touches a cancelled race
    if input.reset {
        state.reset();
    }
    if let Some(width) = input.view_width {
        state.set_view_width(width);
    }
    if let Some(id) = &input.select {
        state.select(id);
    }
    if input.dismiss_result {
        state.dismiss_result();
    }
    if input.start {
        state.start_sequence(now);
    }

    if state.phase == RacePhase::Countdown {
        loop {
            match state.lights.advance(now) {
                LightStep::Hold => break,
                LightStep::Lit(lit) => {
                    log::debug!("Start light {}", lit);
                    state.events.push(RaceEvent::Lights { lit });
                }
                LightStep::Go => {
                    state.events.push(RaceEvent::Lights { lit: 0 });
                    state.launch(now);
                    break;
                }
            }
        }
    }

    match state.phase {
        RacePhase::Racing => state.advance_race(now),
        RacePhase::Finished => state.advance_finish(now),
        RacePhase::Idle | RacePhase::Countdown => {}
    }
}

/// Drive a selected race headlessly from `start_at` with a fixed frame interval until
/// the celebration fires. Each frame's events are handed to `on_frame`.
///
/// Returns `None` when the start request was ignored or the race overran its bound.
pub fn run_to_completion<F>(
    state: &mut RaceState,
    start_at: f64,
    frame_ms: f64,
    mut on_frame: F,
) -> Option<RaceOutcome>
where
    F: FnMut(&RaceState, &[RaceEvent]),
{
    let frame_ms = frame_ms.max(1.0);
    let start = TickInput {
        start: true,
        ..Default::default()
    };
    tick(state, &start, start_at);
    let events = state.drain_events();
    on_frame(state, &events);
    if state.phase != RacePhase::Countdown {
        return None;
    }

    // Longest possible lane plus countdown and settle, with slack for frame quantization
    let settings = &state.settings;
    let pacing = settings.pacing();
    let slowest = pacing.slow_range().1.max(pacing.fast_duration());
    let deadline = state.lights.go_time(start_at)
        + slowest
        + settings.settle_delay_ms
        + frame_ms * 4.0;

    let idle = TickInput::default();
    let mut now = start_at;
    while now <= deadline {
        now += frame_ms;
        tick(state, &idle, now);
        let events = state.drain_events();
        on_frame(state, &events);
        if events
            .iter()
            .any(|e| matches!(e, RaceEvent::Celebrate { .. }))
        {
            return state.outcome();
        }
    }

    log::warn!("Race did not finish by {:.0}ms", deadline);
    None
}
