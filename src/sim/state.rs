//! Race state and core simulation types
//!
//! Everything the race clock mutates lives here. Positions are recomputed each frame
//! from the active [`RaceRun`]; they are never the source of truth.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::camera::{CameraTransform, Viewport, follow_offset};
use super::lights::StartLights;
use super::pacing::{assign_durations, pick_fastest};
use super::progress::sample_lane;
use super::roster::{Team, lane_of};
use crate::consts::DEFAULT_VIEW_WIDTH;
use crate::settings::{Settings, SettingsError};

/// Race lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RacePhase {
    /// Waiting for a start request
    Idle,
    /// Start lights running
    Countdown,
    /// Cars moving
    Racing,
    /// Winner decided; celebration may still be pending
    Finished,
}

/// Immutable per-race pacing, created at GO
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceRun {
    /// Timestamp of GO (ms)
    pub started_at: f64,
    /// Total completion time per lane (ms)
    pub durations: Vec<f64>,
    /// Designated fastest lane
    pub fastest: usize,
    /// Lane the camera follows
    pub followed: usize,
    /// Player's pick at GO
    pub backed: Option<usize>,
}

impl RaceRun {
    /// Elapsed race time at `now`, never negative
    #[inline]
    pub fn elapsed(&self, now: f64) -> f64 {
        (now - self.started_at).max(0.0)
    }
}

/// Notifications for the host, drained once per frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RaceEvent {
    /// Start lights changed (0 = off)
    Lights { lit: u8 },
    /// GO: race run created
    Started { fastest: usize, followed: usize },
    /// First lane crossed the line
    Finished { winner: usize },
    /// Settle delay elapsed; trigger the celebratory effect now
    Celebrate { winner: usize },
    /// Race state cleared
    Reset,
}

/// Winner details for the result display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceOutcome {
    pub winner_id: String,
    pub winner_name: String,
    pub link: String,
    /// The player's pick won
    pub player_won: bool,
}

/// Per-lane view for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaneSnapshot {
    pub id: String,
    pub position: f64,
    pub progress: f64,
    pub finished: bool,
}

/// Compact state for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceSnapshot {
    pub phase: RacePhase,
    pub lights: u8,
    pub racing: bool,
    pub selected: Option<String>,
    pub lanes: Vec<LaneSnapshot>,
    pub camera: CameraTransform,
    pub finish_glow: bool,
    pub winner: Option<String>,
    /// Present once the celebration fired and until dismissed
    pub outcome: Option<RaceOutcome>,
}

/// Complete race state
#[derive(Debug, Clone)]
pub struct RaceState {
    /// Tuning
    pub settings: Settings,
    /// Lanes, in track order
    pub roster: Vec<Team>,
    /// Seed the pacing RNG was created from
    pub seed: u64,
    rng: Pcg32,
    /// Current phase
    pub phase: RacePhase,
    /// Player's pick (team id)
    pub selected: Option<String>,
    /// Start lights
    pub lights: StartLights,
    /// Last reported viewport width
    pub view_width: f64,
    /// Geometry captured at GO
    pub viewport: Viewport,
    /// Active or last completed run
    pub run: Option<RaceRun>,
    /// Rendered position per lane
    pub positions: Vec<f64>,
    /// Linear progress per lane
    pub progress: Vec<f64>,
    /// Camera output
    pub camera: CameraTransform,
    /// Finish strip glow
    pub finish_glow: bool,
    /// Winning lane
    pub winner: Option<usize>,
    /// Timestamp of the finishing frame
    pub finished_at: Option<f64>,
    /// Celebration already fired for this run
    pub celebrated: bool,
    /// Result display visible
    pub result_visible: bool,
    /// Pending host notifications
    pub events: Vec<RaceEvent>,
}

impl RaceState {
    /// Create an idle race for `roster` with pacing seeded from `seed`.
    /// Fails when `settings` break the invariants pacing and progress rely on.
    pub fn new(settings: Settings, roster: Vec<Team>, seed: u64) -> Result<Self, SettingsError> {
        settings.validate()?;
        let lanes = roster.len();
        let lights = StartLights::new(settings.light_count, settings.light_interval_ms);
        let viewport = Viewport::from_layout(
            DEFAULT_VIEW_WIDTH,
            settings.track_length,
            settings.content_padding,
        );
        let camera = CameraTransform {
            offset: 0.0,
            transition_ms: settings.camera_transition_ms,
        };

        Ok(Self {
            settings,
            roster,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: RacePhase::Idle,
            selected: None,
            lights,
            view_width: DEFAULT_VIEW_WIDTH,
            viewport,
            run: None,
            positions: vec![0.0; lanes],
            progress: vec![0.0; lanes],
            camera,
            finish_glow: false,
            winner: None,
            finished_at: None,
            celebrated: false,
            result_visible: false,
            events: Vec::new(),
        })
    }

    /// Whether a countdown or race is in progress
    #[inline]
    pub fn is_busy(&self) -> bool {
        matches!(self.phase, RacePhase::Countdown | RacePhase::Racing)
    }

    /// Select the player's team. Ignored while busy or for unknown ids.
    pub fn select(&mut self, id: &str) -> bool {
        if self.is_busy() {
            log::debug!("Selection of {} ignored: race in progress", id);
            return false;
        }
        if lane_of(&self.roster, id).is_none() {
            log::debug!("Selection of unknown team {} ignored", id);
            return false;
        }
        self.selected = Some(id.to_string());
        true
    }

    /// Record the host viewport width; used at the next GO
    pub fn set_view_width(&mut self, view_width: f64) {
        self.view_width = view_width;
    }

    /// Begin the start light sequence at `now`.
    /// No-op without a selection or while a countdown/race is running.
    pub fn start_sequence(&mut self, now: f64) -> bool {
        if self.is_busy() {
            log::debug!("Start ignored: {:?} in progress", self.phase);
            return false;
        }
        if self.selected_lane().is_none() {
            log::debug!("Start ignored: no team selected");
            return false;
        }
        if !self.lights.begin(now) {
            return false;
        }

        self.clear_run();
        self.phase = RacePhase::Countdown;
        self.events.push(RaceEvent::Lights {
            lit: self.lights.lit(),
        });
        log::info!("Start lights on");
        true
    }

    /// GO: create the race run and capture layout
    pub(crate) fn launch(&mut self, now: f64) {
        let lanes = self.roster.len();
        let fastest = pick_fastest(lanes, &mut self.rng);
        let durations = assign_durations(lanes, fastest, &self.settings.pacing(), &mut self.rng);
        let backed = self.selected_lane();
        let followed = backed.unwrap_or(fastest);

        self.viewport = Viewport::from_layout(
            self.view_width,
            self.settings.track_length,
            self.settings.content_padding,
        );
        self.run = Some(RaceRun {
            started_at: now,
            durations,
            fastest,
            followed,
            backed,
        });
        self.phase = RacePhase::Racing;
        self.events.push(RaceEvent::Started { fastest, followed });
        log::info!(
            "Race started: fastest lane {} ({}), following lane {}",
            fastest,
            self.roster[fastest].name,
            followed
        );
    }

    /// One animation frame while racing. Stray frames in any other phase are ignored.
    pub(crate) fn advance_race(&mut self, now: f64) {
        if self.phase != RacePhase::Racing {
            return;
        }
        let Some(run) = self.run.as_ref() else {
            return;
        };

        let elapsed = run.elapsed(now);
        let drivable = self.settings.drivable_length();
        let mut finished = None;

        for (lane, &duration) in run.durations.iter().enumerate() {
            let sample = sample_lane(elapsed, duration, lane, drivable);
            if let Some(pos) = self.positions.get_mut(lane) {
                *pos = sample.position;
            }
            if let Some(progress) = self.progress.get_mut(lane) {
                *progress = sample.linear;
            }
            if finished.is_none() && sample.finished {
                finished = Some(lane);
            }
        }

        // Camera stays put when the followed lane cannot be resolved
        if let Some(&car_x) = self.positions.get(run.followed) {
            self.camera.offset = follow_offset(car_x, self.settings.camera_lead, &self.viewport);
        }

        let fastest_progress = (elapsed / run.durations[run.fastest]).min(1.0);
        self.finish_glow = fastest_progress > self.settings.finish_glow_threshold;

        if let Some(winner) = finished {
            self.phase = RacePhase::Finished;
            self.winner = Some(winner);
            self.finished_at = Some(now);
            self.events.push(RaceEvent::Finished { winner });
            log::info!(
                "{} wins after {:.0}ms",
                self.roster[winner].name,
                elapsed
            );
        }
    }

    /// Fire the celebration once the settle delay has passed
    pub(crate) fn advance_finish(&mut self, now: f64) {
        if self.phase != RacePhase::Finished || self.celebrated {
            return;
        }
        let (Some(winner), Some(finished_at)) = (self.winner, self.finished_at) else {
            return;
        };
        if now - finished_at < self.settings.settle_delay_ms {
            return;
        }

        self.celebrated = true;
        self.result_visible = true;
        self.events.push(RaceEvent::Celebrate { winner });
        log::info!("Celebrating {}", self.roster[winner].name);
    }

    /// Stop everything and return all cars to the start
    pub fn reset(&mut self) {
        self.lights.cancel();
        self.clear_run();
        self.phase = RacePhase::Idle;
        self.events.push(RaceEvent::Reset);
        log::info!("Race reset");
    }

    /// Hide the result display without touching the race
    pub fn dismiss_result(&mut self) {
        self.result_visible = false;
    }

    fn clear_run(&mut self) {
        self.run = None;
        self.winner = None;
        self.finished_at = None;
        self.celebrated = false;
        self.result_visible = false;
        self.finish_glow = false;
        self.camera.offset = 0.0;
        self.positions.iter_mut().for_each(|p| *p = 0.0);
        self.progress.iter_mut().for_each(|p| *p = 0.0);
    }

    /// Lane of the selected team
    pub fn selected_lane(&self) -> Option<usize> {
        self.selected
            .as_deref()
            .and_then(|id| lane_of(&self.roster, id))
    }

    /// Winner details, once the celebration fired and while visible
    pub fn outcome(&self) -> Option<RaceOutcome> {
        if !self.result_visible {
            return None;
        }
        let winner = self.winner?;
        let team = self.roster.get(winner)?;
        let backed = self.run.as_ref().and_then(|run| run.backed);
        Some(RaceOutcome {
            winner_id: team.id.clone(),
            winner_name: team.name.clone(),
            link: team.link.clone(),
            player_won: backed == Some(winner),
        })
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<RaceEvent> {
        std::mem::take(&mut self.events)
    }

    /// Presentation snapshot
    pub fn snapshot(&self) -> RaceSnapshot {
        RaceSnapshot {
            phase: self.phase,
            lights: self.lights.lit(),
            racing: self.phase == RacePhase::Racing,
            selected: self.selected.clone(),
            lanes: self
                .roster
                .iter()
                .enumerate()
                .map(|(lane, team)| LaneSnapshot {
                    id: team.id.clone(),
                    position: self.positions[lane],
                    progress: self.progress[lane],
                    finished: self.progress[lane] >= 1.0,
                })
                .collect(),
            camera: self.camera,
            finish_glow: self.finish_glow,
            winner: self.winner.map(|w| self.roster[w].id.clone()),
            outcome: self.outcome(),
        }
    }
}
