//! One race attempt on one track: the vehicle, its lap tracker and the race clock.

use std::{sync::Arc, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{
    FINISH_HOLD_TICKS,
    collision::{CollisionSettings, types::Mat4},
    error::TrackResult,
    lap::LapState,
    observer::{NoopObserver, ResetReason, TickObserver},
    track::{Track, TrackInfo},
    vehicle::{CarRig, CarSpec, DriveInput, DriveSettings, Vehicle},
};

/// Everything a host may override at runtime, loadable from data.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimSettings {
    pub collision: CollisionSettings,
    pub drive: DriveSettings,
    /// Ticks between lap completion and [`RacePhase::Finished`].
    pub finish_hold_ticks: u32,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            collision: CollisionSettings::default(),
            drive: DriveSettings::default(),
            finish_hold_ticks: FINISH_HOLD_TICKS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RacePhase {
    Racing,
    /// The lap is done and the clock has stopped; the car keeps driving for a while.
    LapComplete { lap_time: Duration },
    /// The hold after completion has elapsed. The host should leave the race.
    Finished { lap_time: Duration },
}

impl RacePhase {
    pub fn lap_time(&self) -> Option<Duration> {
        match *self {
            Self::Racing => None,
            Self::LapComplete { lap_time } | Self::Finished { lap_time } => Some(lap_time),
        }
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Finished { .. })
    }
}

pub struct RaceSession {
    track: Arc<Track>,
    info: TrackInfo,
    world: Mat4,
    vehicle: Vehicle,
    lap: LapState,
    clock: Duration,
    hold_ticks: u32,
    finish_hold_ticks: u32,
    phase: RacePhase,
}

impl RaceSession {
    /// Start a race on `track`.
    ///
    /// Fails if `info` names a finish segment the track does not have.
    pub fn new(
        track: Arc<Track>,
        info: TrackInfo,
        car: CarSpec,
        rig: CarRig,
        settings: SimSettings,
    ) -> TrackResult<Self> {
        track.validate_info(&info)?;

        let vehicle = Vehicle::new(
            car,
            rig,
            settings.drive,
            settings.collision,
            info.start_position,
        );
        let lap = LapState::new(&track, info.finish_segment.clone());

        log::info!(
            "race session on {} with {}, {} segments",
            info.name,
            vehicle.spec().name,
            track.segments().len()
        );

        Ok(Self {
            track,
            info,
            world: Mat4::identity(),
            vehicle,
            lap,
            clock: Duration::ZERO,
            hold_ticks: 0,
            finish_hold_ticks: settings.finish_hold_ticks,
            phase: RacePhase::Racing,
        })
    }

    /// Parent transform applied to the chassis.
    pub fn set_world(&mut self, world: Mat4) {
        self.world = world;
    }

    /// Advance one tick without observation.
    pub fn tick(&mut self, dt: Duration, input: DriveInput) -> RacePhase {
        self.tick_observed(dt, input, &mut NoopObserver)
    }

    /// Advance one tick.
    ///
    /// The clock runs until the lap completes. After that the car keeps driving and the
    /// session counts hold ticks until it reports [`RacePhase::Finished`], at which point
    /// further ticks are ignored.
    pub fn tick_observed(
        &mut self,
        dt: Duration,
        input: DriveInput,
        observer: &mut dyn TickObserver,
    ) -> RacePhase {
        if self.phase.is_finished() {
            return self.phase;
        }

        if self.phase == RacePhase::Racing {
            self.clock += dt;
        }

        self.vehicle.set_input(input);
        self.vehicle
            .update(dt, &self.world, &self.track, &mut self.lap, observer);

        match self.phase {
            RacePhase::Racing => {
                if self.lap.lap_done() {
                    log::info!("lap complete on {} in {:?}", self.info.name, self.clock);
                    observer.on_lap_complete(self.clock);
                    self.phase = RacePhase::LapComplete {
                        lap_time: self.clock,
                    };
                }
            }
            RacePhase::LapComplete { lap_time } => {
                self.hold_ticks += 1;
                if self.hold_ticks > self.finish_hold_ticks {
                    log::debug!("race finished after {} hold ticks", self.hold_ticks);
                    self.phase = RacePhase::Finished { lap_time };
                }
            }
            RacePhase::Finished { .. } => {}
        }

        self.phase
    }

    /// Put the car back on the start with a fresh lap and clock.
    pub fn restart(&mut self) {
        self.restart_observed(&mut NoopObserver);
    }

    pub fn restart_observed(&mut self, observer: &mut dyn TickObserver) {
        self.vehicle.reset();
        self.lap.reset();
        self.clock = Duration::ZERO;
        self.hold_ticks = 0;
        self.phase = RacePhase::Racing;
        observer.on_reset(ResetReason::Restart);
    }

    #[inline]
    pub fn phase(&self) -> RacePhase {
        self.phase
    }

    /// Race time so far, frozen once the lap completes.
    #[inline]
    pub fn clock(&self) -> Duration {
        self.clock
    }

    #[inline]
    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    #[inline]
    pub fn lap(&self) -> &LapState {
        &self.lap
    }

    #[inline]
    pub fn track(&self) -> &Arc<Track> {
        &self.track
    }

    #[inline]
    pub fn info(&self) -> &TrackInfo {
        &self.info
    }
}
