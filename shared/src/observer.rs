//! Optional per-tick observability hook.
//!
//! The simulation calls into a [`TickObserver`] at a few well-defined points. Every method
//! has an empty default body, so an observer only implements what it cares about.

use std::time::Duration;

use crate::{collision::ContactResolution, vehicle::WheelSlot};

/// Why the vehicle was put back at the start.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResetReason {
    /// The chassis dropped below the fall threshold.
    FellOffTrack,
    /// The host restarted the race.
    Restart,
}

pub trait TickObserver {
    /// Called once per wheel per tick after contact resolution, in wheel index order.
    fn on_wheel_contact(
        &mut self,
        _wheel: WheelSlot,
        _contact: Option<f32>,
        _resolution: ContactResolution,
    ) {
    }

    /// Called after the vehicle and lap state were reset.
    fn on_reset(&mut self, _reason: ResetReason) {}

    /// Called once, on the tick the lap completes.
    fn on_lap_complete(&mut self, _lap_time: Duration) {}
}

/// Observer that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl TickObserver for NoopObserver {}

/// Observer that remembers what it was told. Handy for hosts that poll after a tick.
#[derive(Clone, Debug, Default)]
pub struct RecordingObserver {
    pub contacts: Vec<(WheelSlot, Option<f32>, ContactResolution)>,
    pub resets: Vec<ResetReason>,
    pub laps: Vec<Duration>,
}

impl RecordingObserver {
    pub fn clear(&mut self) {
        self.contacts.clear();
        self.resets.clear();
        self.laps.clear();
    }
}

impl TickObserver for RecordingObserver {
    fn on_wheel_contact(
        &mut self,
        wheel: WheelSlot,
        contact: Option<f32>,
        resolution: ContactResolution,
    ) {
        self.contacts.push((wheel, contact, resolution));
    }

    fn on_reset(&mut self, reason: ResetReason) {
        self.resets.push(reason);
    }

    fn on_lap_complete(&mut self, lap_time: Duration) {
        self.laps.push(lap_time);
    }
}
