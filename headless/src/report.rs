use std::time::Duration;

use shared::{
    RaceSession, ResetReason, TickObserver, WheelSlot, collision::ContactResolution,
};
use tracing::{debug, info, trace};

/// Logs session events and counts what happened for the final summary.
#[derive(Default)]
pub struct LogObserver {
    grounded_contacts: u64,
    airborne_contacts: u64,
    resets: u32,
    lap_time: Option<Duration>,
}

impl TickObserver for LogObserver {
    fn on_wheel_contact(
        &mut self,
        wheel: WheelSlot,
        contact: Option<f32>,
        resolution: ContactResolution,
    ) {
        if resolution.is_grounded() {
            self.grounded_contacts += 1;
        } else {
            self.airborne_contacts += 1;
        }
        trace!(wheel = wheel.name(), ?contact, ?resolution, "wheel contact");
    }

    fn on_reset(&mut self, reason: ResetReason) {
        self.resets += 1;
        info!(?reason, "vehicle reset");
    }

    fn on_lap_complete(&mut self, lap_time: Duration) {
        self.lap_time = Some(lap_time);
        info!(?lap_time, "lap complete");
    }
}

impl LogObserver {
    pub fn summary(&self, session: &RaceSession, ticks: u32) {
        let vehicle = session.vehicle();
        let lap = session.lap();
        info!(
            ticks,
            position = ?vehicle.position(),
            facing = ?vehicle.facing(),
            speed = vehicle.speed(),
            "final state"
        );
        info!(
            visited = lap.visited_count(),
            segments = lap.segment_count(),
            last = ?lap.last_overlapped().map(|s| s.as_str()),
            phase = ?session.phase(),
            race_time = ?session.clock(),
            "lap status"
        );
        debug!(
            grounded = self.grounded_contacts,
            airborne = self.airborne_contacts,
            resets = self.resets,
            lap_time = ?self.lap_time,
            "contact totals"
        );
    }
}
