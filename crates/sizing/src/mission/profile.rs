//! Mission profiles: the ordered flight-phase schedule consumed by the simulator.

use dep_core::units::{kts_to_fps, nm_to_ft};
use dep_propulsion::Phase;

/// One flight-phase entry of a mission profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightSegment {
    pub phase: Phase,
    pub duration_sec: f64,
    pub highlift_active: bool,
    pub cruise_active: bool,
    /// Filled in by the simulator; zero until the segment has been simulated.
    pub power_draw_kw: f64,
}

impl FlightSegment {
    /// Segment whose motor activation follows the fixed phase policy.
    pub fn new(phase: Phase, duration_sec: f64) -> Self {
        Self {
            phase,
            duration_sec,
            highlift_active: phase.highlift_active(),
            cruise_active: phase.cruise_active(),
            power_draw_kw: 0.0,
        }
    }
}

/// Ordered sequence of flight segments; insertion order is flight order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MissionProfile {
    segments: Vec<FlightSegment>,
}

impl MissionProfile {
    pub fn new(segments: Vec<FlightSegment>) -> Self {
        Self { segments }
    }

    /// Build a profile from `(phase, duration)` pairs.
    pub fn from_schedule(schedule: &[(Phase, f64)]) -> Self {
        schedule
            .iter()
            .map(|&(phase, duration)| FlightSegment::new(phase, duration))
            .collect()
    }

    pub fn push(&mut self, segment: FlightSegment) {
        self.segments.push(segment);
    }

    pub fn segments(&self) -> &[FlightSegment] {
        &self.segments
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FlightSegment> {
        self.segments.iter()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn total_duration_s(&self) -> f64 {
        self.segments.iter().map(|s| s.duration_sec).sum()
    }
}

impl FromIterator<FlightSegment> for MissionProfile {
    fn from_iter<I: IntoIterator<Item = FlightSegment>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a MissionProfile {
    type Item = &'a FlightSegment;
    type IntoIter = std::slice::Iter<'a, FlightSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

/// Time (s) to fly `range_nm` at `cruise_speed_kts`.
pub fn cruise_duration_s(range_nm: f64, cruise_speed_kts: f64) -> f64 {
    nm_to_ft(range_nm) / kts_to_fps(cruise_speed_kts)
}
