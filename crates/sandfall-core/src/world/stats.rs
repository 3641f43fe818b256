//! Simulation statistics collection trait

use serde::{Deserialize, Serialize};

/// Trait for collecting simulation statistics
///
/// The passes report what they did through this so callers can pick between
/// counting everything and paying nothing.
pub trait SimStats {
    /// Record that a cell was moved during simulation
    fn record_cell_moved(&mut self);

    /// Record that a state change occurred (e.g., melting, freezing)
    fn record_state_change(&mut self);

    /// Record that a chemical reaction occurred
    fn record_reaction(&mut self);

    /// Record that a reaction set off an explosion
    fn record_explosion(&mut self);

    /// Record that an explosion blew a cell away
    fn record_cell_destroyed(&mut self);

    /// Record that a cell ran out of lifetime
    fn record_cell_expired(&mut self);

    /// Record that fire spread into a neighboring cell
    fn record_fire_spread(&mut self);
}

/// A no-op implementation for when stats collection is not needed
#[derive(Default)]
pub struct NoopStats;

impl SimStats for NoopStats {
    fn record_cell_moved(&mut self) {}
    fn record_state_change(&mut self) {}
    fn record_reaction(&mut self) {}
    fn record_explosion(&mut self) {}
    fn record_cell_destroyed(&mut self) {}
    fn record_cell_expired(&mut self) {}
    fn record_fire_spread(&mut self) {}
}

/// Counters for one frame, or accumulated over many
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameStats {
    pub cells_moved: u64,
    pub state_changes: u64,
    pub reactions: u64,
    pub explosions: u64,
    pub cells_destroyed: u64,
    pub cells_expired: u64,
    pub fire_spreads: u64,
}

impl FrameStats {
    /// Add another set of counters onto this one
    pub fn accumulate(&mut self, other: &FrameStats) {
        self.cells_moved += other.cells_moved;
        self.state_changes += other.state_changes;
        self.reactions += other.reactions;
        self.explosions += other.explosions;
        self.cells_destroyed += other.cells_destroyed;
        self.cells_expired += other.cells_expired;
        self.fire_spreads += other.fire_spreads;
    }
}

impl SimStats for FrameStats {
    fn record_cell_moved(&mut self) {
        self.cells_moved += 1;
    }

    fn record_state_change(&mut self) {
        self.state_changes += 1;
    }

    fn record_reaction(&mut self) {
        self.reactions += 1;
    }

    fn record_explosion(&mut self) {
        self.explosions += 1;
    }

    fn record_cell_destroyed(&mut self) {
        self.cells_destroyed += 1;
    }

    fn record_cell_expired(&mut self) {
        self.cells_expired += 1;
    }

    fn record_fire_spread(&mut self) {
        self.fire_spreads += 1;
    }
}
