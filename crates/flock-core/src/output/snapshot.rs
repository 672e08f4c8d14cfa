//! Snapshot Generation
//!
//! Capturing the flock at regular intervals and writing it out as JSON, the
//! presentation surface of the headless binary.

use flock_events::{generate_snapshot_id, AgentSnapshot, WorldSnapshot};
use std::fs;
use std::path::Path;

use crate::components::agent::Agent;
use crate::output::stats::compute_metrics;
use crate::simulation::Simulation;

/// Directory under the output root that holds numbered snapshots
pub const SNAPSHOT_SUBDIR: &str = "snapshots";

/// File under the output root that always holds the latest snapshot
pub const CURRENT_STATE_FILE: &str = "current_state.json";

/// Tracks snapshot cadence and numbering
#[derive(Debug, Clone)]
pub struct SnapshotGenerator {
    next_snapshot_id: u64,
    snapshot_interval: u64,
    last_snapshot_tick: u64,
}

impl SnapshotGenerator {
    pub fn new(snapshot_interval: u64) -> Self {
        Self {
            next_snapshot_id: 1,
            snapshot_interval: snapshot_interval.max(1),
            last_snapshot_tick: 0,
        }
    }

    pub fn should_snapshot(&self, current_tick: u64) -> bool {
        current_tick % self.snapshot_interval == 0
    }

    pub fn next_id(&mut self) -> String {
        let id = generate_snapshot_id(self.next_snapshot_id);
        self.next_snapshot_id += 1;
        id
    }

    pub fn mark_snapshot(&mut self, tick: u64) {
        self.last_snapshot_tick = tick;
    }

    pub fn last_snapshot_tick(&self) -> u64 {
        self.last_snapshot_tick
    }

    pub fn snapshot_count(&self) -> u64 {
        self.next_snapshot_id - 1
    }
}

fn agent_snapshot(agent: &Agent, containment_radius: f32) -> AgentSnapshot {
    AgentSnapshot {
        agent_id: agent.id().index(),
        position: agent.position().to_array(),
        direction: agent.direction().to_array(),
        orientation: agent.orientation().to_array(),
        neighbor_count: agent.neighbors().len(),
        outside_containment: agent.is_outside(containment_radius),
    }
}

/// Generate a complete world snapshot
pub fn generate_snapshot(
    sim: &Simulation,
    generator: &mut SnapshotGenerator,
    triggered_by: &str,
) -> WorldSnapshot {
    let world = sim.world();
    let radius = world.containment_radius();

    let mut snapshot = WorldSnapshot::new(
        generator.next_id(),
        sim.clock().timestamp(),
        radius,
        triggered_by,
    );
    snapshot.agents = world
        .agents()
        .iter()
        .map(|agent| agent_snapshot(agent, radius))
        .collect();
    snapshot.metrics = compute_metrics(world);

    generator.mark_snapshot(snapshot.timestamp.tick);
    snapshot
}

/// Write a snapshot to a specific path
pub fn write_snapshot(snapshot: &WorldSnapshot, path: impl AsRef<Path>) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(path, json)
}

/// Write a snapshot into `<output_dir>/snapshots/`, named by tick
pub fn write_snapshot_to_dir(
    snapshot: &WorldSnapshot,
    output_dir: impl AsRef<Path>,
) -> std::io::Result<()> {
    let dir = output_dir.as_ref().join(SNAPSHOT_SUBDIR);
    fs::create_dir_all(&dir)?;
    let path = dir.join(format!("snap_{:06}.json", snapshot.timestamp.tick));
    write_snapshot(snapshot, path)
}

/// Write current state (overwrites each time)
pub fn write_current_state(
    snapshot: &WorldSnapshot,
    output_dir: impl AsRef<Path>,
) -> std::io::Result<()> {
    let dir = output_dir.as_ref();
    fs::create_dir_all(dir)?;
    write_snapshot(snapshot, dir.join(CURRENT_STATE_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FlockConfig;

    fn small_sim() -> Simulation {
        let mut config = FlockConfig::default();
        config.world.number_to_spawn = 5;
        Simulation::new(config).unwrap()
    }

    #[test]
    fn test_generator_cadence() {
        let mut generator = SnapshotGenerator::new(100);
        assert!(generator.should_snapshot(0));
        assert!(!generator.should_snapshot(50));
        assert!(generator.should_snapshot(200));

        assert_eq!(generator.next_id(), "snap_000001");
        assert_eq!(generator.next_id(), "snap_000002");
        assert_eq!(generator.snapshot_count(), 2);
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let generator = SnapshotGenerator::new(0);
        assert!(generator.should_snapshot(3));
    }

    #[test]
    fn test_generate_snapshot() {
        let mut sim = small_sim();
        sim.run(3);
        let mut generator = SnapshotGenerator::new(10);

        let snapshot = generate_snapshot(&sim, &mut generator, "test");

        assert_eq!(snapshot.snapshot_id, "snap_000001");
        assert_eq!(snapshot.timestamp.tick, 3);
        assert_eq!(snapshot.agent_count(), 5);
        assert_eq!(snapshot.containment_radius, 10.0);
        assert_eq!(generator.last_snapshot_tick(), 3);

        let first = sim.world().agents()[0].position().to_array();
        assert_eq!(snapshot.agent(0).map(|a| a.position), Some(first));
    }

    #[test]
    fn test_write_snapshot_files() {
        let dir = tempfile::tempdir().unwrap();
        let sim = small_sim();
        let mut generator = SnapshotGenerator::new(10);
        let snapshot = generate_snapshot(&sim, &mut generator, "simulation_start");

        write_snapshot_to_dir(&snapshot, dir.path()).unwrap();
        write_current_state(&snapshot, dir.path()).unwrap();

        let numbered = dir.path().join(SNAPSHOT_SUBDIR).join("snap_000000.json");
        let current = dir.path().join(CURRENT_STATE_FILE);
        let parsed: WorldSnapshot =
            serde_json::from_str(&fs::read_to_string(numbered).unwrap()).unwrap();
        assert_eq!(parsed, snapshot);
        assert!(current.exists());
    }
}
