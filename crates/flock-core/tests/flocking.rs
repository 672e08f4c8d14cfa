//! End-to-end flocking behaviour through the public API.

use flock_core::output::{generate_snapshot, write_snapshot_to_dir, SnapshotGenerator};
use flock_core::systems::{scan_neighbors, steering::FORWARD};
use flock_core::{Agent, FlockConfig, NeighborCache, Simulation, SteeringGains, World};
use glam::{Quat, Vec3};

const EPS: f32 = 1e-4;

fn single_agent_sim(position: Vec3) -> Simulation {
    let mut world = World::new(10.0).unwrap();
    world.spawn_with(|id| {
        Agent::new(id, position, Quat::IDENTITY, 5.0, 2.5, SteeringGains::default())
            .with_neighbors(NeighborCache::new())
    });
    Simulation::with_world(world, FlockConfig::default()).unwrap()
}

#[test]
fn test_lone_agent_flies_straight() {
    let mut sim = single_agent_sim(Vec3::ZERO);

    for _ in 0..60 {
        let report = sim.step(1.0 / 60.0);
        assert_eq!(report.steering, 0);
    }

    let agent = &sim.world().agents()[0];
    assert!(agent.position().abs_diff_eq(Vec3::new(0.0, 0.0, 5.0), EPS));
    assert!(agent.heading().abs_diff_eq(FORWARD, EPS));
}

#[test]
fn test_lone_agent_turns_back_when_outside() {
    let mut sim = single_agent_sim(Vec3::new(0.0, 0.0, 11.0));

    let start = sim.world().agents()[0].position().length();
    let mut peak = start;
    for _ in 0..600 {
        sim.step(1.0 / 60.0);
        peak = peak.max(sim.world().agents()[0].position().length());
    }

    let agent = &sim.world().agents()[0];
    assert!(peak > start, "agent should overshoot before turning");
    assert!(peak < 30.0, "agent escaped to {}", peak);
    assert!(agent.position().length() < peak);
}

#[test]
fn test_refresh_replaces_caches_with_current_neighbors() {
    let mut config = FlockConfig::default();
    config.world.number_to_spawn = 40;
    config.world.containment_radius = 4.0;
    config.simulation.delta_time = 0.1;
    let mut sim = Simulation::new(config).unwrap();

    // Seeded with everyone else until the first refresh
    assert!(sim.world().agents().iter().all(|a| a.neighbors().len() == 39));

    sim.run(4);
    let before = sim.world().positions();
    let report = sim.step(0.1);
    assert!(report.refreshed);

    for agent in sim.world().agents() {
        let expected = scan_neighbors(
            agent.id(),
            before[agent.id().index()],
            agent.perception_radius(),
            &before,
        );
        assert_eq!(agent.neighbors().ids(), expected.as_slice());
        assert_eq!(agent.neighbors().generation(), 1);
        assert!(!agent.neighbors().contains(agent.id()));
    }
}

#[test]
fn test_headings_stay_unit_and_flock_stays_bounded() {
    let mut config = FlockConfig::default();
    config.world.number_to_spawn = 60;
    let radius = config.world.containment_radius;
    let mut sim = Simulation::new(config).unwrap();

    sim.run(1200);

    for agent in sim.world().agents() {
        assert!(agent.position().is_finite(), "{} has non-finite position", agent.id());
        assert!((agent.heading().length() - 1.0).abs() < EPS);
        assert!(agent.position().length() < radius * 5.0);
    }
}

#[test]
fn test_snapshot_written_for_running_flock() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = FlockConfig::default();
    config.world.number_to_spawn = 5;
    let mut sim = Simulation::new(config).unwrap();
    let mut generator = SnapshotGenerator::new(10);

    sim.run(10);
    assert!(generator.should_snapshot(sim.clock().tick()));
    let snapshot = generate_snapshot(&sim, &mut generator, "periodic");
    write_snapshot_to_dir(&snapshot, dir.path()).unwrap();

    let path = dir.path().join("snapshots").join("snap_000010.json");
    let text = std::fs::read_to_string(path).unwrap();
    let parsed: flock_events::WorldSnapshot = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed.agent_count(), 5);
    assert_eq!(parsed.timestamp.tick, 10);
    assert_eq!(parsed.triggered_by, "periodic");
}
