//! Every catalog entry mounts, animates and unmounts cleanly

use common::{FrameHost, MountedSimulation, RunState, DEFAULT_CANVAS};
use glam::Vec2;
use physics_lab::SimulationKind;

const DT: f64 = 1.0 / 60.0;

fn mount(kind: SimulationKind, host: &FrameHost) -> MountedSimulation {
    MountedSimulation::mount(kind.slug(), kind.instantiate(DEFAULT_CANVAS), host, Vec2::new(1280.0, 760.0))
}

#[test]
fn every_simulation_draws_and_reports() {
    let host = FrameHost::new();
    for kind in SimulationKind::ALL {
        let mounted = mount(kind, &host);
        for i in 0..120 {
            host.refresh(i as f64 * DT);
        }
        let simulation = mounted.simulation();
        assert!(!simulation.frame().commands().is_empty(), "{} drew nothing", kind.slug());
        assert_eq!(simulation.frame().size(), DEFAULT_CANVAS);
        assert!(!simulation.readouts().is_empty(), "{} has no readouts", kind.slug());
        assert!(!simulation.parameters().is_empty(), "{} has no parameters", kind.slug());
    }
}

#[test]
fn unmounting_releases_the_host() {
    let host = FrameHost::new();
    for kind in SimulationKind::ALL {
        let mounted = mount(kind, &host);
        host.refresh(0.0);
        assert_eq!(host.active_frame_callbacks(), 1);
        assert_eq!(host.active_resize_listeners(), 1);
        drop(mounted);
        assert_eq!(host.active_frame_callbacks(), 0, "{} leaked a frame callback", kind.slug());
        assert_eq!(host.active_resize_listeners(), 0, "{} leaked a resize listener", kind.slug());
        host.refresh(1.0);
    }
}

#[test]
fn switching_keeps_a_single_subscription() {
    let host = FrameHost::new();
    let mut mounted = Some(mount(SimulationKind::Pendulum, &host));
    for (i, kind) in SimulationKind::ALL.into_iter().enumerate() {
        MountedSimulation::replace(
            &mut mounted,
            kind.slug(),
            || {
                assert_eq!(host.active_frame_callbacks(), 0, "{} mounted over a live one", kind.slug());
                kind.instantiate(DEFAULT_CANVAS)
            },
            &host,
            Vec2::new(1280.0, 760.0),
        );
        host.refresh(i as f64 * DT);
        assert_eq!(host.active_frame_callbacks(), 1);
        assert_eq!(mounted.as_ref().map(MountedSimulation::name), Some(kind.slug()));
    }
}

#[test]
fn one_shot_experiments_finish_and_restart_on_edit() {
    let host = FrameHost::new();
    for (kind, parameter, value) in [
        (SimulationKind::FreeFall, "height", 30.0),
        (SimulationKind::Projectile, "angle", 60.0),
        (SimulationKind::InclinedPlane, "angle", 40.0),
    ] {
        let mounted = mount(kind, &host);
        for i in 0..600 {
            host.refresh(i as f64 * DT);
        }
        assert!(mounted.simulation().is_terminal(), "{} never finished", kind.slug());

        mounted.simulation_mut().set_parameter(parameter, value);
        assert!(!mounted.simulation().is_terminal(), "{} did not restart", kind.slug());
    }
}

#[test]
fn static_views_cannot_be_paused() {
    let host = FrameHost::new();
    for kind in [SimulationKind::ThinLens, SimulationKind::ElectricField] {
        let mounted = mount(kind, &host);
        assert!(!mounted.simulation().pausable());
        mounted.simulation_mut().toggle_pause();
        assert_eq!(mounted.simulation().run_state(), RunState::Running);
    }

    let mounted = mount(SimulationKind::Pendulum, &host);
    mounted.simulation_mut().toggle_pause();
    assert_eq!(mounted.simulation().run_state(), RunState::Paused);
}

#[test]
fn parameters_are_not_carried_between_mounts() {
    let host = FrameHost::new();
    let mounted = mount(SimulationKind::Pendulum, &host);
    let edited = mounted.simulation_mut().set_parameter("length", 2.5);
    assert_eq!(edited, Some(2.5));
    drop(mounted);

    let fresh = mount(SimulationKind::Pendulum, &host);
    assert_ne!(fresh.simulation().parameters().value("length"), 2.5);
}
