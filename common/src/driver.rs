//! Display-refresh scheduling and simulation mounting
//!
//! The host window owns a [`FrameHost`] and calls [`FrameHost::refresh`]
//! once per display refresh. Mounted simulations hold a
//! [`FrameSubscription`] (and optionally a [`ListenerGuard`] for resize
//! events); both unregister themselves on drop, so unmounting a view can
//! never leak a callback, whatever path the view is torn down on.

use std::cell::{Cell, Ref, RefCell, RefMut};
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use glam::Vec2;

use crate::engine::Simulation;

#[derive(Default)]
struct HostInner {
    next_id: u64,
    // `None` while the callback is running
    frames: Slots<f64>,
    resize: Slots<Vec2>,
}

impl HostInner {
    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

type Slots<T> = BTreeMap<u64, Option<Box<dyn FnMut(T)>>>;

/// Run each registered callback once. The host is not borrowed while a
/// callback runs, so callbacks may subscribe or unsubscribe.
fn fire<T: Copy>(host: &RefCell<HostInner>, slots: fn(&mut HostInner) -> &mut Slots<T>, arg: T) {
    let ids: Vec<u64> = slots(&mut host.borrow_mut()).keys().copied().collect();
    for id in ids {
        let taken = slots(&mut host.borrow_mut()).get_mut(&id).and_then(Option::take);
        let Some(mut callback) = taken else { continue };
        callback(arg);
        // Re-arm only if nobody unsubscribed meanwhile
        let cancelled = {
            let mut inner = host.borrow_mut();
            match slots(&mut inner).get_mut(&id) {
                Some(slot) => {
                    *slot = Some(callback);
                    None
                }
                None => Some(callback),
            }
        };
        drop(cancelled);
    }
}

/// Source of display-refresh and resize callbacks
#[derive(Clone, Default)]
pub struct FrameHost {
    inner: Rc<RefCell<HostInner>>,
}

impl FrameHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback invoked on every refresh until the
    /// subscription is dropped
    pub fn request_frames(&self, callback: impl FnMut(f64) + 'static) -> FrameSubscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.allocate_id();
        inner.frames.insert(id, Some(Box::new(callback)));
        FrameSubscription {
            id,
            host: Rc::downgrade(&self.inner),
        }
    }

    pub fn on_resize(&self, callback: impl FnMut(Vec2) + 'static) -> ListenerGuard {
        let mut inner = self.inner.borrow_mut();
        let id = inner.allocate_id();
        inner.resize.insert(id, Some(Box::new(callback)));
        ListenerGuard {
            id,
            host: Rc::downgrade(&self.inner),
        }
    }

    /// Fire every live frame callback with display time `now` in seconds
    pub fn refresh(&self, now: f64) {
        fire(&self.inner, |inner| &mut inner.frames, now);
    }

    /// Notify resize listeners of the new surface size
    pub fn resize(&self, size: Vec2) {
        fire(&self.inner, |inner| &mut inner.resize, size);
    }

    pub fn active_frame_callbacks(&self) -> usize {
        self.inner.borrow().frames.len()
    }

    pub fn active_resize_listeners(&self) -> usize {
        self.inner.borrow().resize.len()
    }
}

/// Keeps a frame callback scheduled; cancels it on drop
pub struct FrameSubscription {
    id: u64,
    host: Weak<RefCell<HostInner>>,
}

impl Drop for FrameSubscription {
    fn drop(&mut self) {
        if let Some(host) = self.host.upgrade() {
            let removed = host.borrow_mut().frames.remove(&self.id);
            drop(removed);
        }
    }
}

/// Keeps a resize listener registered; removes it on drop
pub struct ListenerGuard {
    id: u64,
    host: Weak<RefCell<HostInner>>,
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if let Some(host) = self.host.upgrade() {
            let removed = host.borrow_mut().resize.remove(&self.id);
            drop(removed);
        }
    }
}

/// A simulation attached to the display refresh of a host
///
/// Dropping it unmounts the simulation: the frame subscription and the
/// resize listener are released and no further ticks happen.
pub struct MountedSimulation {
    name: &'static str,
    simulation: Rc<RefCell<Box<dyn Simulation>>>,
    viewport: Rc<Cell<Vec2>>,
    _frames: FrameSubscription,
    _resize: ListenerGuard,
}

impl MountedSimulation {
    pub fn mount(name: &'static str, simulation: Box<dyn Simulation>, host: &FrameHost, viewport: Vec2) -> Self {
        let simulation = Rc::new(RefCell::new(simulation));
        let viewport = Rc::new(Cell::new(viewport));

        let ticking = Rc::clone(&simulation);
        let frames = host.request_frames(move |now| {
            if let Ok(mut sim) = ticking.try_borrow_mut() {
                sim.tick(now);
            }
        });

        let tracked = Rc::clone(&viewport);
        let resize = host.on_resize(move |size| tracked.set(size));

        log::info!("Mounted simulation '{name}'");
        Self {
            name,
            simulation,
            viewport,
            _frames: frames,
            _resize: resize,
        }
    }

    /// Unmount whatever `slot` holds, then build and mount a new simulation.
    /// `make` runs after the old subscriptions are gone.
    pub fn replace(
        slot: &mut Option<MountedSimulation>,
        name: &'static str,
        make: impl FnOnce() -> Box<dyn Simulation>,
        host: &FrameHost,
        viewport: Vec2,
    ) {
        *slot = None;
        *slot = Some(Self::mount(name, make(), host, viewport));
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn simulation(&self) -> Ref<'_, Box<dyn Simulation>> {
        self.simulation.borrow()
    }

    pub fn simulation_mut(&self) -> RefMut<'_, Box<dyn Simulation>> {
        self.simulation.borrow_mut()
    }

    /// Latest surface size reported by the host
    pub fn viewport(&self) -> Vec2 {
        self.viewport.get()
    }
}

impl Drop for MountedSimulation {
    fn drop(&mut self) {
        log::info!("Unmounted simulation '{}'", self.name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Frame;
    use crate::engine::tests::{Dot, Glide};
    use crate::engine::{PhysicsModel, SceneRenderer, SimulationEngine, StepTiming};
    use crate::params::ParameterSet;

    /// Counts model and renderer invocations
    struct Probe {
        steps: Rc<Cell<u32>>,
        draws: Rc<Cell<u32>>,
    }

    impl PhysicsModel for Probe {
        type State = u32;

        fn timing(&self) -> StepTiming {
            StepTiming::FrameDelta { max_dt: 0.1 }
        }

        fn initial_state(&self, _params: &ParameterSet) -> u32 {
            0
        }

        fn step(&self, state: &u32, _params: &ParameterSet, _dt: f32) -> u32 {
            self.steps.set(self.steps.get() + 1);
            state + 1
        }
    }

    impl SceneRenderer<u32> for Probe {
        fn draw(&self, _state: &u32, _params: &ParameterSet, _frame: &mut Frame) {
            self.draws.set(self.draws.get() + 1);
        }
    }

    fn probe() -> (Box<dyn Simulation>, Rc<Cell<u32>>, Rc<Cell<u32>>) {
        let steps = Rc::new(Cell::new(0));
        let draws = Rc::new(Cell::new(0));
        let model = Probe {
            steps: Rc::clone(&steps),
            draws: Rc::new(Cell::new(0)),
        };
        let renderer = Probe {
            steps: Rc::new(Cell::new(0)),
            draws: Rc::clone(&draws),
        };
        let engine = SimulationEngine::new(model, renderer, ParameterSet::default(), Vec2::new(10.0, 10.0));
        (Box::new(engine), steps, draws)
    }

    #[test]
    fn no_invocations_after_unmount() {
        let host = FrameHost::new();
        let (simulation, steps, draws) = probe();
        let mounted = MountedSimulation::mount("probe", simulation, &host, Vec2::new(800.0, 500.0));
        // initial draw happens at construction
        assert_eq!(draws.get(), 1);

        for i in 0..5 {
            host.refresh(i as f64 / 60.0);
        }
        assert_eq!(steps.get(), 5);
        assert_eq!(draws.get(), 6);

        drop(mounted);
        assert_eq!(host.active_frame_callbacks(), 0);
        assert_eq!(host.active_resize_listeners(), 0);

        for i in 5..50 {
            host.refresh(i as f64 / 60.0);
        }
        host.resize(Vec2::new(1024.0, 768.0));
        assert_eq!(steps.get(), 5);
        assert_eq!(draws.get(), 6);
    }

    #[test]
    fn paused_simulation_stays_scheduled() {
        let host = FrameHost::new();
        let (simulation, steps, draws) = probe();
        let mounted = MountedSimulation::mount("probe", simulation, &host, Vec2::ZERO);

        mounted.simulation_mut().toggle_pause();
        for i in 0..3 {
            host.refresh(i as f64);
        }
        assert_eq!(steps.get(), 0);
        assert_eq!(draws.get(), 4);
        assert_eq!(host.active_frame_callbacks(), 1);
    }

    #[test]
    fn viewport_tracks_resize_events() {
        let host = FrameHost::new();
        let engine = SimulationEngine::new(
            Glide {
                timing: StepTiming::Fixed(0.1),
                limit: 5.0,
                one_shot: false,
            },
            Dot,
            ParameterSet::default(),
            Vec2::new(100.0, 50.0),
        );
        let mounted = MountedSimulation::mount("glide", Box::new(engine), &host, Vec2::new(640.0, 480.0));
        host.resize(Vec2::new(1920.0, 1080.0));
        assert_eq!(mounted.viewport(), Vec2::new(1920.0, 1080.0));
    }

    #[test]
    fn switching_simulations_keeps_one_subscription() {
        let host = FrameHost::new();
        let (first, first_steps, _) = probe();
        let mut mounted = MountedSimulation::mount("first", first, &host, Vec2::ZERO);
        host.refresh(0.0);
        assert_eq!(mounted.name(), "first");

        let (second, second_steps, _) = probe();
        mounted = MountedSimulation::mount("second", second, &host, Vec2::ZERO);
        assert_eq!(host.active_frame_callbacks(), 1);
        host.refresh(0.1);

        assert_eq!(first_steps.get(), 1);
        assert_eq!(second_steps.get(), 1);
        assert_eq!(mounted.name(), "second");
    }

    #[test]
    fn replace_unmounts_before_building_the_next() {
        let host = FrameHost::new();
        let (first, first_steps, _) = probe();
        let mut slot = Some(MountedSimulation::mount("first", first, &host, Vec2::ZERO));

        let (second, second_steps, _) = probe();
        MountedSimulation::replace(
            &mut slot,
            "second",
            || {
                assert_eq!(host.active_frame_callbacks(), 0);
                assert_eq!(host.active_resize_listeners(), 0);
                second
            },
            &host,
            Vec2::ZERO,
        );
        assert_eq!(host.active_frame_callbacks(), 1);
        host.refresh(0.0);

        assert_eq!(first_steps.get(), 0);
        assert_eq!(second_steps.get(), 1);
        assert_eq!(slot.as_ref().map(MountedSimulation::name), Some("second"));
    }

    #[test]
    fn callback_can_cancel_itself() {
        let host = FrameHost::new();
        let calls = Rc::new(Cell::new(0));
        let slot: Rc<RefCell<Option<FrameSubscription>>> = Rc::new(RefCell::new(None));

        let counter = Rc::clone(&calls);
        let own = Rc::clone(&slot);
        let subscription = host.request_frames(move |_| {
            counter.set(counter.get() + 1);
            own.borrow_mut().take();
        });
        *slot.borrow_mut() = Some(subscription);

        host.refresh(0.0);
        host.refresh(1.0);
        assert_eq!(calls.get(), 1);
        assert_eq!(host.active_frame_callbacks(), 0);
    }
}
