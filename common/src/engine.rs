//! Generic simulation engine
//!
//! A simulation is a [`PhysicsModel`] (pure state stepping) paired with a
//! [`SceneRenderer`] (pure drawing). [`SimulationEngine`] owns the live
//! parameters and state, decides the time step and runs exactly one model
//! step and one draw per tick.

use glam::Vec2;

use crate::canvas::{palette, Frame};
use crate::params::{InputOutcome, ParameterSet};

/// How a simulation advances simulated time each tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepTiming {
    /// Same nominal step every tick, regardless of the display rate
    Fixed(f32),
    /// Measured time since the previous tick, capped at `max_dt`
    FrameDelta { max_dt: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Paused,
}

/// A named live value shown next to the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct Readout {
    pub label: &'static str,
    pub value: String,
}

impl Readout {
    pub fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }
}

/// Governing equations of one simulation
///
/// `step` must be pure: the same `(state, params, dt)` always produces the
/// same next state and nothing is accumulated between calls.
pub trait PhysicsModel {
    type State: Clone + std::fmt::Debug;

    fn timing(&self) -> StepTiming;

    fn initial_state(&self, params: &ParameterSet) -> Self::State;

    fn step(&self, state: &Self::State, params: &ParameterSet, dt: f32) -> Self::State;

    /// Terminal states are frozen: the engine stops stepping them.
    fn is_terminal(&self, _state: &Self::State) -> bool {
        false
    }

    /// One-shot experiments restart when the whole parameter set is replaced
    fn resets_on_new_parameters(&self) -> bool {
        false
    }

    /// Whether the view offers a pause control
    fn pausable(&self) -> bool {
        true
    }

    fn readouts(&self, _state: &Self::State, _params: &ParameterSet) -> Vec<Readout> {
        Vec::new()
    }
}

/// Draws a state; never mutates it
pub trait SceneRenderer<S> {
    fn draw(&self, state: &S, params: &ParameterSet, frame: &mut Frame);
}

/// Object-safe view of a running simulation, used by the host application
pub trait Simulation {
    /// Advance to display time `now` (seconds) and redraw
    fn tick(&mut self, now: f64);
    fn frame(&self) -> &Frame;
    fn parameters(&self) -> &ParameterSet;
    fn set_parameter(&mut self, id: &str, value: f32) -> Option<f32>;
    fn commit_parameter_text(&mut self, id: &str, text: &str) -> Option<InputOutcome>;
    /// Replace the whole parameter set (e.g. restore defaults)
    fn reset_parameters(&mut self);
    fn reset(&mut self);
    fn run_state(&self) -> RunState;
    fn toggle_pause(&mut self);
    fn pausable(&self) -> bool;
    fn is_terminal(&self) -> bool;
    fn readouts(&self) -> Vec<Readout>;
}

/// One generic driver for every simulation kind
pub struct SimulationEngine<M: PhysicsModel, R> {
    model: M,
    renderer: R,
    params: ParameterSet,
    state: M::State,
    run_state: RunState,
    last_tick: Option<f64>,
    frame: Frame,
    steps: u64,
}

impl<M, R> SimulationEngine<M, R>
where
    M: PhysicsModel,
    R: SceneRenderer<M::State>,
{
    pub fn new(model: M, renderer: R, params: ParameterSet, canvas: Vec2) -> Self {
        let state = model.initial_state(&params);
        let mut engine = Self {
            model,
            renderer,
            params,
            state,
            run_state: RunState::Running,
            last_tick: None,
            frame: Frame::new(canvas),
            steps: 0,
        };
        engine.redraw();
        engine
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn state(&self) -> &M::State {
        &self.state
    }

    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    /// Model steps taken since the last reset
    pub fn steps(&self) -> u64 {
        self.steps
    }

    fn next_dt(&mut self, now: f64) -> f32 {
        let previous = self.last_tick.replace(now);
        match self.model.timing() {
            StepTiming::Fixed(dt) => dt,
            StepTiming::FrameDelta { max_dt } => match previous {
                Some(prev) => ((now - prev) as f32).clamp(0.0, max_dt),
                None => 0.0,
            },
        }
    }

    /// One animation tick: at most one model step, exactly one draw
    pub fn advance(&mut self, now: f64) {
        // Measured even while paused so resuming has no time jump
        let dt = self.next_dt(now);

        if self.run_state == RunState::Running && !self.model.is_terminal(&self.state) {
            self.state = self.model.step(&self.state, &self.params, dt);
            self.steps += 1;
            if self.model.is_terminal(&self.state) {
                log::debug!("Simulation reached its terminal state after {} steps", self.steps);
            }
        }

        self.redraw();
    }

    fn redraw(&mut self) {
        self.frame.clear(palette::BACKGROUND);
        self.renderer.draw(&self.state, &self.params, &mut self.frame);
    }

    pub fn set_parameter(&mut self, id: &str, value: f32) -> Option<f32> {
        self.edit_parameters(|params| params.set_value(id, value))
    }

    pub fn commit_parameter_text(&mut self, id: &str, text: &str) -> Option<InputOutcome> {
        self.edit_parameters(|params| params.commit_text(id, text))
    }

    /// Continuous models read edits live on the next tick. For one-shot
    /// models an edit produces a new parameter set, which restarts them.
    fn edit_parameters<T>(&mut self, edit: impl FnOnce(&mut ParameterSet) -> Option<T>) -> Option<T> {
        if !self.model.resets_on_new_parameters() {
            return edit(&mut self.params);
        }
        let mut next = self.params.clone();
        let result = edit(&mut next)?;
        if next != self.params {
            self.replace_parameters(next);
        }
        Some(result)
    }

    /// Swap in a new parameter set. One-shot models restart.
    pub fn replace_parameters(&mut self, params: ParameterSet) {
        self.params = params;
        if self.model.resets_on_new_parameters() {
            self.reset();
        } else {
            self.redraw();
        }
    }

    pub fn reset(&mut self) {
        self.state = self.model.initial_state(&self.params);
        self.steps = 0;
        log::debug!("Simulation state reset");
        self.redraw();
    }
}

impl<M, R> Simulation for SimulationEngine<M, R>
where
    M: PhysicsModel,
    R: SceneRenderer<M::State>,
{
    fn tick(&mut self, now: f64) {
        self.advance(now);
    }

    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn parameters(&self) -> &ParameterSet {
        &self.params
    }

    fn set_parameter(&mut self, id: &str, value: f32) -> Option<f32> {
        SimulationEngine::set_parameter(self, id, value)
    }

    fn commit_parameter_text(&mut self, id: &str, text: &str) -> Option<InputOutcome> {
        SimulationEngine::commit_parameter_text(self, id, text)
    }

    fn reset_parameters(&mut self) {
        let mut params = self.params.clone();
        params.reset_to_defaults();
        self.replace_parameters(params);
    }

    fn reset(&mut self) {
        SimulationEngine::reset(self);
    }

    fn run_state(&self) -> RunState {
        self.run_state
    }

    fn toggle_pause(&mut self) {
        if !self.model.pausable() {
            return;
        }
        self.run_state = match self.run_state {
            RunState::Running => RunState::Paused,
            RunState::Paused => RunState::Running,
        };
    }

    fn pausable(&self) -> bool {
        self.model.pausable()
    }

    fn is_terminal(&self) -> bool {
        self.model.is_terminal(&self.state)
    }

    fn readouts(&self) -> Vec<Readout> {
        self.model.readouts(&self.state, &self.params)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::canvas::Align;
    use crate::params::ParameterSpec;

    const TEMPLATE: &[ParameterSpec] = &[ParameterSpec {
        id: "speed",
        label: "Speed",
        label_uz: "Tezlik",
        min: 0.0,
        max: 10.0,
        step: 0.5,
        default: 2.0,
        unit: "m/s",
    }];

    /// Moves a point along x until it passes `limit`
    pub(crate) struct Glide {
        pub timing: StepTiming,
        pub limit: f32,
        pub one_shot: bool,
    }

    impl PhysicsModel for Glide {
        type State = f32;

        fn timing(&self) -> StepTiming {
            self.timing
        }

        fn initial_state(&self, _params: &ParameterSet) -> f32 {
            0.0
        }

        fn step(&self, x: &f32, params: &ParameterSet, dt: f32) -> f32 {
            x + params.value("speed") * dt
        }

        fn is_terminal(&self, x: &f32) -> bool {
            *x >= self.limit
        }

        fn resets_on_new_parameters(&self) -> bool {
            self.one_shot
        }
    }

    pub(crate) struct Dot;

    impl SceneRenderer<f32> for Dot {
        fn draw(&self, x: &f32, _params: &ParameterSet, frame: &mut Frame) {
            frame.fill_circle(Vec2::new(*x, 10.0), 3.0, palette::ACCENT);
            frame.text(Vec2::new(4.0, 4.0), format!("x = {x:.2}"), 12.0, palette::TEXT, Align::Left);
        }
    }

    fn engine(timing: StepTiming, one_shot: bool) -> SimulationEngine<Glide, Dot> {
        SimulationEngine::new(
            Glide {
                timing,
                limit: 1.0,
                one_shot,
            },
            Dot,
            ParameterSet::from_template(TEMPLATE),
            Vec2::new(100.0, 50.0),
        )
    }

    #[test]
    fn fixed_step_ignores_frame_times() {
        let mut engine = engine(StepTiming::Fixed(0.1), false);
        engine.advance(0.0);
        engine.advance(5.0);
        assert!((engine.state() - 0.4).abs() < 1e-6);
        assert!(engine.frame().has_text("x = 0.40"));
    }

    #[test]
    fn frame_delta_is_measured_and_capped() {
        let mut engine = engine(StepTiming::FrameDelta { max_dt: 0.05 }, false);
        engine.advance(1.0); // first tick has no previous frame
        assert_eq!(*engine.state(), 0.0);
        engine.advance(1.02);
        assert!((engine.state() - 0.04).abs() < 1e-5);
        engine.advance(3.0);
        assert!((engine.state() - 0.14).abs() < 1e-5);
    }

    #[test]
    fn paused_engine_keeps_drawing_without_stepping() {
        let mut engine = engine(StepTiming::FrameDelta { max_dt: 0.1 }, false);
        engine.advance(0.0);
        engine.toggle_pause();
        engine.advance(0.05);
        engine.advance(0.10);
        assert_eq!(*engine.state(), 0.0);
        assert_eq!(engine.run_state(), RunState::Paused);
        assert!(engine.frame().has_text("x = 0.00"));

        engine.toggle_pause();
        engine.advance(0.12);
        // only the 20ms since the last paused tick
        assert!((engine.state() - 0.04).abs() < 1e-5);
    }

    #[test]
    fn terminal_state_is_frozen() {
        let mut engine = engine(StepTiming::Fixed(0.25), false);
        for i in 0..20 {
            engine.advance(i as f64);
        }
        assert!(Simulation::is_terminal(&engine));
        assert_eq!(engine.steps(), 2);
        assert_eq!(*engine.state(), 1.0);
    }

    #[test]
    fn live_parameter_changes_apply_without_reset() {
        let mut engine = engine(StepTiming::Fixed(0.1), false);
        engine.advance(0.0);
        engine.set_parameter("speed", 4.0);
        engine.advance(0.1);
        assert!((engine.state() - 0.6).abs() < 1e-6);
    }

    #[test]
    fn one_shot_models_restart_on_new_parameter_set() {
        let mut engine = engine(StepTiming::Fixed(0.1), true);
        engine.advance(0.0);
        engine.advance(0.1);
        assert!(*engine.state() > 0.0);

        let mut params = engine.params().clone();
        params.set_value("speed", 1.0);
        engine.replace_parameters(params);
        assert_eq!(*engine.state(), 0.0);
        assert_eq!(engine.steps(), 0);

        engine.advance(0.2);
        assert!(*engine.state() > 0.0);
        engine.set_parameter("speed", 3.0);
        assert_eq!(*engine.state(), 0.0);

        engine.advance(0.3);
        let moved = *engine.state();
        // unparseable text keeps the same set, so nothing restarts
        engine.commit_parameter_text("speed", "fast");
        assert_eq!(*engine.state(), moved);

        let mut continuous = self::engine(StepTiming::Fixed(0.1), false);
        continuous.advance(0.0);
        let before = *continuous.state();
        Simulation::reset_parameters(&mut continuous);
        assert_eq!(*continuous.state(), before);
    }
}
