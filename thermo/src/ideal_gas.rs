//! Ideal gas ensemble
//!
//! Equal-mass hard disks in a box. Walls reflect by negating the velocity
//! component and clamping the particle back inside. Overlapping pairs that
//! approach each other exchange the normal component of their relative
//! velocity and are pushed apart.
//!
//! Temperature only sets the speed scale, `v ∝ √(T/300)`. Changing it
//! rescales every velocity by `√(T_new/T_old)`. Changing the particle count
//! respawns the whole ensemble from the seed held in the state, so `step`
//! stays deterministic.

use common::constants::ROOM_TEMPERATURE;
use common::format;
use common::{
    palette, Align, Frame, ParameterSet, ParameterSpec, PhysicsModel, Readout, SceneRenderer,
    SimulationEngine, StepTiming, Stroke,
};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::heat_color;

/// Mean particle speed at room temperature, in px/s
pub const BASE_SPEED: f32 = 120.0;

pub const DEFAULT_SEED: u64 = 0x6761_735f_626f_78;

const BOX_MARGIN: f32 = 30.0;

pub const PARAMETERS: &[ParameterSpec] = &[
    ParameterSpec {
        id: "count",
        label: "Particles",
        label_uz: "Zarralar soni",
        min: 10.0,
        max: 200.0,
        step: 10.0,
        default: 50.0,
        unit: "",
    },
    ParameterSpec {
        id: "temperature",
        label: "Temperature",
        label_uz: "Harorat",
        min: 100.0,
        max: 1000.0,
        step: 10.0,
        default: 300.0,
        unit: "K",
    },
    ParameterSpec {
        id: "radius",
        label: "Particle radius",
        label_uz: "Zarra radiusi",
        min: 2.0,
        max: 8.0,
        step: 0.5,
        default: 4.0,
        unit: "px",
    },
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GasState {
    pub particles: Vec<Particle>,
    /// Temperature the current velocities correspond to
    pub temperature: f32,
    pub seed: u64,
    pub wall_hits: u64,
    pub time: f32,
}

impl GasState {
    pub fn mean_speed(&self) -> f32 {
        if self.particles.is_empty() {
            return 0.0;
        }
        self.particles.iter().map(|p| p.velocity.length()).sum::<f32>() / self.particles.len() as f32
    }

    /// Mean of `v²/2` per unit mass
    pub fn mean_kinetic_energy(&self) -> f32 {
        if self.particles.is_empty() {
            return 0.0;
        }
        self.particles
            .iter()
            .map(|p| 0.5 * p.velocity.length_squared())
            .sum::<f32>()
            / self.particles.len() as f32
    }
}

/// Speed scale factor for a temperature
pub fn speed_scale(temperature: f32) -> f32 {
    (temperature / ROOM_TEMPERATURE).sqrt()
}

pub struct GasModel {
    /// Inner box, in canvas pixels
    pub min: Vec2,
    pub max: Vec2,
    pub seed: u64,
}

impl GasModel {
    pub fn new(canvas: Vec2) -> Self {
        Self {
            min: Vec2::splat(BOX_MARGIN),
            max: canvas - Vec2::splat(BOX_MARGIN),
            seed: DEFAULT_SEED,
        }
    }

    /// Range of particle centres. On a box too small for the particle the
    /// range collapses to a single point instead of inverting.
    fn centre_bounds(&self, radius: f32) -> (Vec2, Vec2) {
        let lo = self.min + Vec2::splat(radius);
        let hi = self.max - Vec2::splat(radius);
        (lo, lo.max(hi))
    }

    fn spawn(&self, count: usize, temperature: f32, radius: f32, seed: u64) -> Vec<Particle> {
        let mut rng = StdRng::seed_from_u64(seed);
        let speed = BASE_SPEED * speed_scale(temperature);
        let (lo, hi) = self.centre_bounds(radius);

        (0..count)
            .map(|_| {
                let position = Vec2::new(rng.gen_range(lo.x..=hi.x), rng.gen_range(lo.y..=hi.y));
                let angle: f32 = rng.gen::<f32>() * std::f32::consts::TAU;
                let magnitude = speed * (0.5 + rng.gen::<f32>());
                Particle {
                    position,
                    velocity: Vec2::new(angle.cos(), angle.sin()) * magnitude,
                }
            })
            .collect()
    }

    fn reflect_walls(&self, particle: &mut Particle, radius: f32) -> bool {
        let (lo, hi) = self.centre_bounds(radius);
        let mut hit = false;

        if particle.position.x < lo.x || particle.position.x > hi.x {
            particle.velocity.x = -particle.velocity.x;
            particle.position.x = particle.position.x.clamp(lo.x, hi.x);
            hit = true;
        }
        if particle.position.y < lo.y || particle.position.y > hi.y {
            particle.velocity.y = -particle.velocity.y;
            particle.position.y = particle.position.y.clamp(lo.y, hi.y);
            hit = true;
        }
        hit
    }
}

/// Elastic contact between two equal-mass disks of radius `radius`
pub fn collide_pair(a: &mut Particle, b: &mut Particle, radius: f32) {
    let offset = b.position - a.position;
    let distance = offset.length();
    let contact = 2.0 * radius;
    if distance >= contact || distance <= f32::EPSILON {
        return;
    }

    let normal = offset / distance;
    let approach = (a.velocity - b.velocity).dot(normal);
    if approach > 0.0 {
        a.velocity -= normal * approach;
        b.velocity += normal * approach;
    }

    let push = normal * (contact - distance) * 0.5;
    a.position -= push;
    b.position += push;
}

impl PhysicsModel for GasModel {
    type State = GasState;

    fn timing(&self) -> StepTiming {
        StepTiming::FrameDelta { max_dt: 1.0 / 30.0 }
    }

    fn initial_state(&self, params: &ParameterSet) -> GasState {
        let temperature = params.value("temperature");
        GasState {
            particles: self.spawn(
                params.value("count").round() as usize,
                temperature,
                params.value("radius"),
                self.seed,
            ),
            temperature,
            seed: self.seed,
            wall_hits: 0,
            time: 0.0,
        }
    }

    fn step(&self, state: &GasState, params: &ParameterSet, dt: f32) -> GasState {
        let count = params.value("count").round() as usize;
        let temperature = params.value("temperature");
        let radius = params.value("radius");

        let mut particles = if count != state.particles.len() {
            log::debug!("Respawning gas ensemble with {count} particles");
            self.spawn(count, temperature, radius, state.seed)
        } else if temperature != state.temperature {
            let factor = speed_scale(temperature) / speed_scale(state.temperature);
            state
                .particles
                .iter()
                .map(|p| Particle {
                    velocity: p.velocity * factor,
                    ..*p
                })
                .collect()
        } else {
            state.particles.clone()
        };

        let mut wall_hits = state.wall_hits;
        for particle in &mut particles {
            particle.position += particle.velocity * dt;
            if self.reflect_walls(particle, radius) {
                wall_hits += 1;
            }
        }

        for i in 0..particles.len() {
            let (head, tail) = particles.split_at_mut(i + 1);
            let a = &mut head[i];
            for b in tail {
                collide_pair(a, b, radius);
            }
        }

        // De-overlap can push a particle through a wall
        for particle in &mut particles {
            self.reflect_walls(particle, radius);
        }

        GasState {
            particles,
            temperature,
            seed: state.seed,
            wall_hits,
            time: state.time + dt,
        }
    }

    fn readouts(&self, state: &GasState, _params: &ParameterSet) -> Vec<Readout> {
        let seconds = state.time.max(f32::EPSILON);
        vec![
            Readout::new("Particles", state.particles.len().to_string()),
            Readout::new("Temperature", format::quantity(state.temperature, 0, "K")),
            Readout::new("Mean speed", format::quantity(state.mean_speed(), 1, "px/s")),
            Readout::new("Wall hits per second", format::quantity(state.wall_hits as f32 / seconds, 1, "")),
        ]
    }
}

pub struct GasRenderer;

impl SceneRenderer<GasState> for GasRenderer {
    fn draw(&self, state: &GasState, params: &ParameterSet, frame: &mut Frame) {
        let radius = params.value("radius");
        let min = Vec2::splat(BOX_MARGIN);
        let max = frame.size() - Vec2::splat(BOX_MARGIN);

        frame.polyline(
            [min, Vec2::new(max.x, min.y), max, Vec2::new(min.x, max.y), min],
            Stroke::new(2.0, palette::MUTED),
        );

        // Color by speed relative to the hottest setting
        let hottest = BASE_SPEED * speed_scale(1000.0) * 1.5;
        for particle in &state.particles {
            let color = heat_color(particle.velocity.length() / hottest);
            frame.fill_circle(particle.position, radius, color);
        }

        frame.text(
            Vec2::new(min.x + 8.0, min.y + 16.0),
            format::labeled("T", state.temperature, 0, "K"),
            14.0,
            palette::TEXT,
            Align::Left,
        );
        frame.text(
            Vec2::new(min.x + 8.0, min.y + 34.0),
            format::labeled("N", state.particles.len() as f32, 0, ""),
            14.0,
            palette::TEXT,
            Align::Left,
        );
        frame.text(
            Vec2::new(max.x - 8.0, min.y + 16.0),
            format::labeled("⟨v⟩", state.mean_speed(), 0, "px/s"),
            13.0,
            palette::MUTED,
            Align::Right,
        );
    }
}

pub type GasEngine = SimulationEngine<GasModel, GasRenderer>;

pub fn engine(canvas: Vec2) -> GasEngine {
    SimulationEngine::new(
        GasModel::new(canvas),
        GasRenderer,
        ParameterSet::from_template(PARAMETERS),
        canvas,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{Simulation, DEFAULT_CANVAS};

    const DT: f32 = 1.0 / 60.0;

    fn model() -> GasModel {
        GasModel::new(DEFAULT_CANVAS)
    }

    #[test]
    fn template_is_valid() {
        assert!(PARAMETERS.iter().all(ParameterSpec::is_valid));
    }

    #[test]
    fn tiny_canvas_collapses_the_box_instead_of_panicking() {
        let mut engine = engine(Vec2::new(60.0, 60.0));
        for i in 0..30 {
            engine.tick(i as f64 / 60.0);
        }
        let state = engine.state();
        assert!(!state.particles.is_empty());
        assert!(state.particles.iter().all(|p| p.position.is_finite()));
    }

    #[test]
    fn particles_stay_inside_the_box() {
        let model = model();
        let mut params = ParameterSet::from_template(PARAMETERS);
        params.set_value("temperature", 1000.0);
        params.set_value("count", 200.0);
        let radius = params.value("radius");

        let mut state = model.initial_state(&params);
        for _ in 0..600 {
            state = model.step(&state, &params, DT);
        }
        for p in &state.particles {
            assert!(p.position.x >= model.min.x + radius - 1e-3 && p.position.x <= model.max.x - radius + 1e-3);
            assert!(p.position.y >= model.min.y + radius - 1e-3 && p.position.y <= model.max.y - radius + 1e-3);
        }
        assert!(state.wall_hits > 0);
    }

    #[test]
    fn temperature_change_rescales_speeds() {
        let model = model();
        let mut params = ParameterSet::from_template(PARAMETERS);
        let state = model.initial_state(&params);
        let before = state.mean_kinetic_energy();

        params.set_value("temperature", 1000.0);
        // contacts and walls conserve energy, so only the rescale shows
        let next = model.step(&state, &params, 0.0);
        let expected = before * 1000.0 / 300.0;
        assert!((next.mean_kinetic_energy() - expected).abs() / expected < 1e-3);
        assert_eq!(next.temperature, 1000.0);
    }

    #[test]
    fn count_change_respawns_deterministically() {
        let model = model();
        let mut params = ParameterSet::from_template(PARAMETERS);
        let state = model.initial_state(&params);

        params.set_value("count", 80.0);
        let a = model.step(&state, &params, DT);
        let b = model.step(&state, &params, DT);
        assert_eq!(a.particles.len(), 80);
        assert_eq!(a, b);
    }

    #[test]
    fn head_on_pair_swaps_velocities() {
        let mut a = Particle {
            position: Vec2::new(100.0, 100.0),
            velocity: Vec2::new(10.0, 0.0),
        };
        let mut b = Particle {
            position: Vec2::new(106.0, 100.0),
            velocity: Vec2::new(-10.0, 0.0),
        };
        collide_pair(&mut a, &mut b, 4.0);
        assert!((a.velocity.x + 10.0).abs() < 1e-4);
        assert!((b.velocity.x - 10.0).abs() < 1e-4);
        // pushed apart to contact distance
        assert!((b.position.x - a.position.x - 8.0).abs() < 1e-4);
    }

    #[test]
    fn separating_pair_keeps_velocities() {
        let mut a = Particle {
            position: Vec2::new(100.0, 100.0),
            velocity: Vec2::new(-10.0, 0.0),
        };
        let mut b = Particle {
            position: Vec2::new(106.0, 100.0),
            velocity: Vec2::new(10.0, 0.0),
        };
        collide_pair(&mut a, &mut b, 4.0);
        assert_eq!(a.velocity, Vec2::new(-10.0, 0.0));
        assert_eq!(b.velocity, Vec2::new(10.0, 0.0));
    }

    #[test]
    fn renderer_draws_every_particle() {
        let engine = engine(DEFAULT_CANVAS);
        let circles = engine
            .frame()
            .commands()
            .iter()
            .filter(|c| matches!(c, common::DrawCommand::Circle { .. }))
            .count();
        assert_eq!(circles, 50);
        assert!(engine.frame().has_text("T = 300 K"));
    }
}
