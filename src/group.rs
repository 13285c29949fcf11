use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use crate::particle::{Particle, RenderPoint};
use crate::render::Renderable;

/// World offset placing the curve inside the 30x30 view.
pub const EMITTER_OFFSET: Vec2 = Vec2::splat(15.0);

/// Seconds of remaining lifetime that map to full opacity in pulse mode.
pub const BASE_LIFETIME: f32 = 2.0;

/// Exclusive upper bound on a freshly rolled lifetime, seconds.
pub const MAX_LIFETIME: f32 = 2.5;

/// Per-update drift translation scale. Tick-based, so drift speed follows
/// the frame rate rather than the wall clock.
pub const DRIFT_STEP: f32 = 0.0003;

/// Updates between direction reversals in either mode.
const REVERSAL_PERIOD: u32 = 100;

/// Update policy of a group, fixed at construction.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    /// Lifetime-driven respawn and fade around an oscillating radius.
    Pulse,
    /// Whole-group translation that reverses every hundred ticks.
    Drift,
}

/// A fixed-size particle collection sharing one emitter, one base color and
/// one update policy, plus the index-aligned points it renders as.
pub struct ParticleGroup {
    particles: Vec<Particle>,
    points: Vec<RenderPoint>,

    motion: Motion,
    emitter: Vec2,
    velocity: Vec2,
    radius: f32,
    size: f32,
    speed: f32,
}

impl ParticleGroup {
    pub fn new(
        count: usize,
        color: [u8; 4],
        motion: Motion,
        radius: f32,
        size: f32,
        speed: f32,
    ) -> Self {
        Self {
            particles: vec![Particle::default(); count],
            points: vec![
                RenderPoint {
                    position: Vec2::ZERO,
                    color,
                };
                count
            ],

            motion,
            emitter: Vec2::ZERO,
            velocity: Vec2::ZERO,
            radius,
            size,
            speed,
        }
    }

    /// Anchor the group at a sampled curve point and roll every particle.
    ///
    /// The raw curve point doubles as the drift direction.
    pub fn set_emitter(&mut self, point: Vec2, rng: &mut impl Rng) {
        self.emitter = point * self.size + EMITTER_OFFSET;
        self.velocity = point;
        for index in 0..self.particles.len() {
            self.reset_particle(index, self.radius, rng);
        }
    }

    /// Respawn one particle: fresh velocity and lifetime, point moved back
    /// onto the ring at `radius` around the emitter.
    fn reset_particle(&mut self, index: usize, radius: f32, rng: &mut impl Rng) {
        let angle = rng.gen_range(0.0..TAU);
        let speed = rng.gen_range(1.0f32..=10.0);

        let particle = &mut self.particles[index];
        particle.velocity = Vec2::new(angle.cos(), angle.sin()) * speed;
        particle.lifetime = rng.gen_range(0.0..MAX_LIFETIME);

        self.points[index].position = self.emitter + particle.velocity * radius;
    }

    /// Advance the group by one frame.
    pub fn update(&mut self, elapsed: f32, tick: u32, rng: &mut impl Rng) {
        debug_assert_eq!(self.particles.len(), self.points.len());

        match self.motion {
            Motion::Pulse => {
                if tick % REVERSAL_PERIOD == REVERSAL_PERIOD - 1 {
                    self.radius += self.speed;
                    self.speed = -self.speed;
                }

                for index in 0..self.particles.len() {
                    self.particles[index].lifetime -= elapsed;
                    if self.particles[index].lifetime <= 0.0 {
                        self.reset_particle(index, self.radius, rng);
                        self.points[index].color[3] = u8::MAX;
                    } else {
                        // A fresh lifetime may exceed BASE_LIFETIME, hence
                        // the clamp; alpha only decays between respawns.
                        let ratio = self.particles[index].lifetime / BASE_LIFETIME;
                        self.points[index].color[3] = (ratio.min(1.0) * 255.0) as u8;
                    }
                }
            }
            Motion::Drift => {
                if tick % REVERSAL_PERIOD == REVERSAL_PERIOD - 1 {
                    self.velocity = -self.velocity;
                }

                for point in &mut self.points {
                    point.position += self.velocity * DRIFT_STEP;
                }
            }
        }
    }
}

impl Renderable for ParticleGroup {
    fn points(&self) -> &[RenderPoint] {
        &self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const DT: f32 = 1.0 / 60.0;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn pulse_group(rng: &mut StdRng) -> ParticleGroup {
        let mut group = ParticleGroup::new(100, [255, 240, 240, 100], Motion::Pulse, 0.15, 0.35, 0.2);
        group.set_emitter(Vec2::new(2.0, -3.0), rng);
        group
    }

    #[test]
    fn test_particles_and_points_stay_aligned() {
        let mut rng = rng();
        let mut group = pulse_group(&mut rng);
        assert_eq!(group.particles.len(), group.points.len());

        for tick in 0..250 {
            group.update(DT, tick, &mut rng);
            assert_eq!(group.particles.len(), group.points.len());
        }
    }

    #[test]
    fn test_reset_rolls_within_bounds() {
        let mut rng = rng();
        let group = pulse_group(&mut rng);

        for (particle, point) in group.particles.iter().zip(&group.points) {
            assert!(particle.lifetime >= 0.0 && particle.lifetime < MAX_LIFETIME);
            let speed = particle.velocity.length();
            assert!(
                speed > 1.0 - 1e-4 && speed < 10.0 + 1e-4,
                "speed {speed} out of range"
            );
            let expected = group.emitter + particle.velocity * group.radius;
            assert_eq!(point.position, expected);
        }
    }

    #[test]
    fn test_respawn_snaps_alpha_to_full() {
        let mut rng = rng();
        let mut group = pulse_group(&mut rng);

        group.particles[0].lifetime = 0.0;
        group.points[0].color[3] = 0;
        group.update(DT, 0, &mut rng);

        assert_eq!(group.points[0].color[3], u8::MAX);
        assert!(group.particles[0].lifetime >= 0.0 && group.particles[0].lifetime < MAX_LIFETIME);
    }

    #[test]
    fn test_alpha_fades_between_respawns() {
        let mut rng = rng();
        let mut group = pulse_group(&mut rng);

        // 30 updates at DT stay well short of the 2s base lifetime.
        group.particles[0].lifetime = BASE_LIFETIME;
        let mut previous = u8::MAX;
        for tick in 0..30 {
            group.update(DT, tick, &mut rng);
            let alpha = group.points[0].color[3];
            assert!(alpha <= previous, "alpha rose from {previous} to {alpha}");
            previous = alpha;
        }
        assert!(previous < u8::MAX);
    }

    #[test]
    fn test_radius_flips_on_the_hundredth_update() {
        let mut rng = rng();
        let mut group = pulse_group(&mut rng);

        for tick in 0..99 {
            group.update(DT, tick, &mut rng);
        }
        assert_eq!(group.radius, 0.15);
        assert_eq!(group.speed, 0.2);

        group.update(DT, 99, &mut rng);
        assert_eq!(group.radius, 0.15 + 0.2);
        assert_eq!(group.speed, -0.2);
    }

    #[test]
    fn test_radius_oscillates_with_period_200() {
        let mut rng = rng();
        let mut group = pulse_group(&mut rng);
        let initial = group.radius;

        for tick in 0..200 {
            group.update(DT, tick, &mut rng);
        }
        assert!((group.radius - initial).abs() < 1e-6);
        assert_eq!(group.speed, 0.2);
    }

    #[test]
    fn test_drift_moves_points_by_fixed_step() {
        let mut rng = rng();
        let mut group = ParticleGroup::new(12, [240, 103, 152, 30], Motion::Drift, 0.08, 0.05, 0.5);
        group.set_emitter(Vec2::new(1.0, 0.0), &mut rng);

        let before: Vec<Vec2> = group.points.iter().map(|p| p.position).collect();
        group.update(DT, 0, &mut rng);

        for (old, point) in before.iter().zip(&group.points) {
            assert_eq!(point.position.x, old.x + DRIFT_STEP);
            assert_eq!(point.position.y, old.y);
        }
    }

    #[test]
    fn test_drift_reverses_every_hundred_ticks() {
        let mut rng = rng();
        let mut group = ParticleGroup::new(4, [240, 103, 152, 30], Motion::Drift, 0.08, 0.05, 0.5);
        group.set_emitter(Vec2::new(1.0, -2.0), &mut rng);

        group.update(DT, 98, &mut rng);
        assert_eq!(group.velocity, Vec2::new(1.0, -2.0));

        group.update(DT, 99, &mut rng);
        assert_eq!(group.velocity, Vec2::new(-1.0, 2.0));

        group.update(DT, 199, &mut rng);
        assert_eq!(group.velocity, Vec2::new(1.0, -2.0));
    }
}
