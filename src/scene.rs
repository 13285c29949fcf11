use rand::Rng;

use crate::curve;
use crate::group::{Motion, ParticleGroup};
use crate::particle::RenderPoint;
use crate::render::Renderable;

/// Samples along the outer decorative ring.
const RING_SAMPLES: u32 = 80;
/// Samples along the contour shared by every filled layer.
const CONTOUR_SAMPLES: u32 = 110;
/// Concentric drifting passes filling the heart body.
const CONTOUR_LAYERS: u32 = 10;

const RING_COLOR: [u8; 4] = [255, 240, 240, 100];
const CONTOUR_RGB: [u8; 3] = [240, 103, 152];

const RING_RADIUS: f32 = 0.15;
const RING_SIZE: f32 = 0.35;
const RING_SPEED: f32 = 0.2;
const RING_PARTICLES: usize = 100;

const CONTOUR_RADIUS: f32 = 0.08;

/// The full, immutable set of particle groups in draw order: ten filled
/// drift layers first, the pulsing ring on top.
pub struct Scene {
    groups: Vec<ParticleGroup>,
}

impl Scene {
    pub fn build(rng: &mut impl Rng) -> Self {
        let mut groups = Vec::new();

        let contour = curve::heart_curve(CONTOUR_SAMPLES);
        for layer in 0..CONTOUR_LAYERS {
            for point in contour.iter().take(CONTOUR_SAMPLES as usize) {
                // Thin the contour near the vertical midline on most passes;
                // the inner layers would otherwise pile up there.
                if (-1.0..=1.0).contains(&point.x) && layer % 4 != 0 {
                    continue;
                }

                let mut group = ParticleGroup::new(
                    ((layer + 2) * (layer + 1)) as usize,
                    [
                        CONTOUR_RGB[0],
                        CONTOUR_RGB[1],
                        CONTOUR_RGB[2],
                        (15 * (layer + 1)).min(255) as u8,
                    ],
                    Motion::Drift,
                    CONTOUR_RADIUS,
                    0.05 + 0.035 * layer as f32,
                    0.05 * (10 - layer) as f32,
                );
                group.set_emitter(*point, rng);
                groups.push(group);
            }
        }

        let ring = curve::heart_curve(RING_SAMPLES);
        for point in ring.iter().take(RING_SAMPLES as usize) {
            let mut group = ParticleGroup::new(
                RING_PARTICLES,
                RING_COLOR,
                Motion::Pulse,
                RING_RADIUS,
                RING_SIZE,
                RING_SPEED,
            );
            group.set_emitter(*point, rng);
            groups.push(group);
        }

        Self { groups }
    }

    /// Advance every group by one frame. Groups do not interact, so the
    /// iteration order is irrelevant here.
    pub fn update(&mut self, elapsed: f32, tick: u32, rng: &mut impl Rng) {
        for group in &mut self.groups {
            group.update(elapsed, tick, rng);
        }
    }

    /// Flatten every group's points into `out` in draw order.
    pub fn collect_points(&self, out: &mut Vec<RenderPoint>) {
        out.clear();
        for group in &self.groups {
            out.extend_from_slice(group.points());
        }
    }

    pub fn point_count(&self) -> usize {
        self.groups.iter().map(|group| group.points().len()).sum()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}
