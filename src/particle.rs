use glam::Vec2;

/// Smallest simulated unit: a respawn velocity and the seconds left to live.
///
/// Lifetime only matters in pulse mode; drifting groups roll it once at
/// emitter setup and never look at it again.
#[derive(Clone, Copy, Default)]
pub struct Particle {
    pub velocity: Vec2,
    pub lifetime: f32,
}

/// One renderable point per particle, index-aligned with its group's
/// particle collection. Uploaded verbatim as vertex data
/// (`Float32x2` position, `Unorm8x4` color).
#[repr(C)]
#[derive(bytemuck::Zeroable, Clone, Copy)]
pub struct RenderPoint {
    pub position: Vec2,
    pub color: [u8; 4],
}

unsafe impl bytemuck::Pod for RenderPoint {}
