use serde::{Deserialize, Serialize};

/// One cosmetic particle (explosion debris, ice shard, confetti).
/// Positions are in the game's own view units, velocities per frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub size: f32,
    /// Opacity in `[0, 1]`; the particle is culled at zero.
    pub life: f32,
    /// Degrees.
    pub rotation: f32,
    /// Index into the caller's palette.
    pub tint: u8,
}

/// Shape of a radial burst.
#[derive(Debug, Clone, Copy)]
pub struct Burst {
    pub count: usize,
    pub origin: (f32, f32),
    /// Distance from the origin particles start at.
    pub spawn_radius: f32,
    pub speed: (f32, f32),
    pub size: (f32, f32),
    /// Random angular jitter added to each evenly spaced angle (radians).
    pub jitter: f32,
    pub palette_len: u8,
}

/// Per-frame motion rules.
#[derive(Debug, Clone, Copy)]
pub struct ParticleMotion {
    pub gravity: f32,
    pub fade: f32,
    pub shrink: f32,
    pub spin: f32,
}

/// Spawn `count` particles on evenly spaced angles around the origin.
/// Scatter is cosmetic and drawn from `fastrand`.
pub fn radial_burst(burst: &Burst) -> Vec<Particle> {
    let n = burst.count.max(1) as f32;
    (0..burst.count)
        .map(|i| {
            let angle = std::f32::consts::TAU * i as f32 / n + fastrand::f32() * burst.jitter;
            let speed = lerp(burst.speed, fastrand::f32());
            Particle {
                x: burst.origin.0 + angle.cos() * burst.spawn_radius,
                y: burst.origin.1 + angle.sin() * burst.spawn_radius,
                vx: angle.cos() * speed,
                vy: angle.sin() * speed,
                size: lerp(burst.size, fastrand::f32()),
                life: 1.0,
                rotation: fastrand::f32() * 360.0,
                tint: if burst.palette_len == 0 {
                    0
                } else {
                    fastrand::u8(0..burst.palette_len)
                },
            }
        })
        .collect()
}

/// Advance every particle one frame and drop the ones that faded out.
pub fn step_particles(particles: &mut Vec<Particle>, motion: &ParticleMotion) {
    for p in particles.iter_mut() {
        p.x += p.vx;
        p.y += p.vy;
        p.vy += motion.gravity;
        p.life -= motion.fade;
        p.size *= motion.shrink;
        p.rotation += motion.spin;
    }
    particles.retain(|p| p.life > 0.0);
}

fn lerp(range: (f32, f32), t: f32) -> f32 {
    range.0 + (range.1 - range.0) * t
}
