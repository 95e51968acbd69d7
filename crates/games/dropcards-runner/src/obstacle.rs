use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Cactus,
    Rock,
    Spike,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 3] = [
        ObstacleKind::Cactus,
        ObstacleKind::Rock,
        ObstacleKind::Spike,
    ];

    /// Draw `(width, height)` for this kind.
    fn roll_size(self, rng: &mut impl Rng) -> (f32, f32) {
        match self {
            ObstacleKind::Cactus => (12.0, rng.random_range(30.0..48.0)),
            ObstacleKind::Rock => (rng.random_range(20.0..30.0), rng.random_range(16.0..26.0)),
            ObstacleKind::Spike => (14.0, rng.random_range(22.0..34.0)),
        }
    }
}

/// A ground obstacle. `x` is its left edge; it stands on the ground line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    pub x: f32,
    pub width: f32,
    pub height: f32,
}

impl Obstacle {
    /// Spawn a random obstacle at `x`.
    pub fn spawn(id: u32, x: f32, rng: &mut impl Rng) -> Self {
        let kind = ObstacleKind::ALL[rng.random_range(0..ObstacleKind::ALL.len())];
        let (width, height) = kind.roll_size(rng);
        Self {
            id,
            kind,
            x,
            width,
            height,
        }
    }
}

/// Axis-aligned box, `left < right`, `top < bottom`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Aabb {
    /// Strict overlap; touching edges do not collide.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.right > other.left
            && self.left < other.right
            && self.bottom > other.top
            && self.top < other.bottom
    }

    /// Runner hitbox: trimmed 8 units at the front and 4 at the head.
    pub fn runner(x: f32, y: f32, size: f32) -> Self {
        Self {
            left: x,
            right: x + size - 8.0,
            top: y + 4.0,
            bottom: y + size,
        }
    }

    pub fn obstacle(ob: &Obstacle, ground_y: f32) -> Self {
        Self {
            left: ob.x,
            right: ob.x + ob.width,
            top: ground_y - ob.height,
            bottom: ground_y,
        }
    }
}
