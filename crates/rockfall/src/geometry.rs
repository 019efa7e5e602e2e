// crates/rockfall/src/geometry.rs

use glam::Vec2;

/// Axis-aligned rectangle. +X goes left to right, +Y bottom to top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size.abs() * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Overlap on both axes. Touching edges count as overlapping.
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Same center, each half-extent multiplied by `factor`.
    /// A factor of 1.0 returns `self` unchanged; zero or negative collapses to the center.
    pub fn scale_around_center(&self, factor: f32) -> Bounds {
        let center = self.center();
        if factor <= 0.0 {
            return Bounds {
                min: center,
                max: center,
            };
        }

        // Move each corner toward the center by (1 - factor) of the way.
        let t = 1.0 - factor;
        Bounds {
            min: self.min + (center - self.min) * t,
            max: self.max + (center - self.max) * t,
        }
    }
}
