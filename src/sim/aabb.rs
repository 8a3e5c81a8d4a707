//! Axis-aligned bounding boxes
//!
//! All hit testing in the runner is box-vs-box. Boxes are stored as
//! min/max corners in whatever space the caller chooses (entity-local for
//! hitbox definitions, world space for tests).

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// An axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box of the given full size centered on `center`
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// True when the box has collapsed on any axis
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min.cmpgt(self.max).any()
    }

    /// Move the box by `offset`
    #[inline]
    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Grow (positive) or shrink (negative) every face by `amount`.
    ///
    /// Shrinking past zero collapses to the center point on that axis.
    pub fn expanded(&self, amount: f32) -> Self {
        let min = self.min - Vec3::splat(amount);
        let max = self.max + Vec3::splat(amount);
        let center = self.center();
        Self {
            min: min.min(center),
            max: max.max(center),
        }
    }

    /// Scale about `pivot`
    pub fn scaled_about(&self, pivot: Vec3, scale: Vec3) -> Self {
        let a = pivot + (self.min - pivot) * scale;
        let b = pivot + (self.max - pivot) * scale;
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Standard overlap test: every axis interval must overlap.
    ///
    /// Touching faces count as overlapping.
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }
}
