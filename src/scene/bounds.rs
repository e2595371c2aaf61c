use glam::Vec3;

use crate::structure::Atom;

/// Extent used when the atom set is empty or collapses to a point.
pub const FALLBACK_MAX_DIMENSION: f32 = 10.0;

/// Axis-aligned bounds of a structure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneBounds {
    /// Box center.
    pub center: Vec3,
    /// Box extent along each axis.
    pub size: Vec3,
    /// Largest of the three extents; never zero.
    pub max_dimension: f32,
}

impl Default for SceneBounds {
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            size: Vec3::splat(FALLBACK_MAX_DIMENSION),
            max_dimension: FALLBACK_MAX_DIMENSION,
        }
    }
}

impl SceneBounds {
    /// Bounds of every atom, hidden or not.
    #[must_use]
    pub fn from_atoms(atoms: &[Atom]) -> Self {
        Self::from_points(atoms.iter().map(Atom::position))
    }

    /// Bounds of a point set. Non-finite points are ignored.
    #[must_use]
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Self {
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        let mut any = false;
        for p in points.into_iter().filter(|p| p.is_finite()) {
            min = min.min(p);
            max = max.max(p);
            any = true;
        }
        if !any {
            return Self::default();
        }

        let size = max - min;
        let center = (min + max) * 0.5;
        let max_dimension = size.max_element();
        if max_dimension > f32::EPSILON {
            Self {
                center,
                size,
                max_dimension,
            }
        } else {
            Self {
                center,
                size: Vec3::splat(FALLBACK_MAX_DIMENSION),
                max_dimension: FALLBACK_MAX_DIMENSION,
            }
        }
    }

    /// The same extent moved to the origin, matching the recentered scene.
    #[must_use]
    pub fn recentered(&self) -> Self {
        Self {
            center: Vec3::ZERO,
            ..*self
        }
    }

    /// Translation that moves the center to the origin.
    #[must_use]
    pub fn offset(&self) -> Vec3 {
        -self.center
    }
}
