use glam::Vec3;

use crate::style::Color;

/// A styled line between two world-space points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    /// First endpoint.
    pub start: Vec3,
    /// Second endpoint.
    pub end: Vec3,
    /// Line color.
    pub color: Color,
    /// Width in pixels.
    pub width: f32,
    /// Dashed or solid.
    pub dashed: bool,
}

impl LineSegment {
    /// World-space length.
    #[must_use]
    pub fn length(&self) -> f32 {
        (self.end - self.start).length()
    }

    /// Pack for the line pass.
    #[must_use]
    pub fn to_instance(&self) -> LineInstance {
        LineInstance {
            start: [self.start.x, self.start.y, self.start.z, self.width],
            end: [
                self.end.x,
                self.end.y,
                self.end.z,
                if self.dashed { 1.0 } else { 0.0 },
            ],
            color: self.color.to_array(),
        }
    }
}

/// Per-segment instance for the line pass.
/// Must match the WGSL `LineInstance` struct layout.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineInstance {
    /// xyz = start, w = width in pixels
    pub start: [f32; 4],
    /// xyz = end, w = 1.0 when dashed
    pub end: [f32; 4],
    /// RGBA color
    pub color: [f32; 4],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_width_and_dash_flag() {
        let seg = LineSegment {
            start: Vec3::ZERO,
            end: Vec3::new(3.0, 4.0, 0.0),
            color: Color::WHITE,
            width: 2.0,
            dashed: true,
        };
        assert_eq!(seg.length(), 5.0);
        let inst = seg.to_instance();
        assert_eq!(inst.start[3], 2.0);
        assert_eq!(inst.end[3], 1.0);
        assert_eq!(inst.color, [1.0; 4]);
        assert_eq!(size_of::<LineInstance>(), 48);
    }
}
