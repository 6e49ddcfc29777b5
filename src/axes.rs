use glam::Vec3;
use std::ops::Range;

use crate::types::{AxisVertex, ColorUniform};

/// Each axis is drawn from `-AXIS_HALF_LENGTH` to `+AXIS_HALF_LENGTH`
pub const AXIS_HALF_LENGTH: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub const fn index(self) -> u32 {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    pub const fn direction(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }

    /// X red, Y green, Z blue
    pub const fn color(self) -> ColorUniform {
        match self {
            Axis::X => ColorUniform::new([1.0, 0.0, 0.0, 1.0]),
            Axis::Y => ColorUniform::new([0.0, 1.0, 0.0, 1.0]),
            Axis::Z => ColorUniform::new([0.0, 0.0, 1.0, 1.0]),
        }
    }

    /// Two-vertex slice of the axis vertex buffer
    pub const fn vertex_range(self) -> Range<u32> {
        let first = self.index() * 2;
        first..first + 2
    }
}

/// Line-list vertices for all three axes, in `Axis::ALL` order
pub fn axis_vertices(half_length: f32) -> Vec<AxisVertex> {
    Axis::ALL
        .iter()
        .flat_map(|axis| {
            let extent = axis.direction() * half_length;
            [
                AxisVertex::new((-extent).to_array()),
                AxisVertex::new(extent.to_array()),
            ]
        })
        .collect()
}
