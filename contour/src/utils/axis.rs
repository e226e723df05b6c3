use std::ops::Index;

use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn all() -> impl Iterator<Item = Self> {
        [Self::X, Self::Y, Self::Z].into_iter()
    }

    /// Returns the axis along which `extent` is the largest; ties go to the
    /// earlier axis.
    pub fn longest(extent: Vec3) -> Self {
        let mut axis = Self::X;

        if extent.y > extent.x {
            axis = Self::Y;
        }

        if extent.z > extent[axis] {
            axis = Self::Z;
        }

        axis
    }
}

impl Index<Axis> for Vec3 {
    type Output = f32;

    fn index(&self, index: Axis) -> &Self::Output {
        match index {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }
}
