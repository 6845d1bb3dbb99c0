/// Component access, `DVec3` conversions and `approx` comparisons shared by
/// `Point3` and `Vector3`.
macro_rules! impl_components {
    ($ty:ty) => {
        impl std::ops::Index<usize> for $ty {
            type Output = f64;

            fn index(&self, index: usize) -> &f64 {
                match index {
                    0 => &self.x,
                    1 => &self.y,
                    2 => &self.z,
                    _ => panic!("component index {} out of range for {}", index, stringify!($ty)),
                }
            }
        }

        impl approx::AbsDiffEq for $ty {
            type Epsilon = f64;

            fn default_epsilon() -> f64 {
                <f64 as approx::AbsDiffEq>::default_epsilon()
            }

            fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
                approx::AbsDiffEq::abs_diff_eq(&self.x, &other.x, epsilon)
                    && approx::AbsDiffEq::abs_diff_eq(&self.y, &other.y, epsilon)
                    && approx::AbsDiffEq::abs_diff_eq(&self.z, &other.z, epsilon)
            }
        }

        impl approx::RelativeEq for $ty {
            fn default_max_relative() -> f64 {
                <f64 as approx::RelativeEq>::default_max_relative()
            }

            fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
                approx::RelativeEq::relative_eq(&self.x, &other.x, epsilon, max_relative)
                    && approx::RelativeEq::relative_eq(&self.y, &other.y, epsilon, max_relative)
                    && approx::RelativeEq::relative_eq(&self.z, &other.z, epsilon, max_relative)
            }
        }

        impl From<$crate::DVec3> for $ty {
            fn from(v: $crate::DVec3) -> Self {
                Self::new(v.x, v.y, v.z)
            }
        }

        impl From<$ty> for $crate::DVec3 {
            fn from(v: $ty) -> Self {
                $crate::DVec3::new(v.x, v.y, v.z)
            }
        }
    };
}

pub mod aabb;
pub mod point;
pub mod transform;
pub mod vector;

pub use glam::{dvec3, DMat4, DVec3};
pub use aabb::Aabb3;
pub use point::Point3;
pub use transform::Transform;
pub use vector::Vector3;
