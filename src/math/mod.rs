pub mod aabb_2d;
pub mod distance_2d;
pub mod intersect_2d;
pub mod polygon_2d;

pub use aabb_2d::Aabb2;
pub use polygon_2d::Polygon;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;
