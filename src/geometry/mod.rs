mod hull;
mod plane;

pub use hull::convex_hull;
pub use plane::Plane;
