//! Prism operations: bands of squares or triangles inserted under a cap,
//! removed again, or swapped for each other.

mod elongate;
mod shorten;
mod turn;
mod utils;

pub use elongate::{Elongate, Gyroelongate};
pub use shorten::Shorten;
pub use turn::Turn;
