//! Truncation operations: vertices cut off, faces collapsed to vertices,
//! and the face/vertex swap.

mod dual;
mod rectify;
mod sharpen;
mod truncate;
mod utils;

pub use dual::Dual;
pub use rectify::Rectify;
pub use sharpen::Sharpen;
pub use truncate::Truncate;
