//! Cut-and-paste operations: caps are removed, added or turned in place.

mod augment;
mod diminish;
mod gyrate;
mod templates;
mod utils;

pub use augment::Augment;
pub use diminish::Diminish;
pub use gyrate::Gyrate;
pub use utils::{get_cap_alignment, get_cupola_gyrate};
