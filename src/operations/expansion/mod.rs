//! Expansion operations: faces of a regular solid pulled apart (and turned)
//! with the gaps filled by new faces, and the converse contraction.

mod contract;
mod expand;
mod snub;
mod twist;
mod utils;

pub use contract::Contract;
pub use expand::Expand;
pub use snub::Snub;
pub use twist::Twist;
