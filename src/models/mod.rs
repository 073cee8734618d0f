pub mod enums;
pub mod filters;
pub mod practitioner;

pub use enums::*;
pub use filters::*;
pub use practitioner::*;
