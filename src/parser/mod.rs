pub mod lines;
pub mod record;

pub use lines::*;
pub use record::*;
