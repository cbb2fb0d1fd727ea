pub mod calendar;
pub mod descriptor;
pub mod error;
pub mod period;
pub mod range;

pub use calendar::*;
pub use descriptor::*;
pub use error::*;
pub use period::*;
pub use range::*;
