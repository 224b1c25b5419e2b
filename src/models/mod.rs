pub mod gameday;
pub mod impact;
pub mod stadium;
pub mod weather;

pub use gameday::*;
pub use impact::*;
pub use stadium::*;
pub use weather::*;
