pub mod axis;
pub mod series;
pub mod state;

pub use axis::*;
pub use series::*;
pub use state::*;
