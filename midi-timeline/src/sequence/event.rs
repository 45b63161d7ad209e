mod absolute;
mod delta;
mod merge_events;

pub use absolute::*;
pub use delta::*;
pub use merge_events::*;
