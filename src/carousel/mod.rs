mod runtime;
mod state;

pub use runtime::{BehaviorRuntime, PointerRuntime, RuntimeError};
pub use state::{Carousel, SLIDE_COUNT};
