//! Worker thread primitives.
//!
//! Background work in marquee runs on dedicated OS threads tagged with a
//! [`TaskClass`] so trace output shows what kind of work each thread does.

mod class;
mod panic;
mod spawn;

pub use class::TaskClass;
pub use panic::panic_message;
pub use spawn::spawn_named_thread;
