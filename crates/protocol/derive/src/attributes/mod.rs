//! Module containing the [AttributesBuilder] trait implementations.
//!
//! [AttributesBuilder]: crate::traits::AttributesBuilder

mod clock;
#[cfg(feature = "std")]
pub use clock::SystemClock;
pub use clock::{FixedClock, WallClock};

mod stateful;
pub use stateful::{BuildMode, MAX_TIMESTAMP_LAG, StatefulAttributesBuilder};
