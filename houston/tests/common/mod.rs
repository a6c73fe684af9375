#![allow(dead_code, unused_imports)]

pub mod logging;
pub mod sinks;

pub use logging::init_test_logging;
pub use sinks::RecordingSink;
