//! AWS-oriented adapters and handlers for the config recorder override producer.
//!
//! Handlers are synchronous and talk to AWS only through the traits in
//! [`adapters`]; the `override_producer` binary supplies SDK-backed
//! implementations. Domain contracts live in `recorder_override_core`.

pub mod adapters;
pub mod handlers;
pub mod logging;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;
