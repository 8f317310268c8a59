//!
//! Personal Identifiable Information protection.
//!
//! Wrapper types and traits for secret management which help ensure they aren't accidentally
//! copied, logged, or otherwise exposed, plus the [`LogFilter`] applied to every diagnostic
//! line the gateway clients emit.
//!

mod abs;
mod filter;
mod secret;
mod strategy;

pub use abs::{ExposeInterface, ExposeOptionInterface, PeekInterface};
pub use filter::{last_four, LogFilter, FILTERED};
pub use secret::Secret;
pub use strategy::{CardNumber, Strategy, WithType, WithoutType};
