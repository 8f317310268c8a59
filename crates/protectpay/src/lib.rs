//! Client for the ProPay ProtectPay SOAP API.
//!
//! Payers, stored payment methods and transactions are plain structs; the client maps
//! them onto SOAP calls, checks the result code of every reply and maps the reply back.

#[macro_use]
mod macros;

pub mod configs;
pub mod connector;
pub mod errors;
pub mod services;
pub mod types;

pub(crate) use tracing as logger;

pub use configs::{Environment, ProtectPayConfig};
pub use connector::protectpay::ProtectPayClient;
pub use errors::{CustomResult, ProtectPayError};
pub use services::{HttpSpsService, SpsOperation, SpsRequest, SpsService};
pub use types::*;
