//! Client for NMI-compatible payment gateways.
//!
//! Requests are posted as `application/x-www-form-urlencoded` bodies to the transact
//! endpoint, or to the query endpoint for transaction lookups. Transaction responses come
//! back as `key=value&...` text, query responses as an XML document.

#[macro_use]
mod macros;

pub mod configs;
pub mod connector;
pub mod errors;
pub mod types;
mod utils;

pub(crate) use tracing as logger;

pub use configs::PayVisionConfig;
pub use connector::payvision::{
    requests::{
        BillingInfo, BillingMethod, CaptureRequest, CreditCard, CreditRequest, OrderInfo,
        PayVisionRequest, PaymentDescriptor, PaymentRequest, ProcessorInfo, QueryRequest,
        RefundRequest, ReportType, ShippingCarrier, ShippingInfo, TransactionType, UpdateRequest,
        ValidateRequest, VoidReason, VoidRequest,
    },
    transformers::{parse_key_value, to_form_body},
    PayVisionClient, ResponseFormat,
};
pub use errors::{CustomResult, FieldError, PayVisionError};
pub use types::{
    Action, ActionType, Address, AvsResponse, CheckDetail, Condition, CustomerDetail, CvvResponse,
    PayVisionResponse, PaymentMethodKind, ResponseCode, ShippingDetail, TransactionDetail,
    TransactionStatus,
};
