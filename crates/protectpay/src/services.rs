//! The remote procedure seam of the SOAP client.
//!
//! [`ProtectPayClient`](crate::ProtectPayClient) builds complete SOAP envelopes and hands
//! them to an [`SpsService`]; [`HttpSpsService`] posts them to the gateway.

use std::fmt;

use async_trait::async_trait;
use error_stack::{report, ResultExt};
use masking::{LogFilter, PeekInterface};
use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::{
    configs::ProtectPayConfig,
    connector::protectpay::transformers,
    errors::{CustomResult, ProtectPayError},
    logger,
};

const SOAP_CONTENT_TYPE: &str = "text/xml; charset=utf-8";
const SOAP_ACTION: &str = "SOAPAction";
const SOAP_ACTION_BASE: &str = "http://propay.com/SPS/contracts/SPSService";

/// Operations of the ProtectPay `SPSService` contract this crate calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum SpsOperation {
    CreatePayer,
    CreatePayerWithData,
    EditPayerV2,
    DeletePayer,
    GetPayers,
    CreatePaymentMethod,
    EditPaymentMethod,
    DeletePaymentMethod,
    GetAllPayerPaymentMethods,
    GetPayerPaymentMethod,
    AuthorizePaymentMethodTransaction,
    AuthorizePaymentMethodTransactionRecurring,
    ProcessPaymentMethodTransaction,
    ProcessPaymentMethodTransactionRecurring,
    CreditPayment,
    CapturePaymentV2,
    VoidPaymentV2,
    RefundPaymentV2,
    GetTempToken,
    CreateMerchantProfile,
}

impl SpsOperation {
    /// Value of the `SOAPAction` header, quoted as SOAP 1.1 requires.
    pub fn soap_action(self) -> String {
        format!("\"{SOAP_ACTION_BASE}/{self}\"")
    }
}

/// One SOAP call ready to be sent.
///
/// The envelope carries the authentication token, so `Debug` prints its length only.
#[derive(Clone)]
pub struct SpsRequest {
    pub operation: SpsOperation,
    pub envelope: String,
    /// Values of this call that must not reach the logs, such as a card security code.
    pub sensitive_values: Vec<String>,
}

impl fmt::Debug for SpsRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpsRequest")
            .field("operation", &self.operation)
            .field("envelope_len", &self.envelope.len())
            .field("sensitive_values", &self.sensitive_values.len())
            .finish()
    }
}

#[async_trait]
pub trait SpsService: Send + Sync {
    /// Performs the call and returns the raw response envelope.
    async fn invoke(&self, request: SpsRequest) -> CustomResult<String, ProtectPayError>;
}

/// SOAP 1.1 over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSpsService {
    endpoint: Url,
    http_client: reqwest::Client,
    log_filter: LogFilter,
}

impl HttpSpsService {
    pub fn new(config: &ProtectPayConfig) -> CustomResult<Self, ProtectPayError> {
        let endpoint = config.endpoint_url()?;
        let http_client = reqwest::Client::builder()
            .connect_timeout(config.timeout())
            .timeout(config.timeout())
            .build()
            .change_context(ProtectPayError::ClientBuildFailed)?;

        Ok(Self {
            endpoint,
            http_client,
            log_filter: LogFilter::new([config.authentication_token.peek().clone()]),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl SpsService for HttpSpsService {
    async fn invoke(&self, request: SpsRequest) -> CustomResult<String, ProtectPayError> {
        let SpsRequest {
            operation,
            envelope,
            sensitive_values,
        } = request;
        let log_filter = self.log_filter.clone().with_terms(sensitive_values);
        let soap_action = operation.soap_action();
        logger::debug!(
            method = "POST",
            url = %self.endpoint,
            headers = %format!("{CONTENT_TYPE}: {SOAP_CONTENT_TYPE}, {SOAP_ACTION}: {soap_action}"),
            body = %log_filter.filter(&envelope),
            "protectpay request"
        );

        let response = self
            .http_client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, SOAP_CONTENT_TYPE)
            .header(SOAP_ACTION, soap_action)
            .body(envelope)
            .send()
            .await
            .map_err(|error| report!(ProtectPayError::Transport(error)))
            .attach_printable_lazy(|| format!("{operation} at {}", self.endpoint))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|error| report!(ProtectPayError::Transport(error)))?;
        logger::debug!(
            %operation,
            status = status.as_u16(),
            body = %log_filter.filter(&text),
            "protectpay response"
        );

        if status.is_success() {
            Ok(text)
        } else {
            let (code, message) = transformers::parse_fault(&text)
                .map(|fault| (fault.faultcode, fault.faultstring))
                .unwrap_or_else(|| (None, Some(text).filter(|text| !text.is_empty())));
            Err(report!(ProtectPayError::Fault {
                status_code: status.as_u16(),
                code,
                message,
            }))
            .attach_printable_lazy(|| format!("operation: {operation}"))
        }
    }
}
