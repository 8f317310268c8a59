pub mod requests;
pub mod responses;
pub mod transformers;

use std::sync::Arc;

use error_stack::{report, ResultExt};
use masking::{LogFilter, PeekInterface, FILTERED};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use url::{form_urlencoded, Url};

use self::requests::{
    CaptureRequest, CreditRequest, PayVisionRequest, PaymentRequest, QueryRequest, RefundRequest,
    UpdateRequest, ValidateRequest, VoidRequest,
};
use crate::{
    configs::PayVisionConfig,
    errors::{CustomResult, PayVisionError},
    logger,
    types::{PayVisionResponse, TransactionDetail},
};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Shape of the body the gateway answers with. Chosen per call, never sniffed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    /// `key=value&key=value`
    KeyValue,
    Xml,
}

/// Client of one gateway account.
///
/// Holds no per-call state; clone it or share it behind an `Arc` across tasks.
#[derive(Debug, Clone)]
pub struct PayVisionClient {
    config: Arc<PayVisionConfig>,
    transact_url: Url,
    query_url: Url,
    http_client: reqwest::Client,
    log_filter: LogFilter,
}

impl PayVisionClient {
    pub fn new(config: PayVisionConfig) -> CustomResult<Self, PayVisionError> {
        let (transact_url, query_url) = config.parsed_urls()?;
        let http_client = reqwest::Client::builder()
            .connect_timeout(config.timeout())
            .timeout(config.timeout())
            .build()
            .change_context(PayVisionError::ClientBuildFailed)?;

        let password = config.password.peek();
        let encoded_password = form_urlencoded::byte_serialize(password.as_bytes()).collect::<String>();
        let log_filter = LogFilter::new([password.clone(), encoded_password]);

        Ok(Self {
            config: Arc::new(config),
            transact_url,
            query_url,
            http_client,
            log_filter,
        })
    }

    pub fn from_env() -> CustomResult<Self, PayVisionError> {
        Self::new(PayVisionConfig::from_env()?)
    }

    pub fn config(&self) -> &PayVisionConfig {
        &self.config
    }

    /// Sends `request` and parses the reply. Transactions go to the transact endpoint and
    /// answer with key/value pairs, queries go to the query endpoint and answer with XML.
    pub async fn process(
        &self,
        request: &PayVisionRequest,
    ) -> CustomResult<PayVisionResponse, PayVisionError> {
        let (url, format) = match request {
            PayVisionRequest::Query(_) => (&self.query_url, ResponseFormat::Xml),
            _ => (&self.transact_url, ResponseFormat::KeyValue),
        };
        let body = transformers::encode_request(&self.config, request)?;
        let raw = self.post(url, body, request.sensitive_values()).await?;
        Self::parse(&raw, format)
    }

    pub async fn sale(&self, request: PaymentRequest) -> CustomResult<PayVisionResponse, PayVisionError> {
        self.process(&PayVisionRequest::Sale(request)).await
    }

    pub async fn auth(&self, request: PaymentRequest) -> CustomResult<PayVisionResponse, PayVisionError> {
        self.process(&PayVisionRequest::Auth(request)).await
    }

    pub async fn capture(&self, request: CaptureRequest) -> CustomResult<PayVisionResponse, PayVisionError> {
        self.process(&PayVisionRequest::Capture(request)).await
    }

    pub async fn void(&self, request: VoidRequest) -> CustomResult<PayVisionResponse, PayVisionError> {
        self.process(&PayVisionRequest::Void(request)).await
    }

    pub async fn refund(&self, request: RefundRequest) -> CustomResult<PayVisionResponse, PayVisionError> {
        self.process(&PayVisionRequest::Refund(request)).await
    }

    pub async fn credit(&self, request: CreditRequest) -> CustomResult<PayVisionResponse, PayVisionError> {
        self.process(&PayVisionRequest::Credit(request)).await
    }

    pub async fn validate(&self, request: ValidateRequest) -> CustomResult<PayVisionResponse, PayVisionError> {
        self.process(&PayVisionRequest::Validate(request)).await
    }

    pub async fn update(&self, request: UpdateRequest) -> CustomResult<PayVisionResponse, PayVisionError> {
        self.process(&PayVisionRequest::Update(request)).await
    }

    /// Looks up transactions; the response describes the first match.
    pub async fn query(&self, request: QueryRequest) -> CustomResult<PayVisionResponse, PayVisionError> {
        self.process(&PayVisionRequest::Query(request)).await
    }

    /// Looks up transactions and returns every match.
    pub async fn query_all(
        &self,
        request: QueryRequest,
    ) -> CustomResult<Vec<TransactionDetail>, PayVisionError> {
        let request = PayVisionRequest::Query(request);
        let body = transformers::encode_request(&self.config, &request)?;
        let raw = self.post(&self.query_url, body, Vec::new()).await?;
        let response = transformers::parse_query_response(&raw)?;
        Ok(response
            .transactions
            .into_iter()
            .map(TransactionDetail::from)
            .collect())
    }

    fn parse(raw: &str, format: ResponseFormat) -> CustomResult<PayVisionResponse, PayVisionError> {
        match format {
            ResponseFormat::KeyValue => Ok(transformers::parse_payments_response(raw)),
            ResponseFormat::Xml => transformers::parse_query_response(raw).map(PayVisionResponse::from),
        }
    }

    async fn post(
        &self,
        url: &Url,
        body: String,
        sensitive_values: Vec<String>,
    ) -> CustomResult<String, PayVisionError> {
        let log_filter = self.log_filter.clone().with_terms(sensitive_values);
        logger::debug!(
            method = "POST",
            url = %url,
            headers = %format!("{CONTENT_TYPE}: {FORM_CONTENT_TYPE}, {AUTHORIZATION}: Basic {FILTERED}"),
            body = %log_filter.filter(&body),
            "gateway request"
        );

        let response = self
            .http_client
            .post(url.clone())
            .basic_auth(&self.config.username, Some(self.config.password.peek()))
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(|error| report!(PayVisionError::Transport(error)))
            .attach_printable_lazy(|| format!("POST {url}"))?;

        let status = response.status();
        if status.is_success() {
            let text = response
                .text()
                .await
                .map_err(|error| report!(PayVisionError::Transport(error)))?;
            logger::debug!(status = status.as_u16(), body = %log_filter.filter(&text), "gateway response");
            Ok(text)
        } else {
            let text = match response.text().await {
                Ok(text) => Some(text).filter(|text| !text.is_empty()),
                Err(error) => {
                    logger::warn!(%error, "failed to read the gateway error body");
                    None
                }
            };
            logger::debug!(
                status = status.as_u16(),
                body = %log_filter.filter(text.as_deref().unwrap_or_default()),
                "gateway error response"
            );
            Err(report!(PayVisionError::from_http_status(status.as_u16(), text)))
        }
    }
}
