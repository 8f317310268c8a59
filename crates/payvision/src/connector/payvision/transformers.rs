use std::collections::HashMap;

use error_stack::ResultExt;
use masking::Secret;
use serde::Serialize;
use url::form_urlencoded;

use super::{
    requests::{PayVisionRequest, TransactionType},
    responses::{PayVisionPaymentsResponse, QueryAction, QueryResponse, QueryTransaction},
};
use crate::{
    configs::PayVisionConfig,
    errors::{CustomResult, PayVisionError},
    types::{
        Action, Address, AvsResponse, CheckDetail, Condition, CustomerDetail, CvvResponse,
        PayVisionResponse, PaymentMethodKind, ResponseCode, ShippingDetail, TransactionDetail,
        TransactionStatus,
    },
    utils::{amount, non_empty, timestamp},
};

const PAYMENT_CREDIT_CARD: &str = "creditcard";

/// Credentials and transaction type lead every body, followed by the request's own fields.
#[derive(Serialize)]
struct FormEnvelope<'a, T> {
    username: &'a str,
    password: &'a Secret<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    transaction_type: Option<TransactionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    payment: Option<&'static str>,
    #[serde(flatten)]
    body: &'a T,
}

fn encode<T: Serialize>(
    config: &PayVisionConfig,
    request: &PayVisionRequest,
    body: &T,
) -> CustomResult<String, PayVisionError> {
    let envelope = FormEnvelope {
        username: &config.username,
        password: &config.password,
        transaction_type: request.transaction_type(),
        payment: request.carries_payment().then_some(PAYMENT_CREDIT_CARD),
        body,
    };
    serde_urlencoded::to_string(&envelope)
        .change_context(PayVisionError::RequestEncodingFailed)
        .attach_printable_lazy(|| format!("while encoding a {:?} request", request.transaction_type()))
}

/// Form body sent to the gateway for `request`.
pub fn encode_request(
    config: &PayVisionConfig,
    request: &PayVisionRequest,
) -> CustomResult<String, PayVisionError> {
    match request {
        PayVisionRequest::Sale(body) | PayVisionRequest::Auth(body) => encode(config, request, body),
        PayVisionRequest::Capture(body) => encode(config, request, body),
        PayVisionRequest::Void(body) => encode(config, request, body),
        PayVisionRequest::Refund(body) => encode(config, request, body),
        PayVisionRequest::Credit(body) => encode(config, request, body),
        PayVisionRequest::Validate(body) => encode(config, request, body),
        PayVisionRequest::Update(body) => encode(config, request, body),
        PayVisionRequest::Query(body) => encode(config, request, body),
    }
}

/// Percent-encodes ordered pairs as `key=value&key=value`.
pub fn to_form_body(params: &[(&str, &str)]) -> CustomResult<String, PayVisionError> {
    serde_urlencoded::to_string(params)
        .change_context(PayVisionError::RequestEncodingFailed)
}

/// Splits a `key=value&...` body. Segments without `=` are skipped and a repeated key keeps
/// its last value.
pub fn parse_key_value(body: &str) -> HashMap<String, String> {
    body.trim()
        .split('&')
        .filter(|segment| segment.contains('='))
        .flat_map(|segment| form_urlencoded::parse(segment.as_bytes()))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect()
}

pub fn parse_payments_response(body: &str) -> PayVisionResponse {
    PayVisionPaymentsResponse::from(parse_key_value(body)).into()
}

pub fn parse_query_response(body: &str) -> CustomResult<QueryResponse, PayVisionError> {
    quick_xml::de::from_str::<QueryResponse>(body)
        .change_context(PayVisionError::ResponseDeserializationFailed)
        .attach_printable("query response is not an nm_response document")
}

impl From<PayVisionPaymentsResponse> for PayVisionResponse {
    fn from(item: PayVisionPaymentsResponse) -> Self {
        let status_code = non_empty(item.response);
        Self {
            status: status_code.as_deref().and_then(TransactionStatus::from_code),
            status_code,
            message: non_empty(item.responsetext),
            transaction_id: non_empty(item.transactionid),
            auth_code: non_empty(item.authcode),
            avs_response: non_empty(item.avsresponse).as_deref().map(AvsResponse::from),
            cvv_response: non_empty(item.cvvresponse).as_deref().map(CvvResponse::from),
            order_id: non_empty(item.orderid),
            transaction_type: non_empty(item.transaction_type),
            response_code: non_empty(item.response_code).as_deref().map(ResponseCode::from),
            amount_authorized: item.amount_authorized.as_deref().and_then(amount::parse),
            customer_vault_id: non_empty(item.customer_vault_id),
            detail: None,
        }
    }
}

impl From<QueryResponse> for PayVisionResponse {
    fn from(item: QueryResponse) -> Self {
        let detail = item
            .transactions
            .into_iter()
            .next()
            .map(TransactionDetail::from);
        Self {
            message: non_empty(item.error_response),
            transaction_id: detail.as_ref().and_then(|detail| detail.transaction_id.clone()),
            order_id: detail.as_ref().and_then(|detail| detail.order_id.clone()),
            auth_code: detail
                .as_ref()
                .and_then(|detail| detail.authorization_code.clone()),
            avs_response: detail.as_ref().and_then(|detail| detail.avs_response.clone()),
            cvv_response: detail.as_ref().and_then(|detail| detail.csc_response.clone()),
            detail,
            ..Default::default()
        }
    }
}

impl From<QueryTransaction> for TransactionDetail {
    fn from(item: QueryTransaction) -> Self {
        Self {
            transaction_id: non_empty(item.transaction_id),
            payment_method: non_empty(item.transaction_type)
                .as_deref()
                .map(PaymentMethodKind::from),
            condition: non_empty(item.condition).as_deref().map(Condition::from),
            order_id: non_empty(item.order_id),
            authorization_code: non_empty(item.authorization_code),
            po_number: non_empty(item.ponumber),
            order_description: non_empty(item.order_description),
            billing: Address {
                first_name: non_empty(item.first_name),
                last_name: non_empty(item.last_name),
                company: non_empty(item.company),
                address1: non_empty(item.address_1),
                address2: non_empty(item.address_2),
                city: non_empty(item.city),
                state: non_empty(item.state),
                postal_code: non_empty(item.postal_code),
                country: non_empty(item.country),
                email: non_empty(item.email),
                phone: non_empty(item.phone),
            },
            customer: CustomerDetail {
                customer_id: non_empty(item.customerid),
                customer_tax_id: non_empty(item.customertaxid),
                fax: non_empty(item.fax),
                cell_phone: non_empty(item.cell_phone),
                website: non_empty(item.website),
            },
            shipping: ShippingDetail {
                address: Address {
                    first_name: non_empty(item.shipping_first_name),
                    last_name: non_empty(item.shipping_last_name),
                    company: non_empty(item.shipping_company),
                    address1: non_empty(item.shipping_address_1),
                    address2: non_empty(item.shipping_address_2),
                    city: non_empty(item.shipping_city),
                    state: non_empty(item.shipping_state),
                    postal_code: non_empty(item.shipping_postal_code),
                    country: non_empty(item.shipping_country),
                    email: non_empty(item.shipping_email),
                    phone: non_empty(item.shipping_phone),
                },
                carrier: non_empty(item.shipping_carrier),
                tracking_number: non_empty(item.tracking_number),
                date: non_empty(item.shipping_date),
                amount: item.shipping.as_deref().and_then(amount::parse),
            },
            cc_number: non_empty(item.cc_number),
            cc_exp: non_empty(item.cc_exp),
            cc_bin: non_empty(item.cc_bin),
            check: Some(CheckDetail {
                account: non_empty(item.check_account),
                hash: non_empty(item.check_hash),
                aba: non_empty(item.check_aba),
                name: non_empty(item.check_name),
                account_holder_type: non_empty(item.account_holder_type),
                account_type: non_empty(item.account_type),
                sec_code: non_empty(item.sec_code),
            })
            .filter(|check| check != &CheckDetail::default()),
            avs_response: non_empty(item.avs_response).as_deref().map(AvsResponse::from),
            csc_response: non_empty(item.csc_response).as_deref().map(CvvResponse::from),
            processor_id: non_empty(item.processor_id),
            currency: non_empty(item.currency),
            tax: item.tax.as_deref().and_then(amount::parse),
            surcharge: item.surcharge.as_deref().and_then(amount::parse),
            tip: item.tip.as_deref().and_then(amount::parse),
            entry_mode: non_empty(item.entry_mode),
            partial_payment_id: non_empty(item.partial_payment_id),
            partial_payment_balance: item.partial_payment_balance.as_deref().and_then(amount::parse),
            platform_id: non_empty(item.platform_id),
            card_balance: item.card_balance.as_deref().and_then(amount::parse),
            card_available_balance: item.card_available_balance.as_deref().and_then(amount::parse),
            actions: item.actions.into_iter().map(Action::from).collect(),
        }
    }
}

impl From<QueryAction> for Action {
    fn from(item: QueryAction) -> Self {
        Self {
            amount: item.amount.as_deref().and_then(amount::parse),
            action_type: non_empty(item.action_type).as_deref().map(Into::into),
            date: item.date.as_deref().and_then(timestamp::parse),
            success: non_empty(item.success).map(|success| success.trim() == "1"),
            ip_address: non_empty(item.ip_address),
            source: non_empty(item.source),
            username: non_empty(item.username),
            response_text: non_empty(item.response_text),
            batch_id: non_empty(item.batch_id),
            processor_batch_id: non_empty(item.processor_batch_id),
            response_code: non_empty(item.response_code).as_deref().map(ResponseCode::from),
            processor_response_text: non_empty(item.processor_response_text),
            processor_response_code: non_empty(item.processor_response_code),
            device_license_number: non_empty(item.device_license_number),
            device_nickname: non_empty(item.device_nickname),
        }
    }
}
