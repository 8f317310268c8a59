use masking::{CardNumber, PeekInterface, Secret};
use rust_decimal::Decimal;
use serde::Serialize;
use time::PrimitiveDateTime;

use crate::{
    types::{ActionType, Condition, PaymentMethodKind},
    utils::{amount, is_blank, is_blank_optional_secret, is_blank_secret, str_is_blank, timestamp},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display, strum::EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TransactionType {
    Sale,
    Auth,
    Capture,
    Void,
    Refund,
    Credit,
    Validate,
    Update,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingMethod {
    Recurring,
    Installment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShippingCarrier {
    Ups,
    Fedex,
    Dhl,
    Usps,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VoidReason {
    Fraud,
    UserCancel,
    IccRejected,
    IccCardRemoved,
    IccNoConfirmation,
    PosTimeout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    Receipt,
    CustomerVault,
    Recurring,
    RecurringPlans,
    Invoicing,
    GatewayProcessors,
    AccountInformation,
    TestModeStatus,
    Profile,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreditCard {
    #[serde(rename = "ccnumber", skip_serializing_if = "is_blank_secret")]
    pub number: Secret<String, CardNumber>,
    /// `MMYY`
    #[serde(rename = "ccexp", skip_serializing_if = "str_is_blank")]
    pub expiration: String,
    #[serde(skip_serializing_if = "is_blank_optional_secret")]
    pub cvv: Option<Secret<String>>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BillingInfo {
    #[serde(skip_serializing_if = "is_blank")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub address1: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub address2: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub zip: Option<String>,
    /// ISO 3166
    #[serde(skip_serializing_if = "is_blank")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub fax: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_method: Option<BillingMethod>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ShippingInfo {
    #[serde(rename = "shipping_firstname", skip_serializing_if = "is_blank")]
    pub first_name: Option<String>,
    #[serde(rename = "shipping_lastname", skip_serializing_if = "is_blank")]
    pub last_name: Option<String>,
    #[serde(rename = "shipping_company", skip_serializing_if = "is_blank")]
    pub company: Option<String>,
    #[serde(rename = "shipping_address1", skip_serializing_if = "is_blank")]
    pub address1: Option<String>,
    #[serde(rename = "shipping_address2", skip_serializing_if = "is_blank")]
    pub address2: Option<String>,
    #[serde(rename = "shipping_city", skip_serializing_if = "is_blank")]
    pub city: Option<String>,
    #[serde(rename = "shipping_state", skip_serializing_if = "is_blank")]
    pub state: Option<String>,
    #[serde(rename = "shipping_zip", skip_serializing_if = "is_blank")]
    pub zip: Option<String>,
    #[serde(rename = "shipping_country", skip_serializing_if = "is_blank")]
    pub country: Option<String>,
    #[serde(rename = "shipping_email", skip_serializing_if = "is_blank")]
    pub email: Option<String>,
    /// Freight included in the transaction amount.
    #[serde(
        rename = "shipping",
        serialize_with = "amount::option::serialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<Decimal>,
    #[serde(rename = "shipping_postal", skip_serializing_if = "is_blank")]
    pub postal: Option<String>,
    #[serde(rename = "ship_from_postal", skip_serializing_if = "is_blank")]
    pub ship_from_postal: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub tracking_number: Option<String>,
    #[serde(rename = "shipping_carrier", skip_serializing_if = "Option::is_none")]
    pub carrier: Option<ShippingCarrier>,
    /// `YYYYMMDD`
    #[serde(rename = "shipping_date", skip_serializing_if = "is_blank")]
    pub date: Option<String>,
}

/// Level II / III order data.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OrderInfo {
    #[serde(rename = "orderid", skip_serializing_if = "is_blank")]
    pub order_id: Option<String>,
    #[serde(rename = "orderdescription", skip_serializing_if = "is_blank")]
    pub description: Option<String>,
    #[serde(rename = "ponumber", skip_serializing_if = "is_blank")]
    pub po_number: Option<String>,
    #[serde(serialize_with = "amount::option::serialize", skip_serializing_if = "Option::is_none")]
    pub tax: Option<Decimal>,
    /// `YYMMDD`
    #[serde(skip_serializing_if = "is_blank")]
    pub order_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_receipt: Option<bool>,
    #[serde(skip_serializing_if = "is_blank")]
    pub summary_commodity_code: Option<String>,
    #[serde(serialize_with = "amount::option::serialize", skip_serializing_if = "Option::is_none")]
    pub duty_amount: Option<Decimal>,
    #[serde(serialize_with = "amount::option::serialize", skip_serializing_if = "Option::is_none")]
    pub discount_amount: Option<Decimal>,
    #[serde(serialize_with = "amount::option::serialize", skip_serializing_if = "Option::is_none")]
    pub national_tax_amount: Option<Decimal>,
    #[serde(serialize_with = "amount::option::serialize", skip_serializing_if = "Option::is_none")]
    pub alternate_tax_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "is_blank")]
    pub alternate_tax_id: Option<String>,
    #[serde(serialize_with = "amount::option::serialize", skip_serializing_if = "Option::is_none")]
    pub vat_tax_amount: Option<Decimal>,
    #[serde(serialize_with = "amount::option::serialize", skip_serializing_if = "Option::is_none")]
    pub vat_tax_rate: Option<Decimal>,
    #[serde(skip_serializing_if = "is_blank")]
    pub vat_invoice_reference_number: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub customer_vat_registration: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub merchant_vat_registration: Option<String>,
}

/// Overrides what appears on the cardholder's statement.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PaymentDescriptor {
    #[serde(skip_serializing_if = "is_blank")]
    pub descriptor: Option<String>,
    #[serde(rename = "descriptor_phone", skip_serializing_if = "is_blank")]
    pub phone: Option<String>,
    #[serde(rename = "descriptor_address", skip_serializing_if = "is_blank")]
    pub address: Option<String>,
    #[serde(rename = "descriptor_city", skip_serializing_if = "is_blank")]
    pub city: Option<String>,
    #[serde(rename = "descriptor_state", skip_serializing_if = "is_blank")]
    pub state: Option<String>,
    #[serde(rename = "descriptor_postal", skip_serializing_if = "is_blank")]
    pub postal: Option<String>,
    #[serde(rename = "descriptor_country", skip_serializing_if = "is_blank")]
    pub country: Option<String>,
    #[serde(rename = "descriptor_mcc", skip_serializing_if = "is_blank")]
    pub mcc: Option<String>,
    #[serde(rename = "descriptor_merchant_id", skip_serializing_if = "is_blank")]
    pub merchant_id: Option<String>,
    #[serde(rename = "descriptor_url", skip_serializing_if = "is_blank")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ProcessorInfo {
    #[serde(skip_serializing_if = "is_blank")]
    pub processor_id: Option<String>,
    /// Window in which an identical transaction is rejected as a duplicate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dup_seconds: Option<u32>,
}

/// Body of a sale or an authorization.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PaymentRequest {
    #[serde(serialize_with = "amount::serialize")]
    pub amount: Decimal,
    /// ISO 4217
    #[serde(skip_serializing_if = "is_blank")]
    pub currency: Option<String>,
    #[serde(flatten)]
    pub credit_card: CreditCard,
    #[serde(flatten)]
    pub billing: Option<BillingInfo>,
    #[serde(flatten)]
    pub shipping: Option<ShippingInfo>,
    #[serde(flatten)]
    pub order: Option<OrderInfo>,
    #[serde(flatten)]
    pub descriptor: Option<PaymentDescriptor>,
    #[serde(flatten)]
    pub processor: Option<ProcessorInfo>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CaptureRequest {
    #[serde(rename = "transactionid", skip_serializing_if = "str_is_blank")]
    pub transaction_id: String,
    /// Defaults to the authorized amount when absent.
    #[serde(serialize_with = "amount::option::serialize", skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(flatten)]
    pub shipping: Option<ShippingInfo>,
    #[serde(flatten)]
    pub order: Option<OrderInfo>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct VoidRequest {
    #[serde(rename = "transactionid", skip_serializing_if = "str_is_blank")]
    pub transaction_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub void_reason: Option<VoidReason>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RefundRequest {
    #[serde(rename = "transactionid", skip_serializing_if = "str_is_blank")]
    pub transaction_id: String,
    /// Full refund when absent.
    #[serde(serialize_with = "amount::option::serialize", skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreditRequest {
    #[serde(rename = "transactionid", skip_serializing_if = "is_blank")]
    pub transaction_id: Option<String>,
    #[serde(serialize_with = "amount::serialize")]
    pub amount: Decimal,
    #[serde(skip_serializing_if = "is_blank")]
    pub currency: Option<String>,
    #[serde(flatten)]
    pub credit_card: Option<CreditCard>,
    #[serde(flatten)]
    pub billing: Option<BillingInfo>,
    #[serde(flatten)]
    pub shipping: Option<ShippingInfo>,
    #[serde(flatten)]
    pub order: Option<OrderInfo>,
    #[serde(flatten)]
    pub processor: Option<ProcessorInfo>,
}

/// Card verification without an amount.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidateRequest {
    #[serde(flatten)]
    pub credit_card: CreditCard,
    #[serde(flatten)]
    pub billing: Option<BillingInfo>,
    #[serde(flatten)]
    pub shipping: Option<ShippingInfo>,
    #[serde(flatten)]
    pub order: Option<OrderInfo>,
    #[serde(flatten)]
    pub processor: Option<ProcessorInfo>,
}

/// Amends shipping and order data of an existing transaction.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateRequest {
    #[serde(rename = "transactionid", skip_serializing_if = "str_is_blank")]
    pub transaction_id: String,
    #[serde(flatten)]
    pub shipping: Option<ShippingInfo>,
    #[serde(flatten)]
    pub order: Option<OrderInfo>,
}

/// Filters for the query endpoint. Every filter is optional.
#[derive(Debug, Clone, Default, Serialize)]
pub struct QueryRequest {
    #[serde(skip_serializing_if = "is_blank")]
    pub transaction_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
    #[serde(rename = "transaction_type", skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethodKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_type: Option<ActionType>,
    #[serde(skip_serializing_if = "is_blank")]
    pub order_id: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub email: Option<String>,
    /// Full number or last four digits.
    #[serde(skip_serializing_if = "is_blank_optional_secret")]
    pub cc_number: Option<Secret<String, CardNumber>>,
    #[serde(serialize_with = "timestamp::option::serialize", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<PrimitiveDateTime>,
    #[serde(serialize_with = "timestamp::option::serialize", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<PrimitiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_type: Option<ReportType>,
    #[serde(skip_serializing_if = "is_blank")]
    pub mobile_device_license: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub mobile_device_nickname: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub customer_vault_id: Option<String>,
}

/// A request to the gateway. The variant selects the transaction `type`, the endpoint and
/// the shape of the response.
#[derive(Debug, Clone)]
pub enum PayVisionRequest {
    Sale(PaymentRequest),
    Auth(PaymentRequest),
    Capture(CaptureRequest),
    Void(VoidRequest),
    Refund(RefundRequest),
    Credit(CreditRequest),
    Validate(ValidateRequest),
    Update(UpdateRequest),
    Query(QueryRequest),
}

impl PayVisionRequest {
    /// `None` for queries, which carry no `type` parameter.
    pub fn transaction_type(&self) -> Option<TransactionType> {
        match self {
            Self::Sale(_) => Some(TransactionType::Sale),
            Self::Auth(_) => Some(TransactionType::Auth),
            Self::Capture(_) => Some(TransactionType::Capture),
            Self::Void(_) => Some(TransactionType::Void),
            Self::Refund(_) => Some(TransactionType::Refund),
            Self::Credit(_) => Some(TransactionType::Credit),
            Self::Validate(_) => Some(TransactionType::Validate),
            Self::Update(_) => Some(TransactionType::Update),
            Self::Query(_) => None,
        }
    }

    pub(crate) fn carries_payment(&self) -> bool {
        matches!(
            self,
            Self::Sale(_) | Self::Auth(_) | Self::Credit(_) | Self::Validate(_)
        )
    }

    /// Values of this request that must never reach the logs.
    pub(crate) fn sensitive_values(&self) -> Vec<String> {
        let card = match self {
            Self::Sale(request) | Self::Auth(request) => Some(&request.credit_card),
            Self::Credit(request) => request.credit_card.as_ref(),
            Self::Validate(request) => Some(&request.credit_card),
            Self::Capture(_)
            | Self::Void(_)
            | Self::Refund(_)
            | Self::Update(_)
            | Self::Query(_) => None,
        };
        card.and_then(|card| card.cvv.as_ref())
            .map(|cvv| cvv.peek().clone())
            .into_iter()
            .collect()
    }
}
