//! Inbound SOAP bodies, deserialized after [`normalize_envelope`](super::transformers::normalize_envelope)
//! has removed namespace prefixes and `nil` elements and renamed the operation wrappers to
//! `Response` and `Result`.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SoapEnvelope<T> {
    #[serde(rename = "Body")]
    pub body: SoapBody<T>,
}

#[derive(Debug, Deserialize)]
pub struct SoapBody<T> {
    #[serde(rename = "Response")]
    pub response: OperationResponse<T>,
}

#[derive(Debug, Deserialize)]
pub struct OperationResponse<T> {
    #[serde(rename = "Result")]
    pub result: T,
}

#[derive(Debug, Deserialize)]
pub struct FaultEnvelope {
    #[serde(rename = "Body")]
    pub body: FaultBody,
}

#[derive(Debug, Deserialize)]
pub struct FaultBody {
    #[serde(rename = "Fault")]
    pub fault: SoapFault,
}

#[derive(Debug, Default, Deserialize)]
pub struct SoapFault {
    pub faultcode: Option<String>,
    pub faultstring: Option<String>,
}

/// Outcome block every operation answers with. `00` is success.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResultInfo {
    pub result_code: Option<String>,
    pub result_message: Option<String>,
    pub result_value: Option<String>,
}

/// Access to the outcome block of a response, wherever the operation places it.
pub trait RequestResult {
    fn request_result(&self) -> Option<&ResultInfo>;
}

impl RequestResult for ResultInfo {
    fn request_result(&self) -> Option<&ResultInfo> {
        Some(self)
    }
}

macro_rules! impl_request_result {
    ($($response:ty),+ $(,)?) => {
        $(
            impl RequestResult for $response {
                fn request_result(&self) -> Option<&ResultInfo> {
                    self.request_result.as_ref()
                }
            }
        )+
    };
}

impl_request_result!(
    CreateAccountInformationResult,
    GetPayersResult,
    CreatePaymentMethodResult,
    PaymentMethodsResult,
    TransactionResult,
    TempTokenResult,
    CreateMerchantProfileResult,
);

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateAccountInformationResult {
    #[serde(rename = "ExternalAccountID")]
    pub external_account_id: Option<String>,
    pub request_result: Option<ResultInfo>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetPayersResult {
    pub payers: Option<PayerList>,
    pub request_result: Option<ResultInfo>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PayerList {
    #[serde(default, rename = "PayerInfo")]
    pub payers: Vec<PayerInfo>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PayerInfo {
    pub email_address: Option<String>,
    pub external_id1: Option<String>,
    pub external_id2: Option<String>,
    pub name: Option<String>,
    #[serde(alias = "payerAccountId")]
    pub payer_account_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreatePaymentMethodResult {
    pub payment_method_id: Option<String>,
    pub request_result: Option<ResultInfo>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PaymentMethodsResult {
    pub payment_methods: Option<PaymentMethodList>,
    pub request_result: Option<ResultInfo>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PaymentMethodList {
    #[serde(default, rename = "PaymentMethodInformation")]
    pub payment_methods: Vec<PaymentMethodInformation>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PaymentMethodInformation {
    pub account_name: Option<String>,
    pub billing_information: Option<BillingResponse>,
    pub date_created: Option<String>,
    pub description: Option<String>,
    pub expiration_date: Option<String>,
    pub obfuscated_account_number: Option<String>,
    #[serde(rename = "PaymentMethodID")]
    pub payment_method_id: Option<String>,
    pub payment_method_type: Option<String>,
    pub priority: Option<String>,
    pub protected: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BillingResponse {
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub address3: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub email: Option<String>,
    pub state: Option<String>,
    pub telephone_number: Option<String>,
    pub zip_code: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TransactionResult {
    pub request_result: Option<ResultInfo>,
    pub transaction: Option<TransactionInformation>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TransactionInformation {
    #[serde(rename = "AVSCode")]
    pub avs_code: Option<String>,
    pub authorization_code: Option<String>,
    pub currency_conversion_rate: Option<String>,
    pub currency_converted_amount: Option<String>,
    pub currency_converted_currency_code: Option<String>,
    pub result_code: Option<ResultInfo>,
    pub transaction_history_id: Option<String>,
    pub transaction_id: Option<String>,
    pub transaction_result: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TempTokenResult {
    pub credential_id: Option<String>,
    pub payer_id: Option<String>,
    pub request_result: Option<ResultInfo>,
    pub temp_token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateMerchantProfileResult {
    pub profile_id: Option<String>,
    pub request_result: Option<ResultInfo>,
}
