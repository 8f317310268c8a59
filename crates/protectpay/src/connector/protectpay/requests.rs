//! Outbound SOAP bodies.
//!
//! Element names carry the prefix of their namespace: `con` for operation parameters,
//! `typ` for SPS types and `prop` for the external data contracts. Members are declared in
//! the order the WSDL sequences them. Absent optional members are left out of the call.

use masking::{CardNumber, Secret};
use serde::Serialize;

use crate::types::{
    AccountCountryCode, BankAccountType, Country, DuplicateAction, PaymentMethodType, SecCode,
};

#[derive(Debug, Clone, Serialize)]
pub struct Identification {
    #[serde(rename = "typ:AuthenticationToken")]
    pub authentication_token: Secret<String>,
    #[serde(rename = "typ:BillerAccountId")]
    pub biller_account_id: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PayerData {
    #[serde(rename = "typ:EmailAddress", skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
    #[serde(rename = "typ:ExternalId1", skip_serializing_if = "Option::is_none")]
    pub external_id1: Option<String>,
    #[serde(rename = "typ:ExternalId2", skip_serializing_if = "Option::is_none")]
    pub external_id2: Option<String>,
    #[serde(rename = "typ:Name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Billing {
    #[serde(rename = "typ:Address1", skip_serializing_if = "Option::is_none")]
    pub address1: Option<String>,
    #[serde(rename = "typ:Address2", skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    #[serde(rename = "typ:Address3", skip_serializing_if = "Option::is_none")]
    pub address3: Option<String>,
    #[serde(rename = "typ:City", skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(rename = "typ:Country", skip_serializing_if = "Option::is_none")]
    pub country: Option<Country>,
    #[serde(rename = "typ:Email", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "typ:State", skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(rename = "typ:TelephoneNumber", skip_serializing_if = "Option::is_none")]
    pub telephone_number: Option<String>,
    #[serde(rename = "typ:ZipCode", skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct EditPayerRequest {
    #[serde(rename = "prop:PayerAccountId", skip_serializing_if = "Option::is_none")]
    pub payer_account_id: Option<String>,
    #[serde(rename = "prop:UpdatedData")]
    pub updated_data: PayerData,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PaymentMethodAdd {
    #[serde(rename = "typ:AccountCountryCode", skip_serializing_if = "Option::is_none")]
    pub account_country_code: Option<AccountCountryCode>,
    #[serde(rename = "typ:AccountName", skip_serializing_if = "Option::is_none")]
    pub account_name: Option<String>,
    #[serde(rename = "typ:AccountNumber", skip_serializing_if = "Option::is_none")]
    pub account_number: Option<Secret<String, CardNumber>>,
    #[serde(rename = "typ:BankNumber", skip_serializing_if = "Option::is_none")]
    pub bank_number: Option<String>,
    #[serde(rename = "typ:BillingInformation", skip_serializing_if = "Option::is_none")]
    pub billing_information: Option<Billing>,
    #[serde(rename = "typ:Description", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "typ:DuplicateAction", skip_serializing_if = "Option::is_none")]
    pub duplicate_action: Option<DuplicateAction>,
    #[serde(rename = "typ:ExpirationDate", skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,
    #[serde(rename = "typ:PayerAccountId", skip_serializing_if = "Option::is_none")]
    pub payer_account_id: Option<String>,
    #[serde(rename = "typ:PaymentMethodType", skip_serializing_if = "Option::is_none")]
    pub payment_method_type: Option<PaymentMethodType>,
    #[serde(rename = "typ:Priority", skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    #[serde(rename = "typ:Protected", skip_serializing_if = "Option::is_none")]
    pub protected: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PaymentMethodUpdate {
    #[serde(rename = "typ:AccountName", skip_serializing_if = "Option::is_none")]
    pub account_name: Option<String>,
    #[serde(rename = "typ:BankAccountType", skip_serializing_if = "Option::is_none")]
    pub bank_account_type: Option<BankAccountType>,
    #[serde(rename = "typ:BillingInformation", skip_serializing_if = "Option::is_none")]
    pub billing_information: Option<Billing>,
    #[serde(rename = "typ:Description", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "typ:ExpirationDate", skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,
    #[serde(rename = "typ:PayerAccountId", skip_serializing_if = "Option::is_none")]
    pub payer_account_id: Option<String>,
    #[serde(rename = "typ:PaymentMethodID", skip_serializing_if = "Option::is_none")]
    pub payment_method_id: Option<String>,
    #[serde(rename = "typ:Protected", skip_serializing_if = "Option::is_none")]
    pub protected: Option<bool>,
}

/// Amount in minor units.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Transaction {
    #[serde(rename = "typ:Amount")]
    pub amount: i64,
    #[serde(rename = "typ:Comment1", skip_serializing_if = "Option::is_none")]
    pub comment1: Option<String>,
    #[serde(rename = "typ:Comment2", skip_serializing_if = "Option::is_none")]
    pub comment2: Option<String>,
    #[serde(rename = "typ:CurrencyCode", skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
    #[serde(rename = "typ:Invoice", skip_serializing_if = "Option::is_none")]
    pub invoice: Option<String>,
    #[serde(rename = "typ:MerchantProfileId", skip_serializing_if = "Option::is_none")]
    pub merchant_profile_id: Option<i64>,
    #[serde(rename = "typ:PayerAccountId")]
    pub payer_account_id: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PaymentInfoOverrides {
    #[serde(rename = "prop:Ach", skip_serializing_if = "Option::is_none")]
    pub ach: Option<AchOverrides>,
    #[serde(rename = "prop:CreditCard", skip_serializing_if = "Option::is_none")]
    pub credit_card: Option<CreditCardOverrides>,
    #[serde(rename = "prop:Payer", skip_serializing_if = "Option::is_none")]
    pub payer: Option<PayerOverrides>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AchOverrides {
    #[serde(rename = "prop:BankAccountType", skip_serializing_if = "Option::is_none")]
    pub bank_account_type: Option<BankAccountType>,
    #[serde(rename = "prop:SecCode", skip_serializing_if = "Option::is_none")]
    pub sec_code: Option<SecCode>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreditCardOverrides {
    #[serde(rename = "prop:Billing", skip_serializing_if = "Option::is_none")]
    pub billing: Option<Billing>,
    #[serde(rename = "prop:CVV", skip_serializing_if = "Option::is_none")]
    pub cvv: Option<Secret<String>>,
    #[serde(rename = "prop:ExpirationDate", skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,
    #[serde(rename = "prop:FullName", skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PayerOverrides {
    #[serde(rename = "prop:IpAddress")]
    pub ip_address: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PriorTransaction {
    #[serde(rename = "prop:Amount", skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    #[serde(rename = "prop:Comment1", skip_serializing_if = "Option::is_none")]
    pub comment1: Option<String>,
    #[serde(rename = "prop:Comment2", skip_serializing_if = "Option::is_none")]
    pub comment2: Option<String>,
    #[serde(rename = "prop:MerchantProfileId", skip_serializing_if = "Option::is_none")]
    pub merchant_profile_id: Option<i64>,
    #[serde(rename = "prop:OriginalTransactionId")]
    pub original_transaction_id: String,
    #[serde(rename = "prop:TransactionHistoryId", skip_serializing_if = "Option::is_none")]
    pub transaction_history_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TempTokenRequest<'a> {
    #[serde(rename = "typ:Identification")]
    pub identification: &'a Identification,
    #[serde(rename = "typ:PayerInfo")]
    pub payer_info: PayerInformation,
    #[serde(rename = "typ:TokenProperties")]
    pub token_properties: TokenProperties,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PayerInformation {
    #[serde(rename = "typ:Id")]
    pub id: String,
    #[serde(rename = "typ:Name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TokenProperties {
    #[serde(rename = "typ:DurationSeconds", skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MerchantProfileData {
    #[serde(rename = "prop:PaymentProcessor")]
    pub payment_processor: String,
    #[serde(rename = "prop:ProcessorData")]
    pub processor_data: ProcessorData,
    #[serde(rename = "prop:ProfileName")]
    pub profile_name: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ProcessorData {
    #[serde(rename = "prop:ProcessorDatum")]
    pub items: Vec<ProcessorDatum>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ProcessorDatum {
    #[serde(rename = "prop:ProcessorField")]
    pub processor_field: String,
    #[serde(rename = "prop:Value")]
    pub value: String,
}

// Operation parameter lists. Each serializes as the body element `con:<operation>`.

#[derive(Debug, Serialize)]
pub struct CreatePayer<'a> {
    #[serde(rename = "con:id")]
    pub id: &'a Identification,
    #[serde(rename = "con:name")]
    pub name: &'a str,
}

#[derive(Debug, Serialize)]
pub struct CreatePayerWithData<'a> {
    #[serde(rename = "con:id")]
    pub id: &'a Identification,
    #[serde(rename = "con:data")]
    pub data: PayerData,
}

#[derive(Debug, Serialize)]
pub struct EditPayer<'a> {
    #[serde(rename = "con:id")]
    pub id: &'a Identification,
    #[serde(rename = "con:request")]
    pub request: EditPayerRequest,
}

#[derive(Debug, Serialize)]
pub struct PayerAccount<'a> {
    #[serde(rename = "con:id")]
    pub id: &'a Identification,
    #[serde(rename = "con:payerAccountId")]
    pub payer_account_id: &'a str,
}

#[derive(Debug, Serialize)]
pub struct GetPayers<'a> {
    #[serde(rename = "con:id")]
    pub id: &'a Identification,
    #[serde(rename = "con:criteria", skip_serializing_if = "Option::is_none")]
    pub criteria: Option<PayerData>,
}

#[derive(Debug, Serialize)]
pub struct CreatePaymentMethod<'a> {
    #[serde(rename = "con:id")]
    pub id: &'a Identification,
    #[serde(rename = "con:pmAdd")]
    pub payment_method: PaymentMethodAdd,
}

#[derive(Debug, Serialize)]
pub struct EditPaymentMethod<'a> {
    #[serde(rename = "con:id")]
    pub id: &'a Identification,
    #[serde(rename = "con:pmUpdate")]
    pub payment_method: PaymentMethodUpdate,
}

#[derive(Debug, Serialize)]
pub struct PayerPaymentMethod<'a> {
    #[serde(rename = "con:id")]
    pub id: &'a Identification,
    #[serde(rename = "con:payerAccountId")]
    pub payer_account_id: &'a str,
    #[serde(rename = "con:paymentMethodId")]
    pub payment_method_id: &'a str,
}

/// Shared by the authorize, process and credit operations.
#[derive(Debug, Serialize)]
pub struct PaymentMethodTransaction<'a> {
    #[serde(rename = "con:id")]
    pub id: &'a Identification,
    #[serde(rename = "con:transaction")]
    pub transaction: Transaction,
    #[serde(rename = "con:paymentMethodID")]
    pub payment_method_id: &'a str,
    #[serde(rename = "con:optionalPaymentInfoOverrides")]
    pub overrides: PaymentInfoOverrides,
}

/// Shared by the capture, void and refund operations.
#[derive(Debug, Serialize)]
pub struct PriorTransactionRequest<'a> {
    #[serde(rename = "con:id")]
    pub id: &'a Identification,
    #[serde(rename = "con:request")]
    pub request: PriorTransaction,
}

#[derive(Debug, Serialize)]
pub struct GetTempToken<'a> {
    #[serde(rename = "con:tempTokenRequest")]
    pub request: TempTokenRequest<'a>,
}

#[derive(Debug, Serialize)]
pub struct CreateMerchantProfile<'a> {
    #[serde(rename = "con:id")]
    pub id: &'a Identification,
    #[serde(rename = "con:merchantProfile")]
    pub merchant_profile: MerchantProfileData,
}
