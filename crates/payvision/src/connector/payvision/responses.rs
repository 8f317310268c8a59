use std::collections::HashMap;

use serde::Deserialize;

/// Reply of the transact endpoint, read from `key=value&...` pairs.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PayVisionPaymentsResponse {
    pub response: Option<String>,
    pub responsetext: Option<String>,
    pub authcode: Option<String>,
    pub transactionid: Option<String>,
    pub avsresponse: Option<String>,
    pub cvvresponse: Option<String>,
    pub orderid: Option<String>,
    pub transaction_type: Option<String>,
    pub response_code: Option<String>,
    pub amount_authorized: Option<String>,
    pub customer_vault_id: Option<String>,
}

impl From<HashMap<String, String>> for PayVisionPaymentsResponse {
    fn from(mut fields: HashMap<String, String>) -> Self {
        Self {
            response: fields.remove("response"),
            responsetext: fields.remove("responsetext"),
            authcode: fields.remove("authcode"),
            transactionid: fields.remove("transactionid"),
            avsresponse: fields.remove("avsresponse"),
            cvvresponse: fields.remove("cvvresponse"),
            orderid: fields.remove("orderid"),
            transaction_type: fields.remove("type"),
            response_code: fields.remove("response_code"),
            amount_authorized: fields.remove("amount_authorized"),
            customer_vault_id: fields.remove("customer_vault_id"),
        }
    }
}

/// Reply of the query endpoint, rooted at `<nm_response>`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename = "nm_response")]
pub struct QueryResponse {
    #[serde(default, rename = "transaction")]
    pub transactions: Vec<QueryTransaction>,
    #[serde(default)]
    pub error_response: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct QueryTransaction {
    pub transaction_id: Option<String>,
    pub transaction_type: Option<String>,
    pub condition: Option<String>,
    pub order_id: Option<String>,
    pub authorization_code: Option<String>,
    pub ponumber: Option<String>,
    pub order_description: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company: Option<String>,
    pub address_1: Option<String>,
    pub address_2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub fax: Option<String>,
    pub cell_phone: Option<String>,
    pub customerid: Option<String>,
    pub customertaxid: Option<String>,
    pub website: Option<String>,
    pub shipping_first_name: Option<String>,
    pub shipping_last_name: Option<String>,
    pub shipping_company: Option<String>,
    pub shipping_address_1: Option<String>,
    pub shipping_address_2: Option<String>,
    pub shipping_city: Option<String>,
    pub shipping_state: Option<String>,
    pub shipping_postal_code: Option<String>,
    pub shipping_country: Option<String>,
    pub shipping_email: Option<String>,
    pub shipping_phone: Option<String>,
    pub shipping_carrier: Option<String>,
    pub tracking_number: Option<String>,
    pub shipping_date: Option<String>,
    pub shipping: Option<String>,
    pub cc_number: Option<String>,
    pub cc_exp: Option<String>,
    pub cc_bin: Option<String>,
    pub check_account: Option<String>,
    pub check_hash: Option<String>,
    pub check_aba: Option<String>,
    pub check_name: Option<String>,
    pub account_holder_type: Option<String>,
    pub account_type: Option<String>,
    pub sec_code: Option<String>,
    pub avs_response: Option<String>,
    pub csc_response: Option<String>,
    pub processor_id: Option<String>,
    pub currency: Option<String>,
    pub tax: Option<String>,
    pub surcharge: Option<String>,
    pub tip: Option<String>,
    pub entry_mode: Option<String>,
    pub partial_payment_id: Option<String>,
    pub partial_payment_balance: Option<String>,
    pub platform_id: Option<String>,
    pub card_balance: Option<String>,
    pub card_available_balance: Option<String>,
    #[serde(default, rename = "action")]
    pub actions: Vec<QueryAction>,
}

#[derive(Debug, Default, Deserialize)]
pub struct QueryAction {
    pub amount: Option<String>,
    pub action_type: Option<String>,
    pub date: Option<String>,
    pub success: Option<String>,
    pub ip_address: Option<String>,
    pub source: Option<String>,
    pub username: Option<String>,
    pub response_text: Option<String>,
    pub batch_id: Option<String>,
    pub processor_batch_id: Option<String>,
    pub response_code: Option<String>,
    pub processor_response_text: Option<String>,
    pub processor_response_code: Option<String>,
    pub device_license_number: Option<String>,
    pub device_nickname: Option<String>,
}
