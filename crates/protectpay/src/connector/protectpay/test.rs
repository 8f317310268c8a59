#![allow(clippy::unwrap_used)]

use std::{collections::BTreeMap, sync::Mutex};

use async_trait::async_trait;
use masking::PeekInterface;
use rust_decimal::Decimal;
use time::macros::datetime;

use super::{responses::ResultInfo, transformers::*, ProtectPayClient};
use crate::{
    configs::{Environment, ProtectPayConfig},
    errors::{CustomResult, ProtectPayError},
    services::{SpsOperation, SpsRequest, SpsService},
    types::*,
};

const SUCCESS: &str = "<a:RequestResult><a:ResultCode>00</a:ResultCode><a:ResultMessage/><a:ResultValue>SUCCESS</a:ResultValue></a:RequestResult>";

const TRANSACTION: &str = "<a:RequestResult><a:ResultCode>00</a:ResultCode><a:ResultMessage/><a:ResultValue>SUCCESS</a:ResultValue></a:RequestResult>\
<a:Transaction><a:AVSCode>T</a:AVSCode><a:AuthorizationCode>A11111</a:AuthorizationCode>\
<a:CurrencyConversionRate>1</a:CurrencyConversionRate><a:CurrencyConvertedAmount>1000</a:CurrencyConvertedAmount>\
<a:CurrencyConvertedCurrencyCode>USD</a:CurrencyConvertedCurrencyCode>\
<a:ResultCode><a:ResultCode>00</a:ResultCode><a:ResultMessage/><a:ResultValue>SUCCESS</a:ResultValue></a:ResultCode>\
<a:TransactionHistoryId>8289705</a:TransactionHistoryId><a:TransactionId>335</a:TransactionId>\
<a:TransactionResult>Success</a:TransactionResult></a:Transaction>";

/// Wraps `result` the way the WCF service answers `operation`.
fn reply(operation: &str, result: &str) -> String {
    format!(
        r#"<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/"><s:Body><{operation}Response xmlns="http://propay.com/SPS/contracts"><{operation}Result xmlns:a="http://propay.com/SPS/types" xmlns:i="http://www.w3.org/2001/XMLSchema-instance">{result}</{operation}Result></{operation}Response></s:Body></s:Envelope>"#
    )
}

struct RecordingService {
    reply: String,
    requests: Mutex<Vec<SpsRequest>>,
}

impl RecordingService {
    fn answering(reply: String) -> Self {
        Self {
            reply,
            requests: Mutex::new(Vec::new()),
        }
    }

    fn operations(&self) -> Vec<SpsOperation> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|request| request.operation)
            .collect()
    }

    fn last(&self) -> SpsRequest {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl SpsService for RecordingService {
    async fn invoke(&self, request: SpsRequest) -> CustomResult<String, ProtectPayError> {
        self.requests.lock().unwrap().push(request);
        Ok(self.reply.clone())
    }
}

fn client(reply: String) -> ProtectPayClient<RecordingService> {
    let config = ProtectPayConfig::new("token-123", "9876", Environment::Testing);
    ProtectPayClient::with_service(config, RecordingService::answering(reply))
}

fn payment() -> Payment {
    Payment {
        payer_account_id: "5823760912097888".to_string(),
        payment_method_id: "8c2f5f8e-1d2b-4f4e-9b70-5e2a4b0d8a11".to_string(),
        amount: 1000,
        currency_code: Some("USD".to_string()),
        invoice: Some("INV-1".to_string()),
        ..Default::default()
    }
}

#[test]
fn envelope_wraps_parameters_with_namespaces() {
    let config = ProtectPayConfig::new("token-123", "9876", Environment::Testing);
    let client = ProtectPayClient::with_service(config, RecordingService::answering(String::new()));
    let envelope = build_envelope(
        SpsOperation::CreatePayer,
        &super::requests::CreatePayer {
            id: &client.id,
            name: "Jane & Co",
        },
    )
    .unwrap();

    assert!(envelope.starts_with("<soapenv:Envelope xmlns:soapenv=\"http://schemas.xmlsoap.org/soap/envelope/\""));
    assert!(envelope.contains("xmlns:typ=\"http://propay.com/SPS/types\""));
    assert!(envelope.contains(
        "<soapenv:Body><con:CreatePayer><con:id><typ:AuthenticationToken>token-123</typ:AuthenticationToken>\
         <typ:BillerAccountId>9876</typ:BillerAccountId></con:id><con:name>Jane &amp; Co</con:name></con:CreatePayer></soapenv:Body>"
    ));
}

#[test]
fn normalizing_strips_prefixes_nil_elements_and_wrapper_names() {
    let raw = reply(
        "CreatePayer",
        "<a:ExternalAccountID>42</a:ExternalAccountID><a:Unused i:nil=\"true\"/>",
    );

    assert_eq!(
        normalize_envelope(&raw).unwrap(),
        "<Envelope><Body><Response><Result><ExternalAccountID>42</ExternalAccountID></Result></Response></Body></Envelope>"
    );
}

#[test]
fn result_code_00_passes() {
    let result = ResultInfo {
        result_code: Some("00".to_string()),
        result_message: None,
        result_value: Some("SUCCESS".to_string()),
    };

    assert!(check_result(Some(&result)).is_ok());
}

#[test]
fn any_other_result_code_is_an_error() {
    let result = ResultInfo {
        result_code: Some("308".to_string()),
        result_message: Some("Invalid Payer".to_string()),
        result_value: Some("FAILURE".to_string()),
    };

    let error = check_result(Some(&result)).unwrap_err();
    match error.current_context() {
        ProtectPayError::ResultCode {
            code,
            value,
            message,
        } => {
            assert_eq!(code, "308");
            assert_eq!(value.as_deref(), Some("FAILURE"));
            assert_eq!(message.as_deref(), Some("Invalid Payer"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(error.current_context().result_code(), Some("308"));
}

#[test]
fn a_missing_result_is_an_error() {
    let error = check_result(None).unwrap_err();
    assert!(matches!(
        error.current_context(),
        ProtectPayError::MissingRequestResult
    ));
}

#[tokio::test]
async fn create_payer_returns_the_external_account_id() {
    let client = client(reply(
        "CreatePayer",
        &format!("<a:ExternalAccountID>5823760912097888</a:ExternalAccountID>{SUCCESS}"),
    ));

    let payer_account_id = client.create_payer("Jane Doe").await.unwrap();

    assert_eq!(payer_account_id, "5823760912097888");
    assert_eq!(client.service().operations(), vec![SpsOperation::CreatePayer]);
}

#[tokio::test]
async fn rejected_calls_surface_the_result_code() {
    let client = client(reply(
        "CreatePayer",
        "<a:ExternalAccountID i:nil=\"true\"/><a:RequestResult><a:ResultCode>301</a:ResultCode>\
         <a:ResultMessage>Invalid arguments</a:ResultMessage><a:ResultValue>FAILURE</a:ResultValue></a:RequestResult>",
    ));

    let error = client.create_payer("").await.unwrap_err();

    assert_eq!(error.current_context().result_code(), Some("301"));
}

#[tokio::test]
async fn payer_data_leaves_out_absent_fields() {
    let client = client(reply(
        "CreatePayerWithData",
        &format!("<a:ExternalAccountID>1</a:ExternalAccountID>{SUCCESS}"),
    ));
    let payer = Payer {
        email_address: Some("jane@example.com".to_string()),
        ..Payer::new("Jane Doe")
    };

    client.create_payer_with_data(&payer).await.unwrap();

    let envelope = client.service().last().envelope;
    assert!(envelope.contains(
        "<con:data><typ:EmailAddress>jane@example.com</typ:EmailAddress><typ:Name>Jane Doe</typ:Name></con:data>"
    ));
    assert!(!envelope.contains("ExternalId1"));
}

#[tokio::test]
async fn get_payers_maps_every_payer() {
    let client = client(reply(
        "GetPayers",
        &format!(
            "<a:Payers><a:PayerInfo><a:EmailAddress/><a:ExternalId1>crm-1</a:ExternalId1><a:ExternalId2 i:nil=\"true\"/>\
             <a:Name>Jane Doe</a:Name><a:payerAccountId>111</a:payerAccountId></a:PayerInfo>\
             <a:PayerInfo><a:Name>John Doe</a:Name><a:payerAccountId>222</a:payerAccountId></a:PayerInfo></a:Payers>{SUCCESS}"
        ),
    ));

    let payers = client.get_payers(None).await.unwrap();

    assert_eq!(
        payers,
        vec![
            Payer {
                payer_account_id: Some("111".to_string()),
                account_name: Some("Jane Doe".to_string()),
                external_id1: Some("crm-1".to_string()),
                ..Default::default()
            },
            Payer {
                payer_account_id: Some("222".to_string()),
                account_name: Some("John Doe".to_string()),
                ..Default::default()
            },
        ]
    );
    assert!(!client.service().last().envelope.contains("con:criteria"));
}

#[tokio::test]
async fn get_payers_without_matches_is_empty() {
    let client = client(reply("GetPayers", &format!("<a:Payers i:nil=\"true\"/>{SUCCESS}")));

    assert!(client.get_payers(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn stored_payment_methods_are_mapped_back() {
    let client = client(reply(
        "GetPayerPaymentMethod",
        &format!(
            "<a:PaymentMethods><a:PaymentMethodInformation><a:AccountName>Jane Doe</a:AccountName>\
             <a:BillingInformation><a:Address1>3400 N Ashton Blvd</a:Address1><a:Address2 i:nil=\"true\"/>\
             <a:City>Lehi</a:City><a:Country>USA</a:Country><a:Email/><a:State>UT</a:State>\
             <a:ZipCode>84043</a:ZipCode></a:BillingInformation>\
             <a:DateCreated>2014-05-13T18:04:22.087</a:DateCreated><a:Description>Work card</a:Description>\
             <a:ExpirationDate>0127</a:ExpirationDate><a:ObfuscatedAccountNumber>474747******4747</a:ObfuscatedAccountNumber>\
             <a:PaymentMethodID>pm-1</a:PaymentMethodID><a:PaymentMethodType>Visa</a:PaymentMethodType>\
             <a:Priority>50</a:Priority><a:Protected>false</a:Protected></a:PaymentMethodInformation></a:PaymentMethods>{SUCCESS}"
        ),
    ));

    let method = client
        .get_payment_method("111", "pm-1")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(method.payment_method_id.as_deref(), Some("pm-1"));
    assert_eq!(method.payer_account_id.as_deref(), Some("111"));
    assert_eq!(method.method_type, Some(PaymentMethodType::Visa));
    assert_eq!(
        method.account_number.as_ref().map(|number| number.peek().as_str()),
        Some("474747******4747")
    );
    assert_eq!(method.priority, Some(50));
    assert_eq!(method.payer_protected, Some(false));
    assert_eq!(method.date_created, Some(datetime!(2014-05-13 18:04:22.087 UTC)));
    assert_eq!(
        method.billing,
        Some(BillingInfo {
            address1: Some("3400 N Ashton Blvd".to_string()),
            city: Some("Lehi".to_string()),
            state: Some("UT".to_string()),
            zip_code: Some("84043".to_string()),
            country: Some(Country::Usa),
            ..Default::default()
        })
    );
    assert!(client.service().last().envelope.contains(
        "<con:payerAccountId>111</con:payerAccountId><con:paymentMethodId>pm-1</con:paymentMethodId>"
    ));
}

#[tokio::test]
async fn a_missing_payment_method_is_none() {
    let client = client(reply(
        "GetPayerPaymentMethod",
        &format!("<a:PaymentMethods/>{SUCCESS}"),
    ));

    assert_eq!(client.get_payment_method("111", "pm-9").await.unwrap(), None);
}

#[tokio::test]
async fn new_payment_methods_send_their_enums_by_name() {
    let client = client(reply(
        "CreatePaymentMethod",
        &format!("<a:PaymentMethodId>pm-2</a:PaymentMethodId>{SUCCESS}"),
    ));
    let method = PaymentMethod {
        payer_account_id: Some("111".to_string()),
        method_type: Some(PaymentMethodType::Checking),
        account_number: Some("123456789012".into()),
        bank_number: Some("011000015".to_string()),
        account_country_code: Some(AccountCountryCode::UnitedStates),
        duplicate_action: Some(DuplicateAction::ReturnDup),
        account_name: Some("Jane Doe".to_string()),
        ..Default::default()
    };

    assert_eq!(client.create_payment_method(&method).await.unwrap(), "pm-2");

    let envelope = client.service().last().envelope;
    assert!(envelope.contains("<typ:AccountCountryCode>840</typ:AccountCountryCode>"));
    assert!(envelope.contains("<typ:DuplicateAction>RETURNDUP</typ:DuplicateAction>"));
    assert!(envelope.contains("<typ:PaymentMethodType>Checking</typ:PaymentMethodType>"));
    assert!(!envelope.contains("typ:BillingInformation"));
}

#[tokio::test]
async fn bank_account_type_is_sent_only_for_bank_accounts() {
    let client = client(reply(
        "EditPaymentMethod",
        "<a:ResultCode>00</a:ResultCode><a:ResultMessage/><a:ResultValue>SUCCESS</a:ResultValue>",
    ));
    let savings = PaymentMethod {
        payment_method_id: Some("pm-1".to_string()),
        payer_account_id: Some("111".to_string()),
        method_type: Some(PaymentMethodType::Savings),
        ..Default::default()
    };
    let card = PaymentMethod {
        method_type: Some(PaymentMethodType::MasterCard),
        expiration_date: Some("0128".to_string()),
        ..savings.clone()
    };

    client.update_payment_method(&savings).await.unwrap();
    assert!(client
        .service()
        .last()
        .envelope
        .contains("<typ:BankAccountType>Savings</typ:BankAccountType>"));

    client.update_payment_method(&card).await.unwrap();
    let envelope = client.service().last().envelope;
    assert!(!envelope.contains("BankAccountType"));
    assert!(envelope.contains("<typ:ExpirationDate>0128</typ:ExpirationDate>"));
}

#[tokio::test]
async fn transactions_dispatch_on_kind_and_recurrence() {
    let client = client(reply("AuthorizePaymentMethodTransaction", TRANSACTION));
    let payment = payment();
    let overrides = PaymentOverrides::none();

    client.auth(&payment, &overrides, false).await.unwrap();
    client.auth(&payment, &overrides, true).await.unwrap();
    client.auth_and_capture(&payment, &overrides, false).await.unwrap();
    client.auth_and_capture(&payment, &overrides, true).await.unwrap();
    client.credit(&payment, &overrides).await.unwrap();

    assert_eq!(
        client.service().operations(),
        vec![
            SpsOperation::AuthorizePaymentMethodTransaction,
            SpsOperation::AuthorizePaymentMethodTransactionRecurring,
            SpsOperation::ProcessPaymentMethodTransaction,
            SpsOperation::ProcessPaymentMethodTransactionRecurring,
            SpsOperation::CreditPayment,
        ]
    );
}

#[tokio::test]
async fn transaction_responses_are_mapped() {
    let client = client(reply("ProcessPaymentMethodTransaction", TRANSACTION));

    let response = client
        .auth_and_capture(&payment(), &PaymentOverrides::none(), false)
        .await
        .unwrap();

    assert_eq!(
        response,
        PaymentResponse {
            transaction_id: Some("335".to_string()),
            transaction_history_id: Some(8289705),
            authorization_code: Some("A11111".to_string()),
            avs_code: Some("T".to_string()),
            transaction_result: Some("Success".to_string()),
            result_code: Some("00".to_string()),
            result_message: None,
            result_value: Some("SUCCESS".to_string()),
            conversion_rate: Some(Decimal::ONE),
            converted_amount: Some(1000),
            converted_currency_code: Some("USD".to_string()),
        }
    );
    let envelope = client.service().last().envelope;
    assert!(envelope.contains("<con:transaction><typ:Amount>1000</typ:Amount>"));
    assert!(envelope.contains("<typ:Invoice>INV-1</typ:Invoice>"));
    assert!(!envelope.contains("typ:MerchantProfileId"));
}

#[tokio::test]
async fn payer_override_requires_an_ip_address() {
    let client = client(reply("AuthorizePaymentMethodTransaction", TRANSACTION));
    let mut payment = payment();

    payment.input_ip_address = Some(String::new());
    client.auth(&payment, &PaymentOverrides::none(), false).await.unwrap();
    assert!(!client.service().last().envelope.contains("prop:Payer>"));

    payment.input_ip_address = Some("10.0.0.1".to_string());
    client.auth(&payment, &PaymentOverrides::none(), false).await.unwrap();
    assert!(client
        .service()
        .last()
        .envelope
        .contains("<prop:Payer><prop:IpAddress>10.0.0.1</prop:IpAddress></prop:Payer>"));
}

#[tokio::test]
async fn card_security_codes_are_marked_sensitive() {
    let client = client(reply("AuthorizePaymentMethodTransaction", TRANSACTION));

    client
        .auth(&payment(), &PaymentOverrides::cvv("999"), false)
        .await
        .unwrap();

    let request = client.service().last();
    assert!(request.envelope.contains("<prop:CreditCard><prop:CVV>999</prop:CVV></prop:CreditCard>"));
    assert_eq!(request.sensitive_values, vec!["999".to_string()]);
}

#[tokio::test]
async fn ach_overrides_are_sent_by_name() {
    let client = client(reply("CreditPayment", TRANSACTION));
    let overrides = PaymentOverrides::ach(AchOverride {
        bank_account_type: Some(BankAccountType::Checking),
        sec_code: Some(SecCode::Ppd),
    });

    client.credit(&payment(), &overrides).await.unwrap();

    assert!(client.service().last().envelope.contains(
        "<prop:Ach><prop:BankAccountType>Checking</prop:BankAccountType><prop:SecCode>PPD</prop:SecCode></prop:Ach>"
    ));
}

#[tokio::test]
async fn prior_payments_reference_the_original_transaction() {
    let client = client(reply("CapturePaymentV2", TRANSACTION));
    let prior = PriorPayment {
        original_transaction_id: "335".to_string(),
        transaction_history_id: Some(8289705),
        merchant_profile_id: Some(7),
        ..Default::default()
    };

    client.capture(&prior, 500).await.unwrap();
    client.void_payment(&prior).await.unwrap();
    client.refund(&prior, 250).await.unwrap();

    assert_eq!(
        client.service().operations(),
        vec![
            SpsOperation::CapturePaymentV2,
            SpsOperation::VoidPaymentV2,
            SpsOperation::RefundPaymentV2,
        ]
    );
    let refund = client.service().last().envelope;
    assert!(refund.contains(
        "<con:request><prop:Amount>250</prop:Amount><prop:MerchantProfileId>7</prop:MerchantProfileId>\
         <prop:OriginalTransactionId>335</prop:OriginalTransactionId>\
         <prop:TransactionHistoryId>8289705</prop:TransactionHistoryId></con:request>"
    ));
}

#[tokio::test]
async fn a_successful_transaction_without_details_is_an_error() {
    let client = client(reply("VoidPaymentV2", &format!("{SUCCESS}<a:Transaction i:nil=\"true\"/>")));

    let error = client
        .void_payment(&PriorPayment::default())
        .await
        .unwrap_err();

    assert!(matches!(
        error.current_context(),
        ProtectPayError::MissingField("Transaction")
    ));
}

#[tokio::test]
async fn temp_tokens_identify_the_payer() {
    let client = client(reply(
        "GetTempToken",
        &format!("<a:CredentialId>77</a:CredentialId><a:PayerId>111</a:PayerId>{SUCCESS}<a:TempToken>tmp-abc</a:TempToken>"),
    ));

    let token = client
        .get_temp_token("111", Some("Jane Doe"), Some(600))
        .await
        .unwrap();

    assert_eq!(token, "tmp-abc");
    let envelope = client.service().last().envelope;
    assert!(envelope.contains("<con:GetTempToken><con:tempTokenRequest><typ:Identification>"));
    assert!(envelope.contains(
        "<typ:PayerInfo><typ:Id>111</typ:Id><typ:Name>Jane Doe</typ:Name></typ:PayerInfo>\
         <typ:TokenProperties><typ:DurationSeconds>600</typ:DurationSeconds></typ:TokenProperties>"
    ));
}

#[tokio::test]
async fn unreadable_replies_keep_their_content_out_of_the_report() {
    let client = client(reply(
        "GetTempToken",
        &format!("{SUCCESS}<a:TempToken>tmp-secret-1</a:TempToken><a:TempToken>tmp-secret-2</a:TempToken>"),
    ));

    let error = client
        .get_temp_token("111", None, None)
        .await
        .unwrap_err();

    assert!(matches!(
        error.current_context(),
        ProtectPayError::ResponseDeserializationFailed
    ));
    let report = format!("{error:?}");
    assert!(!report.contains("tmp-secret"));
}

#[test]
fn requests_print_without_their_envelope() {
    let request = SpsRequest {
        operation: SpsOperation::GetTempToken,
        envelope: "<typ:AuthenticationToken>token-123</typ:AuthenticationToken>".to_string(),
        sensitive_values: vec!["999".to_string()],
    };

    let printed = format!("{request:?}");

    assert!(printed.contains("GetTempToken"));
    assert!(!printed.contains("token-123"));
    assert!(!printed.contains("999"));
}

#[test]
fn clients_print_without_their_token() {
    let config = ProtectPayConfig::new("TOKEN-abc-secret", "9876", Environment::Testing);
    let client = ProtectPayClient::new(config).unwrap();

    let printed = format!("{client:?}");

    assert!(!printed.contains("TOKEN-abc-secret"));
}

#[tokio::test]
async fn merchant_profiles_send_processor_data() {
    let client = client(reply(
        "CreateMerchantProfile",
        &format!("<a:ProfileId>123456</a:ProfileId>{SUCCESS}"),
    ));
    let data = BTreeMap::from([
        ("certStr".to_string(), "cert".to_string()),
        ("accountNum".to_string(), "32287391".to_string()),
    ]);

    let profile_id = client
        .create_merchant_profile("LegacyProPay", "Main", &data)
        .await
        .unwrap();

    assert_eq!(profile_id, 123456);
    assert!(client.service().last().envelope.contains(
        "<prop:ProcessorData><prop:ProcessorDatum><prop:ProcessorField>accountNum</prop:ProcessorField>\
         <prop:Value>32287391</prop:Value></prop:ProcessorDatum>"
    ));
}
