use std::str::FromStr;

use error_stack::{report, ResultExt};
use masking::PeekInterface;
use quick_xml::{
    events::{BytesEnd, BytesStart, Event},
    Reader, Writer,
};
use serde::{de::DeserializeOwned, Serialize};
use time::{
    format_description::well_known::Rfc3339, macros::format_description, OffsetDateTime,
    PrimitiveDateTime,
};

use super::{requests, responses};
use crate::{
    errors::{CustomResult, ProtectPayError},
    logger,
    services::SpsOperation,
    types::{
        AchOverride, BillingInfo, Country, CreditCardOverride, Payer, Payment,
        PaymentMethod, PaymentMethodType, PaymentOverrides, PaymentResponse, PriorPayment,
    },
};

pub const SOAP_ENVELOPE_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";
pub const CONTRACTS_NS: &str = "http://propay.com/SPS/contracts";
pub const TYPES_NS: &str = "http://propay.com/SPS/types";
pub const EXTERNAL_CONTRACTS_NS: &str =
    "http://schemas.datacontract.org/2004/07/Propay.Contracts.SPS.External";

const SUCCESS_CODE: &str = "00";

// Depth of the `<Operation>Response` and `<Operation>Result` elements below `Envelope`.
const OPERATION_DEPTH: usize = 3;
const RESULT_DEPTH: usize = 4;

/// Wraps the parameters of `operation` in a SOAP 1.1 envelope.
pub fn build_envelope<T: Serialize>(
    operation: SpsOperation,
    parameters: &T,
) -> CustomResult<String, ProtectPayError> {
    let root = format!("con:{operation}");
    let body = quick_xml::se::to_string_with_root(&root, parameters)
        .change_context(ProtectPayError::RequestEncodingFailed)
        .attach_printable_lazy(|| format!("operation: {operation}"))?;

    Ok(format!(
        r#"<soapenv:Envelope xmlns:soapenv="{SOAP_ENVELOPE_NS}" xmlns:con="{CONTRACTS_NS}" xmlns:typ="{TYPES_NS}" xmlns:prop="{EXTERNAL_CONTRACTS_NS}"><soapenv:Header/><soapenv:Body>{body}</soapenv:Body></soapenv:Envelope>"#
    ))
}

/// Rewrites a response envelope into a shape serde can follow.
///
/// Namespace prefixes and all attributes are dropped, elements marked `nil="true"` are
/// removed, and the operation specific `<X>Response` / `<X>Result` wrappers become
/// `Response` / `Result`.
pub fn normalize_envelope(xml: &str) -> CustomResult<String, ProtectPayError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let mut writer = Writer::new(Vec::new());
    let mut open: Vec<String> = Vec::new();

    loop {
        let event = reader
            .read_event()
            .change_context(ProtectPayError::ResponseDeserializationFailed)?;
        let written = match event {
            Event::Start(start) => {
                let element = local_element(&start, open.len() + 1);
                open.push(String::from_utf8_lossy(element.name().as_ref()).into_owned());
                writer.write_event(Event::Start(element))
            }
            Event::Empty(start) if is_nil(&start) => continue,
            Event::Empty(start) => {
                writer.write_event(Event::Empty(local_element(&start, open.len() + 1)))
            }
            Event::End(_) => {
                let name = open.pop().unwrap_or_default();
                writer.write_event(Event::End(BytesEnd::new(name)))
            }
            Event::Eof => break,
            Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_) => continue,
            other => writer.write_event(other),
        };
        written.change_context(ProtectPayError::ResponseDeserializationFailed)?;
    }

    String::from_utf8(writer.into_inner())
        .change_context(ProtectPayError::ResponseDeserializationFailed)
}

fn local_element(start: &BytesStart<'_>, depth: usize) -> BytesStart<'static> {
    let local = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
    let name = match depth {
        OPERATION_DEPTH if local.ends_with("Response") => "Response".to_owned(),
        RESULT_DEPTH if local.ends_with("Result") => "Result".to_owned(),
        _ => local,
    };
    BytesStart::new(name)
}

fn is_nil(start: &BytesStart<'_>) -> bool {
    start.attributes().flatten().any(|attribute| {
        attribute.key.local_name().as_ref() == b"nil" && attribute.value.as_ref() == b"true"
    })
}

/// Extracts the result of an operation from its response envelope.
pub fn parse_result<T: DeserializeOwned>(xml: &str) -> CustomResult<T, ProtectPayError> {
    let normalized = normalize_envelope(xml)?;
    let envelope: responses::SoapEnvelope<T> = quick_xml::de::from_str(&normalized)
        .change_context(ProtectPayError::ResponseDeserializationFailed)
        .attach_printable_lazy(|| format!("response length: {}", normalized.len()))?;
    Ok(envelope.body.response.result)
}

/// Reads a SOAP fault, `None` if `xml` is not one.
pub fn parse_fault(xml: &str) -> Option<responses::SoapFault> {
    let normalized = normalize_envelope(xml).ok()?;
    quick_xml::de::from_str::<responses::FaultEnvelope>(&normalized)
        .map(|envelope| envelope.body.fault)
        .ok()
}

/// Fails unless the gateway reported `00`.
pub fn check_result(result: Option<&responses::ResultInfo>) -> CustomResult<(), ProtectPayError> {
    let result = result.ok_or_else(|| report!(ProtectPayError::MissingRequestResult))?;
    let code = result.result_code.as_deref().map(str::trim).unwrap_or_default();
    if code == SUCCESS_CODE {
        return Ok(());
    }

    logger::warn!(
        result_code = code,
        result_value = ?result.result_value,
        result_message = ?result.result_message,
        "protectpay rejected the request"
    );
    Err(report!(ProtectPayError::ResultCode {
        code: code.to_owned(),
        value: non_empty(result.result_value.clone()),
        message: non_empty(result.result_message.clone()),
    }))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

fn parse_value<T: FromStr>(value: Option<String>) -> Option<T> {
    non_empty(value).and_then(|value| value.trim().parse().ok())
}

/// `xs:dateTime`, with or without an offset. Values without one are taken as UTC.
fn parse_date_time(value: &str) -> Option<OffsetDateTime> {
    let value = value.trim();
    OffsetDateTime::parse(value, &Rfc3339).ok().or_else(|| {
        PrimitiveDateTime::parse(
            value,
            format_description!(
                "[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]"
            ),
        )
        .ok()
        .map(PrimitiveDateTime::assume_utc)
    })
}

impl From<&Payer> for requests::PayerData {
    fn from(payer: &Payer) -> Self {
        Self {
            email_address: payer.email_address.clone(),
            external_id1: payer.external_id1.clone(),
            external_id2: payer.external_id2.clone(),
            name: payer.account_name.clone(),
        }
    }
}

impl From<responses::PayerInfo> for Payer {
    fn from(info: responses::PayerInfo) -> Self {
        Self {
            payer_account_id: non_empty(info.payer_account_id),
            account_name: non_empty(info.name),
            email_address: non_empty(info.email_address),
            external_id1: non_empty(info.external_id1),
            external_id2: non_empty(info.external_id2),
        }
    }
}

impl From<&BillingInfo> for requests::Billing {
    fn from(billing: &BillingInfo) -> Self {
        Self {
            address1: billing.address1.clone(),
            address2: billing.address2.clone(),
            address3: billing.address3.clone(),
            city: billing.city.clone(),
            country: billing.country.clone(),
            email: billing.email_address.clone(),
            state: billing.state.clone(),
            telephone_number: billing.telephone_number.clone(),
            zip_code: billing.zip_code.clone(),
        }
    }
}

impl From<responses::BillingResponse> for BillingInfo {
    fn from(billing: responses::BillingResponse) -> Self {
        Self {
            address1: non_empty(billing.address1),
            address2: non_empty(billing.address2),
            address3: non_empty(billing.address3),
            city: non_empty(billing.city),
            state: non_empty(billing.state),
            zip_code: non_empty(billing.zip_code),
            country: non_empty(billing.country).map(|country| Country::from(country.as_str())),
            email_address: non_empty(billing.email),
            telephone_number: non_empty(billing.telephone_number),
        }
    }
}

impl From<&PaymentMethod> for requests::PaymentMethodAdd {
    fn from(method: &PaymentMethod) -> Self {
        Self {
            account_country_code: method.account_country_code.clone(),
            account_name: method.account_name.clone(),
            account_number: method.account_number.clone(),
            bank_number: method.bank_number.clone(),
            billing_information: method.billing.as_ref().map(requests::Billing::from),
            description: method.description.clone(),
            duplicate_action: method.duplicate_action.clone(),
            expiration_date: method.expiration_date.clone(),
            payer_account_id: method.payer_account_id.clone(),
            payment_method_type: method.method_type.clone(),
            priority: method.priority,
            protected: method.payer_protected,
        }
    }
}

impl From<&PaymentMethod> for requests::PaymentMethodUpdate {
    fn from(method: &PaymentMethod) -> Self {
        Self {
            account_name: method.account_name.clone(),
            bank_account_type: method
                .method_type
                .as_ref()
                .and_then(PaymentMethodType::bank_account_type),
            billing_information: method.billing.as_ref().map(requests::Billing::from),
            description: method.description.clone(),
            expiration_date: method.expiration_date.clone(),
            payer_account_id: method.payer_account_id.clone(),
            payment_method_id: method.payment_method_id.clone(),
            protected: method.payer_protected,
        }
    }
}

impl From<responses::PaymentMethodInformation> for PaymentMethod {
    fn from(info: responses::PaymentMethodInformation) -> Self {
        let date_created = non_empty(info.date_created).and_then(|value| {
            let parsed = parse_date_time(&value);
            if parsed.is_none() {
                logger::warn!(date_created = %value, "unparseable payment method creation date");
            }
            parsed
        });
        Self {
            payment_method_id: non_empty(info.payment_method_id),
            payer_account_id: None,
            method_type: non_empty(info.payment_method_type)
                .map(|value| PaymentMethodType::from(value.as_str())),
            account_number: non_empty(info.obfuscated_account_number).map(Into::into),
            account_name: non_empty(info.account_name),
            account_country_code: None,
            bank_number: None,
            expiration_date: non_empty(info.expiration_date),
            description: non_empty(info.description),
            duplicate_action: None,
            payer_protected: parse_value(info.protected),
            priority: parse_value(info.priority),
            billing: info.billing_information.map(BillingInfo::from),
            date_created,
        }
    }
}

impl From<&Payment> for requests::Transaction {
    fn from(payment: &Payment) -> Self {
        Self {
            amount: payment.amount,
            comment1: payment.comment1.clone(),
            comment2: payment.comment2.clone(),
            currency_code: payment.currency_code.clone(),
            invoice: payment.invoice.clone(),
            merchant_profile_id: payment.merchant_profile_id,
            payer_account_id: payment.payer_account_id.clone(),
        }
    }
}

impl From<&CreditCardOverride> for requests::CreditCardOverrides {
    fn from(card: &CreditCardOverride) -> Self {
        Self {
            billing: card.billing.as_ref().map(requests::Billing::from),
            cvv: card.cvv.clone(),
            expiration_date: card.expiration_date.clone(),
            full_name: card.full_name.clone(),
        }
    }
}

impl From<&AchOverride> for requests::AchOverrides {
    fn from(ach: &AchOverride) -> Self {
        Self {
            bank_account_type: ach.bank_account_type.clone(),
            sec_code: ach.sec_code.clone(),
        }
    }
}

/// The payer override is only sent with a non-empty IP address, taken from `overrides`
/// first and from the payment otherwise.
pub fn payment_info_overrides(
    overrides: &PaymentOverrides,
    payment: &Payment,
) -> requests::PaymentInfoOverrides {
    let ip_address = overrides
        .payer
        .as_ref()
        .and_then(|payer| payer.ip_address.clone())
        .filter(|ip| !ip.trim().is_empty())
        .or_else(|| non_empty(payment.input_ip_address.clone()));

    requests::PaymentInfoOverrides {
        ach: overrides.ach.as_ref().map(requests::AchOverrides::from),
        credit_card: overrides
            .credit_card
            .as_ref()
            .map(requests::CreditCardOverrides::from),
        payer: ip_address.map(|ip_address| requests::PayerOverrides { ip_address }),
    }
}

/// Values of `overrides` that must not be logged.
pub fn sensitive_values(overrides: &PaymentOverrides) -> Vec<String> {
    overrides
        .credit_card
        .as_ref()
        .and_then(|card| card.cvv.as_ref())
        .map(|cvv| cvv.peek().clone())
        .filter(|cvv| !cvv.is_empty())
        .into_iter()
        .collect()
}

pub fn prior_transaction(prior: &PriorPayment, amount: Option<i64>) -> requests::PriorTransaction {
    requests::PriorTransaction {
        amount,
        comment1: prior.comment1.clone(),
        comment2: prior.comment2.clone(),
        merchant_profile_id: prior.merchant_profile_id,
        original_transaction_id: prior.original_transaction_id.clone(),
        transaction_history_id: prior.transaction_history_id,
    }
}

impl From<responses::TransactionInformation> for PaymentResponse {
    fn from(info: responses::TransactionInformation) -> Self {
        let result = info.result_code.unwrap_or_default();
        Self {
            transaction_id: non_empty(info.transaction_id),
            transaction_history_id: parse_value(info.transaction_history_id),
            authorization_code: non_empty(info.authorization_code),
            avs_code: non_empty(info.avs_code),
            transaction_result: non_empty(info.transaction_result),
            result_code: non_empty(result.result_code),
            result_message: non_empty(result.result_message),
            result_value: non_empty(result.result_value),
            conversion_rate: parse_value(info.currency_conversion_rate),
            converted_amount: parse_value(info.currency_converted_amount),
            converted_currency_code: non_empty(info.currency_converted_currency_code),
        }
    }
}
