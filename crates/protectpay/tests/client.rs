#![allow(clippy::unwrap_used)]

use protectpay::{
    Environment, Payment, PaymentOverrides, ProtectPayClient, ProtectPayConfig, ProtectPayError,
};
use wiremock::{
    matchers::{body_string_contains, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

fn client(server: &MockServer) -> ProtectPayClient {
    let config = ProtectPayConfig::new("token-123", "9876", Environment::Testing)
        .with_endpoint(format!("{}/protectpay/sps.svc", server.uri()));
    ProtectPayClient::new(config).unwrap()
}

fn reply(operation: &str, result: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?><s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/"><s:Body><{operation}Response xmlns="http://propay.com/SPS/contracts"><{operation}Result xmlns:a="http://propay.com/SPS/types" xmlns:i="http://www.w3.org/2001/XMLSchema-instance">{result}</{operation}Result></{operation}Response></s:Body></s:Envelope>"#
    )
}

#[tokio::test]
async fn calls_are_posted_as_soap_with_an_action_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/protectpay/sps.svc"))
        .and(header("content-type", "text/xml; charset=utf-8"))
        .and(header(
            "soapaction",
            "\"http://propay.com/SPS/contracts/SPSService/CreatePayer\"",
        ))
        .and(body_string_contains(
            "<typ:AuthenticationToken>token-123</typ:AuthenticationToken>",
        ))
        .and(body_string_contains("<con:name>Jane Doe</con:name>"))
        .respond_with(ResponseTemplate::new(200).set_body_string(reply(
            "CreatePayer",
            "<a:ExternalAccountID>5823760912097888</a:ExternalAccountID>\
             <a:RequestResult><a:ResultCode>00</a:ResultCode><a:ResultMessage/>\
             <a:ResultValue>SUCCESS</a:ResultValue></a:RequestResult>",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let payer_account_id = client(&server).create_payer("Jane Doe").await.unwrap();

    assert_eq!(payer_account_id, "5823760912097888");
}

#[tokio::test]
async fn declined_transactions_raise_the_result_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header(
            "soapaction",
            "\"http://propay.com/SPS/contracts/SPSService/ProcessPaymentMethodTransaction\"",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string(reply(
            "ProcessPaymentMethodTransaction",
            "<a:RequestResult><a:ResultCode>58</a:ResultCode>\
             <a:ResultMessage>Credit card declined - Insufficient funds</a:ResultMessage>\
             <a:ResultValue>FAILURE</a:ResultValue></a:RequestResult><a:Transaction i:nil=\"true\"/>",
        )))
        .mount(&server)
        .await;
    let payment = Payment {
        payer_account_id: "111".to_string(),
        payment_method_id: "pm-1".to_string(),
        amount: 1000,
        ..Default::default()
    };

    let report = client(&server)
        .auth_and_capture(&payment, &PaymentOverrides::none(), false)
        .await
        .unwrap_err();

    match report.current_context() {
        ProtectPayError::ResultCode {
            code,
            value,
            message,
        } => {
            assert_eq!(code, "58");
            assert_eq!(value.as_deref(), Some("FAILURE"));
            assert_eq!(
                message.as_deref(),
                Some("Credit card declined - Insufficient funds")
            );
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn soap_faults_are_reported_with_their_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string(
            r#"<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/"><s:Body><s:Fault><faultcode xmlns:a="http://schemas.microsoft.com/ws/2005/05/addressing/none">a:ActionNotSupported</faultcode><faultstring xml:lang="en-US">The message cannot be processed at the receiver.</faultstring></s:Fault></s:Body></s:Envelope>"#,
        ))
        .mount(&server)
        .await;

    let report = client(&server).delete_payer("111").await.unwrap_err();

    match report.current_context() {
        ProtectPayError::Fault {
            status_code,
            code,
            message,
        } => {
            assert_eq!(*status_code, 500);
            assert_eq!(code.as_deref(), Some("a:ActionNotSupported"));
            assert_eq!(
                message.as_deref(),
                Some("The message cannot be processed at the receiver.")
            );
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn non_soap_errors_keep_the_raw_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&server)
        .await;

    let report = client(&server).delete_payer("111").await.unwrap_err();

    match report.current_context() {
        ProtectPayError::Fault {
            status_code,
            code,
            message,
        } => {
            assert_eq!(*status_code, 503);
            assert_eq!(code, &None);
            assert_eq!(message.as_deref(), Some("Service Unavailable"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_endpoints_surface_the_transport_error() {
    let config = ProtectPayConfig::new("token-123", "9876", Environment::Testing)
        .with_endpoint("http://127.0.0.1:1/sps.svc");
    let report = ProtectPayClient::new(config)
        .unwrap()
        .delete_payer("111")
        .await
        .unwrap_err();

    assert!(matches!(report.current_context(), ProtectPayError::Transport(_)));
}
