pub mod requests;
pub mod responses;
#[cfg(test)]
mod test;
pub mod transformers;

use std::collections::BTreeMap;

use error_stack::{report, ResultExt};
use serde::{de::DeserializeOwned, Serialize};

use self::{requests::Identification, responses::RequestResult};
use crate::{
    configs::ProtectPayConfig,
    errors::{CustomResult, ProtectPayError},
    logger,
    services::{HttpSpsService, SpsOperation, SpsRequest, SpsService},
    types::{Payer, Payment, PaymentMethod, PaymentOverrides, PaymentResponse, PriorPayment},
};

/// Transactions that charge or credit a stored payment method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TransactionKind {
    Auth,
    Capture,
    Credit,
}

impl TransactionKind {
    fn operation(self, recurring: bool) -> SpsOperation {
        match (self, recurring) {
            (Self::Auth, false) => SpsOperation::AuthorizePaymentMethodTransaction,
            (Self::Auth, true) => SpsOperation::AuthorizePaymentMethodTransactionRecurring,
            (Self::Capture, false) => SpsOperation::ProcessPaymentMethodTransaction,
            (Self::Capture, true) => SpsOperation::ProcessPaymentMethodTransactionRecurring,
            (Self::Credit, _) => SpsOperation::CreditPayment,
        }
    }
}

/// Client of one ProtectPay biller account.
///
/// Every call is a single SOAP round trip. A result code other than `00` is returned as
/// [`ProtectPayError::ResultCode`].
#[derive(Debug, Clone)]
pub struct ProtectPayClient<S = HttpSpsService> {
    id: Identification,
    service: S,
}

impl ProtectPayClient<HttpSpsService> {
    pub fn new(config: ProtectPayConfig) -> CustomResult<Self, ProtectPayError> {
        let service = HttpSpsService::new(&config)?;
        Ok(Self::with_service(config, service))
    }

    pub fn from_env() -> CustomResult<Self, ProtectPayError> {
        Self::new(ProtectPayConfig::from_env()?)
    }
}

impl<S: SpsService> ProtectPayClient<S> {
    pub fn with_service(config: ProtectPayConfig, service: S) -> Self {
        Self {
            id: Identification {
                authentication_token: config.authentication_token,
                biller_account_id: config.biller_account_id,
            },
            service,
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Creates a payer and returns the payer account id assigned to it.
    pub async fn create_payer(&self, account_name: &str) -> CustomResult<String, ProtectPayError> {
        let parameters = requests::CreatePayer {
            id: &self.id,
            name: account_name,
        };
        let result: responses::CreateAccountInformationResult =
            self.call(SpsOperation::CreatePayer, &parameters).await?;
        required(result.external_account_id, "ExternalAccountID")
    }

    /// Creates a payer from every field of `payer` and returns its payer account id.
    pub async fn create_payer_with_data(&self, payer: &Payer) -> CustomResult<String, ProtectPayError> {
        let parameters = requests::CreatePayerWithData {
            id: &self.id,
            data: payer.into(),
        };
        let result: responses::CreateAccountInformationResult =
            self.call(SpsOperation::CreatePayerWithData, &parameters).await?;
        required(result.external_account_id, "ExternalAccountID")
    }

    pub async fn update_payer(&self, payer: &Payer) -> CustomResult<(), ProtectPayError> {
        let parameters = requests::EditPayer {
            id: &self.id,
            request: requests::EditPayerRequest {
                payer_account_id: payer.payer_account_id.clone(),
                updated_data: payer.into(),
            },
        };
        self.call::<_, responses::ResultInfo>(SpsOperation::EditPayerV2, &parameters)
            .await
            .map(|_| ())
    }

    pub async fn delete_payer(&self, payer_account_id: &str) -> CustomResult<(), ProtectPayError> {
        let parameters = requests::PayerAccount {
            id: &self.id,
            payer_account_id,
        };
        self.call::<_, responses::ResultInfo>(SpsOperation::DeletePayer, &parameters)
            .await
            .map(|_| ())
    }

    /// Lists the payers matching `criteria`, or every payer without one.
    pub async fn get_payers(&self, criteria: Option<&Payer>) -> CustomResult<Vec<Payer>, ProtectPayError> {
        let parameters = requests::GetPayers {
            id: &self.id,
            criteria: criteria.map(requests::PayerData::from),
        };
        let result: responses::GetPayersResult = self.call(SpsOperation::GetPayers, &parameters).await?;
        Ok(result
            .payers
            .map(|list| list.payers.into_iter().map(Payer::from).collect())
            .unwrap_or_default())
    }

    /// Stores a payment method and returns its id.
    pub async fn create_payment_method(
        &self,
        payment_method: &PaymentMethod,
    ) -> CustomResult<String, ProtectPayError> {
        let parameters = requests::CreatePaymentMethod {
            id: &self.id,
            payment_method: payment_method.into(),
        };
        let result: responses::CreatePaymentMethodResult =
            self.call(SpsOperation::CreatePaymentMethod, &parameters).await?;
        required(result.payment_method_id, "PaymentMethodId")
    }

    /// Updates the name, expiration, description, billing and protection of a stored method.
    pub async fn update_payment_method(
        &self,
        payment_method: &PaymentMethod,
    ) -> CustomResult<(), ProtectPayError> {
        let parameters = requests::EditPaymentMethod {
            id: &self.id,
            payment_method: payment_method.into(),
        };
        self.call::<_, responses::ResultInfo>(SpsOperation::EditPaymentMethod, &parameters)
            .await
            .map(|_| ())
    }

    pub async fn delete_payment_method(
        &self,
        payer_account_id: &str,
        payment_method_id: &str,
    ) -> CustomResult<(), ProtectPayError> {
        let parameters = requests::PayerPaymentMethod {
            id: &self.id,
            payer_account_id,
            payment_method_id,
        };
        self.call::<_, responses::ResultInfo>(SpsOperation::DeletePaymentMethod, &parameters)
            .await
            .map(|_| ())
    }

    pub async fn get_payment_methods(
        &self,
        payer_account_id: &str,
    ) -> CustomResult<Vec<PaymentMethod>, ProtectPayError> {
        let parameters = requests::PayerAccount {
            id: &self.id,
            payer_account_id,
        };
        let result: responses::PaymentMethodsResult = self
            .call(SpsOperation::GetAllPayerPaymentMethods, &parameters)
            .await?;
        Ok(payment_methods(result, payer_account_id))
    }

    /// Fetches one stored payment method, `None` when the payer has no such method.
    pub async fn get_payment_method(
        &self,
        payer_account_id: &str,
        payment_method_id: &str,
    ) -> CustomResult<Option<PaymentMethod>, ProtectPayError> {
        let parameters = requests::PayerPaymentMethod {
            id: &self.id,
            payer_account_id,
            payment_method_id,
        };
        let result: responses::PaymentMethodsResult = self
            .call(SpsOperation::GetPayerPaymentMethod, &parameters)
            .await?;
        Ok(payment_methods(result, payer_account_id).into_iter().next())
    }

    /// Authorizes `payment` without capturing it.
    pub async fn auth(
        &self,
        payment: &Payment,
        overrides: &PaymentOverrides,
        recurring: bool,
    ) -> CustomResult<PaymentResponse, ProtectPayError> {
        self.transact(TransactionKind::Auth, payment, overrides, recurring)
            .await
    }

    /// Authorizes and captures `payment` in one call.
    pub async fn auth_and_capture(
        &self,
        payment: &Payment,
        overrides: &PaymentOverrides,
        recurring: bool,
    ) -> CustomResult<PaymentResponse, ProtectPayError> {
        self.transact(TransactionKind::Capture, payment, overrides, recurring)
            .await
    }

    /// Credits the payment method without a prior transaction. Must be enabled on the account.
    pub async fn credit(
        &self,
        payment: &Payment,
        overrides: &PaymentOverrides,
    ) -> CustomResult<PaymentResponse, ProtectPayError> {
        self.transact(TransactionKind::Credit, payment, overrides, false)
            .await
    }

    /// Captures `amount` of a prior authorization.
    pub async fn capture(
        &self,
        prior: &PriorPayment,
        amount: i64,
    ) -> CustomResult<PaymentResponse, ProtectPayError> {
        self.prior_transaction(SpsOperation::CapturePaymentV2, prior, Some(amount))
            .await
    }

    /// Voids a transaction that has not settled yet.
    pub async fn void_payment(&self, prior: &PriorPayment) -> CustomResult<PaymentResponse, ProtectPayError> {
        self.prior_transaction(SpsOperation::VoidPaymentV2, prior, None)
            .await
    }

    /// Refunds `amount` of a settled transaction.
    pub async fn refund(
        &self,
        prior: &PriorPayment,
        amount: i64,
    ) -> CustomResult<PaymentResponse, ProtectPayError> {
        self.prior_transaction(SpsOperation::RefundPaymentV2, prior, Some(amount))
            .await
    }

    /// Issues a temporary token for the hosted payment pages of a payer.
    pub async fn get_temp_token(
        &self,
        payer_account_id: &str,
        payer_name: Option<&str>,
        duration_seconds: Option<u32>,
    ) -> CustomResult<String, ProtectPayError> {
        let parameters = requests::GetTempToken {
            request: requests::TempTokenRequest {
                identification: &self.id,
                payer_info: requests::PayerInformation {
                    id: payer_account_id.to_owned(),
                    name: payer_name.map(str::to_owned),
                },
                token_properties: requests::TokenProperties { duration_seconds },
            },
        };
        let result: responses::TempTokenResult =
            self.call(SpsOperation::GetTempToken, &parameters).await?;
        required(result.temp_token, "TempToken")
    }

    /// Registers processor credentials as a merchant profile and returns the profile id.
    pub async fn create_merchant_profile(
        &self,
        payment_processor: &str,
        profile_name: &str,
        processor_data: &BTreeMap<String, String>,
    ) -> CustomResult<i64, ProtectPayError> {
        let parameters = requests::CreateMerchantProfile {
            id: &self.id,
            merchant_profile: requests::MerchantProfileData {
                payment_processor: payment_processor.to_owned(),
                processor_data: requests::ProcessorData {
                    items: processor_data
                        .iter()
                        .map(|(field, value)| requests::ProcessorDatum {
                            processor_field: field.clone(),
                            value: value.clone(),
                        })
                        .collect(),
                },
                profile_name: profile_name.to_owned(),
            },
        };
        let result: responses::CreateMerchantProfileResult = self
            .call(SpsOperation::CreateMerchantProfile, &parameters)
            .await?;
        let profile_id = required(result.profile_id, "ProfileId")?;
        profile_id
            .trim()
            .parse::<i64>()
            .change_context(ProtectPayError::ResponseDeserializationFailed)
            .attach_printable_lazy(|| format!("ProfileId: {profile_id}"))
    }

    async fn transact(
        &self,
        kind: TransactionKind,
        payment: &Payment,
        overrides: &PaymentOverrides,
        recurring: bool,
    ) -> CustomResult<PaymentResponse, ProtectPayError> {
        let parameters = requests::PaymentMethodTransaction {
            id: &self.id,
            transaction: payment.into(),
            payment_method_id: &payment.payment_method_id,
            overrides: transformers::payment_info_overrides(overrides, payment),
        };
        let result: responses::TransactionResult = self
            .call_with_secrets(
                kind.operation(recurring),
                &parameters,
                transformers::sensitive_values(overrides),
            )
            .await?;
        transaction_response(result)
    }

    async fn prior_transaction(
        &self,
        operation: SpsOperation,
        prior: &PriorPayment,
        amount: Option<i64>,
    ) -> CustomResult<PaymentResponse, ProtectPayError> {
        let parameters = requests::PriorTransactionRequest {
            id: &self.id,
            request: transformers::prior_transaction(prior, amount),
        };
        let result: responses::TransactionResult = self.call(operation, &parameters).await?;
        transaction_response(result)
    }

    async fn call<P, R>(&self, operation: SpsOperation, parameters: &P) -> CustomResult<R, ProtectPayError>
    where
        P: Serialize + Sync,
        R: DeserializeOwned + RequestResult,
    {
        self.call_with_secrets(operation, parameters, Vec::new())
            .await
    }

    /// Builds the envelope, invokes the service and checks the result code of the reply.
    async fn call_with_secrets<P, R>(
        &self,
        operation: SpsOperation,
        parameters: &P,
        sensitive_values: Vec<String>,
    ) -> CustomResult<R, ProtectPayError>
    where
        P: Serialize + Sync,
        R: DeserializeOwned + RequestResult,
    {
        let envelope = transformers::build_envelope(operation, parameters)?;
        let raw = self
            .service
            .invoke(SpsRequest {
                operation,
                envelope,
                sensitive_values,
            })
            .await?;
        let result: R = transformers::parse_result(&raw)
            .attach_printable_lazy(|| format!("operation: {operation}"))?;
        transformers::check_result(result.request_result())
            .attach_printable_lazy(|| format!("operation: {operation}"))?;
        logger::debug!(%operation, "protectpay call succeeded");
        Ok(result)
    }
}

fn required(value: Option<String>, field: &'static str) -> CustomResult<String, ProtectPayError> {
    value
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| report!(ProtectPayError::MissingField(field)))
}

fn payment_methods(result: responses::PaymentMethodsResult, payer_account_id: &str) -> Vec<PaymentMethod> {
    result
        .payment_methods
        .map(|list| list.payment_methods)
        .unwrap_or_default()
        .into_iter()
        .map(|info| PaymentMethod {
            payer_account_id: Some(payer_account_id.to_owned()),
            ..PaymentMethod::from(info)
        })
        .collect()
}

fn transaction_response(result: responses::TransactionResult) -> CustomResult<PaymentResponse, ProtectPayError> {
    result
        .transaction
        .map(PaymentResponse::from)
        .ok_or_else(|| report!(ProtectPayError::MissingField("Transaction")))
}
