use masking::{CardNumber, Secret};
use rust_decimal::Decimal;
use time::OffsetDateTime;

wire_enum! {
    pub enum PaymentMethodType {
        Visa => "Visa",
        MasterCard => "MasterCard",
        Amex => "AMEX",
        Discover => "Discover",
        DinersClub => "DinersClub",
        Jcb => "JCB",
        ProPayToProPay => "ProPayToProPay",
        Checking => "Checking",
        Savings => "Savings",
    }
}

wire_enum! {
    /// How the gateway treats a payment method that is already on file.
    pub enum DuplicateAction {
        SaveNew => "SAVENEW",
        Error => "ERROR",
        ReturnDup => "RETURNDUP",
    }
}

wire_enum! {
    /// ISO 3166 numeric country of a bank account.
    pub enum AccountCountryCode {
        UnitedStates => "840" | "USA",
        Canada => "124" | "CAN",
    }
}

wire_enum! {
    pub enum BankAccountType {
        Checking => "Checking",
        Savings => "Savings",
    }
}

wire_enum! {
    /// ACH standard entry class.
    pub enum SecCode {
        Web => "WEB",
        Tel => "TEL",
        Ppd => "PPD",
        Ccd => "CCD",
    }
}

wire_enum! {
    pub enum Country {
        Usa => "USA",
        Can => "CAN",
    }
}

impl PaymentMethodType {
    /// Bank account methods, the only ones that carry a bank account type on update.
    pub fn is_bank_account(&self) -> bool {
        matches!(self, Self::Checking | Self::Savings)
    }

    pub fn bank_account_type(&self) -> Option<BankAccountType> {
        match self {
            Self::Checking => Some(BankAccountType::Checking),
            Self::Savings => Some(BankAccountType::Savings),
            _ => None,
        }
    }
}

/// A customer record on the gateway.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payer {
    /// Assigned by the gateway on creation.
    pub payer_account_id: Option<String>,
    pub account_name: Option<String>,
    pub email_address: Option<String>,
    pub external_id1: Option<String>,
    pub external_id2: Option<String>,
}

impl Payer {
    pub fn new(account_name: impl Into<String>) -> Self {
        Self {
            account_name: Some(account_name.into()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BillingInfo {
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub address3: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<Country>,
    pub email_address: Option<String>,
    pub telephone_number: Option<String>,
}

/// A card or bank account stored against a payer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentMethod {
    pub payment_method_id: Option<String>,
    pub payer_account_id: Option<String>,
    pub method_type: Option<PaymentMethodType>,
    /// Full card or account number on create, obfuscated when read back.
    pub account_number: Option<Secret<String, CardNumber>>,
    pub account_name: Option<String>,
    pub account_country_code: Option<AccountCountryCode>,
    /// Routing number for bank accounts.
    pub bank_number: Option<String>,
    /// `MMYY`
    pub expiration_date: Option<String>,
    pub description: Option<String>,
    pub duplicate_action: Option<DuplicateAction>,
    pub payer_protected: Option<bool>,
    pub priority: Option<i32>,
    pub billing: Option<BillingInfo>,
    pub date_created: Option<OffsetDateTime>,
}

/// A charge or credit against a stored payment method. Amounts are in minor units.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payment {
    pub payer_account_id: String,
    pub payment_method_id: String,
    pub amount: i64,
    pub currency_code: Option<String>,
    pub merchant_profile_id: Option<i64>,
    pub invoice: Option<String>,
    pub comment1: Option<String>,
    pub comment2: Option<String>,
    /// Sent as the payer IP address override when present.
    pub input_ip_address: Option<String>,
}

/// Reference to a transaction that was already processed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriorPayment {
    pub original_transaction_id: String,
    pub transaction_history_id: Option<i64>,
    pub merchant_profile_id: Option<i64>,
    pub comment1: Option<String>,
    pub comment2: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreditCardOverride {
    pub full_name: Option<String>,
    pub expiration_date: Option<String>,
    pub cvv: Option<Secret<String>>,
    pub billing: Option<BillingInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AchOverride {
    pub bank_account_type: Option<BankAccountType>,
    pub sec_code: Option<SecCode>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PayerOverride {
    pub ip_address: Option<String>,
}

/// Per-transaction values that replace what is stored on the payment method.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentOverrides {
    pub credit_card: Option<CreditCardOverride>,
    pub ach: Option<AchOverride>,
    /// Falls back to [`Payment::input_ip_address`] when absent.
    pub payer: Option<PayerOverride>,
}

impl PaymentOverrides {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn credit_card(credit_card: CreditCardOverride) -> Self {
        Self {
            credit_card: Some(credit_card),
            ..Default::default()
        }
    }

    /// Supplies only the card security code.
    pub fn cvv(cvv: impl Into<Secret<String>>) -> Self {
        Self::credit_card(CreditCardOverride {
            cvv: Some(cvv.into()),
            ..Default::default()
        })
    }

    pub fn ach(ach: AchOverride) -> Self {
        Self {
            ach: Some(ach),
            ..Default::default()
        }
    }
}

/// Outcome of an authorization, capture or credit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentResponse {
    pub transaction_id: Option<String>,
    pub transaction_history_id: Option<i64>,
    pub authorization_code: Option<String>,
    pub avs_code: Option<String>,
    pub transaction_result: Option<String>,
    pub result_code: Option<String>,
    pub result_message: Option<String>,
    pub result_value: Option<String>,
    pub conversion_rate: Option<Decimal>,
    pub converted_amount: Option<i64>,
    pub converted_currency_code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enums_parse_case_insensitively() {
        assert_eq!(PaymentMethodType::from("amex"), PaymentMethodType::Amex);
        assert_eq!(DuplicateAction::from("ReturnDup"), DuplicateAction::ReturnDup);
        assert_eq!(AccountCountryCode::from("USA"), AccountCountryCode::UnitedStates);
        assert_eq!(AccountCountryCode::Canada.as_str(), "124");
        assert_eq!(
            PaymentMethodType::from("Maestro"),
            PaymentMethodType::Unrecognized("Maestro".to_string())
        );
    }

    #[test]
    fn only_bank_accounts_have_an_account_type() {
        assert_eq!(
            PaymentMethodType::Savings.bank_account_type(),
            Some(BankAccountType::Savings)
        );
        assert!(PaymentMethodType::Checking.is_bank_account());
        assert_eq!(PaymentMethodType::Visa.bank_account_type(), None);
    }
}
