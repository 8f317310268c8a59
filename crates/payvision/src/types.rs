//! Typed gateway responses.

use rust_decimal::Decimal;
use time::PrimitiveDateTime;

/// Outcome of a transaction, derived from the `response` code of the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum TransactionStatus {
    Approved,
    Declined,
    Failed,
}

impl TransactionStatus {
    /// `"1"` approved, `"2"` declined, `"3"` error. Anything else has no status.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "1" => Some(Self::Approved),
            "2" => Some(Self::Declined),
            "3" => Some(Self::Failed),
            _ => None,
        }
    }
}

wire_enum! {
    /// Detailed result code (`response_code`).
    pub enum ResponseCode {
        Approved => "100",
        Declined => "200",
        DoNotHonor => "201",
        InsufficientFunds => "202",
        OverLimit => "203",
        TransactionNotAllowed => "204",
        IncorrectPaymentInformation => "220",
        NoSuchCardIssuer => "221",
        NoCardNumberOnFile => "222",
        ExpiredCard => "223",
        InvalidExpirationDate => "224",
        InvalidSecurityCode => "225",
        InvalidPin => "226",
        CallIssuer => "240",
        PickUpCard => "250",
        LostCard => "251",
        StolenCard => "252",
        FraudulentCard => "253",
        DeclinedWithFurtherInstructions => "260",
        StopRecurring => "261",
        StopAllRecurring => "262",
        UpdateCardholderData => "263",
        RetryLater => "264",
        RejectedByGateway => "300",
        ProcessorSystemError => "400",
        MerchantConfigurationError => "410",
        MerchantAccountInactive => "411",
        CommunicationError => "420",
        IssuerCommunicationError => "421",
        DuplicateTransaction => "430",
        ProcessorFormatError => "440",
        InvalidTransactionInformation => "441",
        ProcessorFeatureNotAvailable => "460",
        UnsupportedCardType => "461",
    }
}

impl ResponseCode {
    pub fn is_approved(&self) -> bool {
        matches!(self, Self::Approved)
    }
}

wire_enum! {
    /// Address verification result.
    pub enum AvsResponse {
        /// Exact match, 9-character numeric ZIP.
        ExactMatchZip9 => "X",
        /// Exact match, 5-character numeric ZIP.
        ExactMatchZip5 => "Y" | "D" | "M" | "2" | "6",
        AddressMatchOnly => "A" | "B" | "3" | "7",
        Zip9MatchOnly => "W",
        Zip5MatchOnly => "Z" | "P" | "L" | "1" | "5",
        NoMatch => "N" | "C" | "4" | "8",
        Unavailable => "U",
        NonUsIssuer => "G" | "I",
        Retry => "R",
        NotSupportedByIssuer => "E",
        ServiceNotSupported => "S",
        NotAvailable => "0" | "O",
    }
}

wire_enum! {
    /// Card security code result.
    pub enum CvvResponse {
        Match => "M",
        NoMatch => "N",
        NotProcessed => "P",
        /// Merchant indicated the code is not on the card.
        NotPresent => "S",
        IssuerNotCertified => "U",
    }
}

wire_enum! {
    /// Settlement state of a transaction, used both as query filter and in query results.
    pub enum Condition {
        Pending => "pending",
        PendingSettlement => "pendingsettlement",
        InProgress => "in_progress",
        Abandoned => "abandoned",
        Failed => "failed",
        Canceled => "canceled",
        Complete => "complete",
        Unknown => "unknown",
    }
}

wire_enum! {
    pub enum ActionType {
        Sale => "sale",
        Refund => "refund",
        Credit => "credit",
        Auth => "auth",
        Capture => "capture",
        Void => "void",
        Return => "return",
        Settle => "settle",
        CheckReturn => "check_return",
        CheckLateReturn => "check_late_return",
    }
}

wire_enum! {
    pub enum PaymentMethodKind {
        CreditCard => "cc",
        Check => "ck",
    }
}

/// Result of a call to the gateway.
///
/// Declines come back here with [`TransactionStatus::Declined`]; they are not errors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PayVisionResponse {
    /// `None` when the gateway code is absent or outside `1..=3`.
    pub status: Option<TransactionStatus>,
    /// Raw `response` value the status was derived from.
    pub status_code: Option<String>,
    pub message: Option<String>,
    pub transaction_id: Option<String>,
    pub auth_code: Option<String>,
    pub avs_response: Option<AvsResponse>,
    pub cvv_response: Option<CvvResponse>,
    pub order_id: Option<String>,
    pub transaction_type: Option<String>,
    pub response_code: Option<ResponseCode>,
    pub amount_authorized: Option<Decimal>,
    pub customer_vault_id: Option<String>,
    /// Only present on query responses.
    pub detail: Option<TransactionDetail>,
}

impl PayVisionResponse {
    pub fn is_approved(&self) -> bool {
        self.status == Some(TransactionStatus::Approved)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company: Option<String>,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShippingDetail {
    pub address: Address,
    pub carrier: Option<String>,
    pub tracking_number: Option<String>,
    pub date: Option<String>,
    pub amount: Option<Decimal>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerDetail {
    pub customer_id: Option<String>,
    pub customer_tax_id: Option<String>,
    pub fax: Option<String>,
    pub cell_phone: Option<String>,
    pub website: Option<String>,
}

/// Bank account of a check (`ck`) transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckDetail {
    /// Masked by the gateway.
    pub account: Option<String>,
    pub hash: Option<String>,
    /// Routing number.
    pub aba: Option<String>,
    pub name: Option<String>,
    /// `business` or `personal`
    pub account_holder_type: Option<String>,
    /// `checking` or `savings`
    pub account_type: Option<String>,
    pub sec_code: Option<String>,
}

/// A transaction as reported by the query endpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionDetail {
    pub transaction_id: Option<String>,
    pub payment_method: Option<PaymentMethodKind>,
    pub condition: Option<Condition>,
    pub order_id: Option<String>,
    pub authorization_code: Option<String>,
    pub po_number: Option<String>,
    pub order_description: Option<String>,
    pub billing: Address,
    pub customer: CustomerDetail,
    pub shipping: ShippingDetail,
    /// Masked by the gateway.
    pub cc_number: Option<String>,
    pub cc_exp: Option<String>,
    pub cc_bin: Option<String>,
    /// Present for check transactions only.
    pub check: Option<CheckDetail>,
    pub avs_response: Option<AvsResponse>,
    pub csc_response: Option<CvvResponse>,
    pub processor_id: Option<String>,
    pub currency: Option<String>,
    pub tax: Option<Decimal>,
    pub surcharge: Option<Decimal>,
    pub tip: Option<Decimal>,
    pub entry_mode: Option<String>,
    pub partial_payment_id: Option<String>,
    pub partial_payment_balance: Option<Decimal>,
    pub platform_id: Option<String>,
    /// Remaining balance of a prepaid or gift card.
    pub card_balance: Option<Decimal>,
    pub card_available_balance: Option<Decimal>,
    /// Lifecycle events in the order the gateway listed them.
    pub actions: Vec<Action>,
}

/// One lifecycle event of a transaction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Action {
    pub amount: Option<Decimal>,
    pub action_type: Option<ActionType>,
    pub date: Option<PrimitiveDateTime>,
    pub success: Option<bool>,
    pub ip_address: Option<String>,
    pub source: Option<String>,
    pub username: Option<String>,
    pub response_text: Option<String>,
    pub batch_id: Option<String>,
    pub processor_batch_id: Option<String>,
    pub response_code: Option<ResponseCode>,
    pub processor_response_text: Option<String>,
    pub processor_response_code: Option<String>,
    pub device_license_number: Option<String>,
    pub device_nickname: Option<String>,
}
