//! MoMo SMS classification
//!
//! Each transaction type is recognised by one phrase in the message body.
//! Patterns are tried in a fixed order and the first match wins; amount,
//! counterparty, reference, balance and fee are then pulled out of the
//! same body.

use regex::Regex;
use std::fmt;

use super::error::IngestResult;
use crate::transaction::Transaction;

/// Transaction types recognised in MoMo SMS messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    IncomingMoney,
    Payment,
    Transfer,
    Withdrawal,
    Airtime,
    CashPower,
    BankDeposit,
    BankTransfer,
    Bundle,
    ThirdParty,
}

impl TransactionKind {
    /// All kinds, in matching order
    pub const ALL: [TransactionKind; 10] = [
        TransactionKind::IncomingMoney,
        TransactionKind::Payment,
        TransactionKind::Transfer,
        TransactionKind::Withdrawal,
        TransactionKind::Airtime,
        TransactionKind::CashPower,
        TransactionKind::BankDeposit,
        TransactionKind::BankTransfer,
        TransactionKind::Bundle,
        TransactionKind::ThirdParty,
    ];

    /// Type name used in transaction records and the snapshot
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::IncomingMoney => "incoming_money",
            TransactionKind::Payment => "payment",
            TransactionKind::Transfer => "transfer",
            TransactionKind::Withdrawal => "withdrawal",
            TransactionKind::Airtime => "airtime",
            TransactionKind::CashPower => "cashpower",
            TransactionKind::BankDeposit => "bank_deposit",
            TransactionKind::BankTransfer => "bank_transfer",
            TransactionKind::Bundle => "bundle",
            TransactionKind::ThirdParty => "third_party",
        }
    }

    fn pattern(&self) -> &'static str {
        match self {
            TransactionKind::IncomingMoney => r"You have received ([0-9,]+)\s*RWF from",
            TransactionKind::Payment => r"You have paid ([0-9,]+)\s*RWF to",
            TransactionKind::Transfer => r"You have transferred ([0-9,]+)\s*RWF to",
            TransactionKind::Withdrawal => r"You have withdrawn ([0-9,]+)\s*RWF from",
            TransactionKind::Airtime => r"You have bought Airtime worth ([0-9,]+)\s*RWF",
            TransactionKind::CashPower => r"You have bought Electricity worth ([0-9,]+)\s*RWF",
            TransactionKind::BankDeposit => r"You have deposited ([0-9,]+)\s*RWF",
            TransactionKind::BankTransfer => r"Bank transfer of ([0-9,]+)\s*RWF",
            TransactionKind::Bundle => {
                r"You have bought (Internet|Voice) Bundle worth ([0-9,]+)\s*RWF"
            }
            TransactionKind::ThirdParty => r"Transaction of ([0-9,]+)\s*RWF initiated by",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields extracted from one SMS body
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSms {
    pub kind: TransactionKind,
    pub amount: f64,
    /// Trimmed message body
    pub details: String,
    pub phone_number: Option<String>,
    pub reference_id: Option<String>,
    pub balance: Option<f64>,
    pub fee: Option<f64>,
}

impl ParsedSms {
    /// Turn the parsed message into a transaction record
    pub fn into_transaction(self, date: String, transaction_id: Option<String>) -> Transaction {
        Transaction {
            transaction_id,
            date,
            kind: self.kind.as_str().to_string(),
            amount: self.amount,
            phone_number: self.phone_number,
            reference_id: self.reference_id,
            details: self.details,
            balance: self.balance,
            fee: self.fee,
        }
    }
}

/// Compiled classification and extraction patterns
#[derive(Debug, Clone)]
pub struct SmsClassifier {
    categories: Vec<(TransactionKind, Regex)>,
    amount: Regex,
    phone: Regex,
    reference: Regex,
    balance: Regex,
    fee: Regex,
}

impl SmsClassifier {
    /// Compile all patterns
    pub fn new() -> IngestResult<Self> {
        let categories = TransactionKind::ALL
            .iter()
            .map(|kind| Ok((*kind, Regex::new(&format!("(?i){}", kind.pattern()))?)))
            .collect::<IngestResult<Vec<_>>>()?;

        Ok(Self {
            categories,
            amount: Regex::new(r"([0-9,]+)\s*RWF")?,
            phone: Regex::new(r"(?:to|from|at)\s+(\+?250\d{9}|\d{10})")?,
            reference: Regex::new(r"Ref:\s*([A-Za-z0-9]+)")?,
            balance: Regex::new(r"Balance:\s*([0-9,]+)\s*RWF")?,
            fee: Regex::new(r"Fee:\s*([0-9,]+)\s*RWF")?,
        })
    }

    /// Transaction type of a message body, if any pattern matches
    pub fn kind_of(&self, body: &str) -> Option<TransactionKind> {
        self.categories
            .iter()
            .find(|(_, pattern)| pattern.is_match(body))
            .map(|(kind, _)| *kind)
    }

    /// Classify a message body and extract its fields
    pub fn classify(&self, body: &str) -> Option<ParsedSms> {
        let kind = self.kind_of(body)?;

        Some(ParsedSms {
            kind,
            amount: self.parse_amount(body).unwrap_or(0.0),
            details: body.trim().to_string(),
            phone_number: self.parse_phone_number(body),
            reference_id: self.parse_reference(body),
            balance: capture_number(&self.balance, body),
            fee: capture_number(&self.fee, body),
        })
    }

    /// First `N RWF` amount in the text
    pub fn parse_amount(&self, text: &str) -> Option<f64> {
        capture_number(&self.amount, text)
    }

    /// Counterparty phone number following `to`, `from` or `at`
    pub fn parse_phone_number(&self, text: &str) -> Option<String> {
        self.phone
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// Reference id following `Ref:`
    pub fn parse_reference(&self, text: &str) -> Option<String> {
        self.reference
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }
}

/// Parse the first capture group as a comma-grouped number
fn capture_number(pattern: &Regex, text: &str) -> Option<f64> {
    let caps = pattern.captures(text)?;
    let digits = caps.get(1)?.as_str().replace(',', "");
    digits.parse().ok()
}
