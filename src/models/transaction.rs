use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::Gender;
use crate::types::{DateOfBirth, Timestamp};

/// A transaction with the classifier's verdict attached.
///
/// `is_fraud` is the external classifier's binary label, not the provisional
/// flag used during encoding.
#[derive(Debug, Clone)]
pub struct ScoredTransaction {
    pub transaction: Transaction,
    pub is_fraud: u8
}

/// Represents a single row from the uploaded CSV file.
///
/// This struct captures the raw transaction data before any feature
/// engineering. The card number and transaction id are kept for display and
/// export but never enter the feature table, as they carry no fraud signal.
#[derive(Debug, Clone, Deserialize)]
pub struct Transaction {
    /// When the transaction occurred.
    #[serde(rename = "trans_date_trans_time")]
    pub timestamp: Timestamp,
    /// The card number. Kept as text so leading digits survive intact.
    #[serde(rename = "cc_num")]
    pub card_number: String,
    /// The merchant name.
    pub merchant: String,
    /// The spending category.
    pub category: String,
    /// The transaction amount.
    #[serde(rename = "amt")]
    pub amount: Decimal,
    /// Cardholder first name.
    #[serde(rename = "first")]
    pub first_name: String,
    /// Cardholder last name.
    #[serde(rename = "last")]
    pub last_name: String,
    /// Cardholder gender.
    pub gender: Gender,
    /// Cardholder street address.
    pub street: String,
    /// Cardholder city.
    pub city: String,
    /// Cardholder state.
    pub state: String,
    /// Cardholder postal code.
    pub zip: u32,
    /// Cardholder latitude.
    pub lat: f64,
    /// Cardholder longitude.
    pub long: f64,
    /// Population of the cardholder's city.
    pub city_pop: u64,
    /// Cardholder occupation.
    pub job: String,
    /// Cardholder date of birth.
    pub dob: DateOfBirth,
    /// Globally unique transaction id.
    #[serde(rename = "trans_num")]
    pub transaction_id: String,
    /// Unix time as provided by the upstream data source.
    pub unix_time: i64,
    /// Merchant latitude.
    pub merch_lat: f64,
    /// Merchant longitude.
    pub merch_long: f64
}
