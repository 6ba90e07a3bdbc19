//! Transaction record type
//!
//! Field names follow the column names of the input files, so serde renames
//! carry the header spelling. Files written by older exports use all
//! lower-case headers, which are accepted as aliases.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single row of an input file
///
/// Amounts are parsed from their textual form, never through a binary float,
/// so the two-decimal rounding applied by the filter works on exact values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Discrete time unit of the simulation
    pub step: i32,

    /// Transaction category (PAYMENT, TRANSFER, CASH_OUT, ...)
    #[serde(rename = "type")]
    pub kind: String,

    /// Transferred amount
    #[serde(with = "decimal")]
    pub amount: Decimal,

    /// Origin account id
    #[serde(rename = "nameOrig", alias = "nameorig")]
    pub name_orig: String,

    /// Origin balance before the transaction
    #[serde(
        rename = "oldbalanceOrg",
        alias = "oldbalanceorg",
        with = "decimal"
    )]
    pub old_balance_orig: Decimal,

    /// Origin balance after the transaction
    #[serde(
        rename = "newbalanceOrig",
        alias = "newbalanceorig",
        with = "decimal"
    )]
    pub new_balance_orig: Decimal,

    /// Destination account id
    #[serde(rename = "nameDest", alias = "namedest")]
    pub name_dest: String,

    /// Destination balance before the transaction
    #[serde(
        rename = "oldbalanceDest",
        alias = "oldbalancedest",
        with = "decimal"
    )]
    pub old_balance_dest: Decimal,

    /// Destination balance after the transaction
    #[serde(
        rename = "newbalanceDest",
        alias = "newbalancedest",
        with = "decimal"
    )]
    pub new_balance_dest: Decimal,

    /// Ground-truth fraud label
    #[serde(rename = "isFraud", alias = "isfraud", with = "flag")]
    pub is_fraud: bool,

    /// Label set by the upstream flagging system
    #[serde(rename = "isFlaggedFraud", alias = "isflaggedfraud", with = "flag")]
    pub is_flagged_fraud: bool,
}

/// Amount columns, plain or scientific notation (`1.5e6`)
mod decimal {
    use rust_decimal::Decimal;
    use serde::de::{self, Deserialize, Deserializer};
    use serde::Serializer;
    use std::str::FromStr;

    pub fn serialize<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let raw = raw.trim();
        Decimal::from_str(raw)
            .or_else(|_| Decimal::from_scientific(raw))
            .map_err(|_| de::Error::custom(format!("expected a decimal amount, found '{raw}'")))
    }
}

/// 0/1 label columns
mod flag {
    use serde::de::{self, Deserialize, Deserializer};
    use serde::Serializer;

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let raw = String::deserialize(deserializer)?;
        match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" => Ok(true),
            "0" | "false" => Ok(false),
            other => Err(de::Error::custom(format!(
                "expected a 0/1 label, found '{other}'"
            ))),
        }
    }
}
