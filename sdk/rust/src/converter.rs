//! Conversions from the subgraph's string encodings.

use crate::error::{ErrorCode, ResultExt, SdkError, SdkResult};
use num_bigint::BigInt;
use rust_decimal::Decimal;
use serde::Serialize;
use std::str::FromStr;

/// Parses a `BigInt` scalar.
pub fn to_big_int(value: &str) -> SdkResult<BigInt> {
    BigInt::from_str(value)
        .map_err(|_| SdkError::conversion(format!("unable to convert '{value}' to a big integer")))
}

/// Parses a `BigDecimal` scalar.
///
/// Accepts plain and scientific notation. Values beyond the 96-bit decimal
/// range fail; digits past 28 decimal places are rounded.
pub fn to_decimal(value: &str) -> SdkResult<Decimal> {
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .map_err(|_| SdkError::conversion(format!("unable to convert '{value}' to a decimal")))
}

/// Serializes a model to JSON bytes using the subgraph's field names.
pub fn model_to_json_bytes<T: Serialize + ?Sized>(model: &T) -> SdkResult<Vec<u8>> {
    serde_json::to_vec(model)
        .map_sdk_err_with(ErrorCode::ConversionError, "unable to convert model to JSON")
}

/// Serializes a model to a JSON string using the subgraph's field names.
pub fn model_to_json_string<T: Serialize + ?Sized>(model: &T) -> SdkResult<String> {
    serde_json::to_string(model)
        .map_sdk_err_with(ErrorCode::ConversionError, "unable to convert model to JSON")
}
