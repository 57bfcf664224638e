//! Database model types for Diesel ORM.
//!
//! Timestamps are stored as RFC 3339 UTC text with microsecond precision so
//! that lexicographic comparison in SQL matches chronological order; the
//! time-range index relies on this. Decimals are stored as exact fixed-point
//! text, never floats, so a 4-digit price scale survives a round trip.

use chrono::{DateTime, SecondsFormat, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;

use super::schema::bvl_stocks;
use crate::error::{Error, Result};

/// Database row for a stock snapshot (insertable, no id).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = bvl_stocks)]
pub struct NewStockRow {
    pub company_code: i32,
    pub company_name: String,
    pub short_name: Option<String>,
    pub nemonico: Option<String>,
    pub sector_code: Option<String>,
    pub sector_description: Option<String>,
    pub last_date: Option<String>,
    pub previous_date: Option<String>,
    pub buy_price: Option<String>,
    pub sell_price: Option<String>,
    pub last_price: Option<String>,
    pub minimum_price: Option<String>,
    pub maximum_price: Option<String>,
    pub opening_price: Option<String>,
    pub previous_price: Option<String>,
    pub exderecho: Option<String>,
    pub negotiated_quantity: Option<i64>,
    pub negotiated_amount: Option<String>,
    pub negotiated_national_amount: Option<String>,
    pub percentage_change: Option<String>,
    pub operations_number: Option<i32>,
    pub currency: Option<String>,
    pub unity: Option<i32>,
    pub segment: Option<String>,
    pub num_neg: Option<i32>,
    pub created_date: Option<String>,
    pub scrape_timestamp: String,
}

/// Database row for a stock snapshot (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = bvl_stocks)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct StockRow {
    pub id: i32,
    pub company_code: i32,
    pub company_name: String,
    pub short_name: Option<String>,
    pub nemonico: Option<String>,
    pub sector_code: Option<String>,
    pub sector_description: Option<String>,
    pub last_date: Option<String>,
    pub previous_date: Option<String>,
    pub buy_price: Option<String>,
    pub sell_price: Option<String>,
    pub last_price: Option<String>,
    pub minimum_price: Option<String>,
    pub maximum_price: Option<String>,
    pub opening_price: Option<String>,
    pub previous_price: Option<String>,
    pub exderecho: Option<String>,
    pub negotiated_quantity: Option<i64>,
    pub negotiated_amount: Option<String>,
    pub negotiated_national_amount: Option<String>,
    pub percentage_change: Option<String>,
    pub operations_number: Option<i32>,
    pub currency: Option<String>,
    pub unity: Option<i32>,
    pub segment: Option<String>,
    pub num_neg: Option<i32>,
    pub created_date: Option<String>,
    pub scrape_timestamp: String,
}

/// Encode a timestamp for storage.
///
/// Fixed-width microseconds and a `Z` suffix keep string order identical to
/// time order, which the `scrape_timestamp` range queries depend on.
#[must_use]
pub fn encode_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Decode a stored timestamp.
///
/// # Errors
/// Returns [`Error::Parse`] if the stored text is not valid RFC 3339.
pub fn decode_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| Error::Parse(format!("bad timestamp '{raw}': {e}")))
}

/// Encode a decimal for storage as exact fixed-point text.
#[must_use]
pub fn encode_decimal(value: Decimal) -> String {
    value.to_string()
}

/// Decode a stored decimal.
///
/// # Errors
/// Returns [`Error::Parse`] if the stored text is not a valid decimal.
pub fn decode_decimal(raw: &str) -> Result<Decimal> {
    raw.parse::<Decimal>()
        .map_err(|e| Error::Parse(format!("bad decimal '{raw}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn timestamp_encoding_is_fixed_width_utc() {
        let ts = Utc.with_ymd_and_hms(2026, 8, 20, 14, 30, 0).unwrap();
        assert_eq!(encode_timestamp(ts), "2026-08-20T14:30:00.000000Z");
    }

    #[test]
    fn timestamp_roundtrip() {
        let ts = Utc.with_ymd_and_hms(2026, 8, 20, 9, 15, 42).unwrap();
        assert_eq!(decode_timestamp(&encode_timestamp(ts)).unwrap(), ts);
    }

    #[test]
    fn timestamp_encoding_orders_lexicographically() {
        let earlier = Utc.with_ymd_and_hms(2026, 8, 20, 9, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2026, 8, 20, 10, 0, 0).unwrap();
        assert!(encode_timestamp(earlier) < encode_timestamp(later));
    }

    #[test]
    fn bad_timestamp_is_a_parse_error() {
        let err = decode_timestamp("yesterday at noon").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn decimal_roundtrip_keeps_scale() {
        let price = dec!(12.3400);
        let encoded = encode_decimal(price);
        assert_eq!(encoded, "12.3400");
        assert_eq!(decode_decimal(&encoded).unwrap(), price);
        assert_eq!(decode_decimal(&encoded).unwrap().to_string(), "12.3400");
    }

    #[test]
    fn negative_percentage_change_roundtrips() {
        let change = dec!(-1.0750);
        assert_eq!(decode_decimal(&encode_decimal(change)).unwrap(), change);
    }

    #[test]
    fn bad_decimal_is_a_parse_error() {
        let err = decode_decimal("12.34.56").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }
}
