//! Date and time scalars. Requires the _chrono_ feature.
//!
//! Instants and dates travel as tagged string scalars: a [`DateTime<Utc>`]
//! encodes as an RFC 3339 string tagged `date-time`, a [`NaiveDate`] as a
//! `YYYY-MM-DD` string tagged `date`. Decoding is a strict kind check: the
//! source must be a string that parses.

use super::{Decode, Encode, Error, Initial};
use crate::{Scalar, Value};
use chrono::{DateTime, NaiveDate, Utc};

impl Initial for DateTime<Utc> {
    fn initial() -> Self {
        Self::default()
    }
}

impl Decode for DateTime<Utc> {
    fn decode_value(&mut self, value: &Scalar) -> Result<(), Error> {
        let s = value
            .str()
            .ok_or_else(|| Error::mismatch("date-time string", &value.val))?;
        *self = DateTime::parse_from_rfc3339(s)
            .map_err(|e| Error::new(format!("invalid date-time \"{}\": {}", s, e)))?
            .with_timezone(&Utc);
        Ok(())
    }
}

impl Encode for DateTime<Utc> {
    fn encode_value(&self) -> Result<Scalar, Error> {
        Ok(Scalar::with_tag("date-time", Value::Str(self.to_rfc3339())))
    }
}

impl Initial for NaiveDate {
    fn initial() -> Self {
        Self::default()
    }
}

impl Decode for NaiveDate {
    fn decode_value(&mut self, value: &Scalar) -> Result<(), Error> {
        let s = value
            .str()
            .ok_or_else(|| Error::mismatch("date string", &value.val))?;
        *self = NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|e| Error::new(format!("invalid date \"{}\": {}", s, e)))?;
        Ok(())
    }
}

impl Encode for NaiveDate {
    fn encode_value(&self) -> Result<Scalar, Error> {
        Ok(Scalar::with_tag(
            "date",
            Value::Str(self.format("%Y-%m-%d").to_string()),
        ))
    }
}
