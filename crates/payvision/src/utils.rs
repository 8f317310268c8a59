use masking::{PeekInterface, Secret, Strategy};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serializer;
use time::{macros::format_description, PrimitiveDateTime};

pub(crate) fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str_is_blank)
}

pub(crate) fn str_is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub(crate) fn is_blank_secret<M: Strategy<String>>(value: &Secret<String, M>) -> bool {
    str_is_blank(value.peek())
}

pub(crate) fn is_blank_optional_secret<M: Strategy<String>>(value: &Option<Secret<String, M>>) -> bool {
    value.as_ref().map_or(true, is_blank_secret)
}

/// Drops empty and whitespace-only values.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !str_is_blank(value))
}

/// Amounts are always written with two fraction digits, half-even rounding.
pub(crate) mod amount {
    use super::*;

    pub fn format(value: Decimal) -> String {
        let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
        rounded.rescale(2);
        rounded.to_string()
    }

    pub fn parse(value: &str) -> Option<Decimal> {
        value.trim().parse().ok()
    }

    pub fn serialize<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(*value))
    }

    pub mod option {
        use super::*;

        pub fn serialize<S: Serializer>(value: &Option<Decimal>, serializer: S) -> Result<S::Ok, S::Error> {
            match value {
                Some(value) => serializer.serialize_str(&format(*value)),
                None => serializer.serialize_none(),
            }
        }
    }
}

/// Gateway timestamps, `YYYYMMDDhhmmss`.
pub(crate) mod timestamp {
    use super::*;

    const FORMAT: &[time::format_description::FormatItem<'static>] =
        format_description!("[year][month][day][hour][minute][second]");

    pub fn parse(value: &str) -> Option<PrimitiveDateTime> {
        PrimitiveDateTime::parse(value.trim(), FORMAT).ok()
    }

    pub mod option {
        use serde::ser::Error;

        use super::*;

        pub fn serialize<S: Serializer>(
            value: &Option<PrimitiveDateTime>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(value) => serializer.serialize_str(&value.format(FORMAT).map_err(S::Error::custom)?),
                None => serializer.serialize_none(),
            }
        }
    }
}
