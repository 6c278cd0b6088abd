//! Typed extraction of stored values.

use chrono::{DateTime, FixedOffset, NaiveDate};

use crate::time_of_day::TimeOfDay;
use crate::value::Value;

/// Rust types a stored [`Value`] can be read back as.
///
/// Extraction is strict: a raw value left behind by a failed coercion does
/// not convert, even if it is text. `Option<T>` reads `Null` as `None`.
pub trait FromValue: Sized {
    /// A description of the type, used in mismatch errors.
    const EXPECTED: &'static str;

    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for String {
    const EXPECTED: &'static str = "string";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

impl FromValue for bool {
    const EXPECTED: &'static str = "bool";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl FromValue for f64 {
    const EXPECTED: &'static str = "f64";

    #[allow(clippy::cast_precision_loss)]
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as Self),
            _ => None,
        }
    }
}

macro_rules! impl_from_value_int {
    ($($t:ty),*) => {
        $(
            impl FromValue for $t {
                const EXPECTED: &'static str = stringify!($t);

                fn from_value(value: &Value) -> Option<Self> {
                    value.as_int().and_then(|i| <$t>::try_from(i).ok())
                }
            }
        )*
    };
}

impl_from_value_int!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

impl FromValue for NaiveDate {
    const EXPECTED: &'static str = "date";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_date()
    }
}

impl FromValue for DateTime<FixedOffset> {
    const EXPECTED: &'static str = "time";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_time().copied()
    }
}

impl FromValue for TimeOfDay {
    const EXPECTED: &'static str = "time of day";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_time_of_day()
    }
}

impl<T: FromValue> FromValue for Option<T> {
    const EXPECTED: &'static str = T::EXPECTED;

    fn from_value(value: &Value) -> Option<Self> {
        if value.is_null() {
            Some(None)
        } else {
            T::from_value(value).map(Some)
        }
    }
}
