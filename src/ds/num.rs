use super::val::Value;

/// A Rust numeric primitive that can pass through the document model.
///
/// The model stores numbers as either a 64-bit signed integer or a 64-bit
/// float ([`Value::Int`] / [`Value::Float`]). `Numeric` is implemented for
/// every Rust primitive number and defines the explicit coercions between
/// the model and the primitive:
///
/// - [`from_int`]/[`from_float`] read out of the model. Integer targets
///   reject out-of-range sources and non-finite floats; fractional parts
///   truncate. Float targets always convert, with possible precision loss.
/// - [`to_value`] writes into the model, rejecting integers that do not fit
///   the 64-bit signed document range.
///
/// # Example
/// ```rust
/// # use doctree::*;
/// use doctree::ds::Numeric;
/// assert_eq!(u8::from_int(250), Some(250));
/// assert_eq!(u8::from_int(256), None);
/// assert_eq!(i32::from_float(9.75), Some(9));
/// assert_eq!(1234u16.to_value(), Some(Value::Int(1234)));
/// assert_eq!(u64::MAX.to_value(), None); // outside the i64 document range
/// ```
///
/// [`from_int`]: Numeric::from_int
/// [`from_float`]: Numeric::from_float
/// [`to_value`]: Numeric::to_value
pub trait Numeric: Copy {
    /// Convert from the model's integer variant.
    fn from_int(int: i64) -> Option<Self>;

    /// Convert from the model's float variant.
    fn from_float(float: f64) -> Option<Self>;

    /// Convert into a model value.
    fn to_value(self) -> Option<Value>;
}

macro_rules! numeric_int {
    ($( $t:ty )*) => {$(
        impl Numeric for $t {
            fn from_int(int: i64) -> Option<Self> {
                Self::try_from(int).ok()
            }

            fn from_float(float: f64) -> Option<Self> {
                // `as` saturates, so the range check keeps truncation honest
                if float.is_finite() && float >= <$t>::MIN as f64 && float <= <$t>::MAX as f64 {
                    Some(float as $t)
                } else {
                    None
                }
            }

            fn to_value(self) -> Option<Value> {
                i64::try_from(self).ok().map(Value::Int)
            }
        }
    )*};
}

numeric_int!(
    usize u8 u16 u32 u64 u128
    isize i8 i16 i32 i64 i128
);

macro_rules! numeric_float {
    ($( $t:ty )*) => {$(
        impl Numeric for $t {
            fn from_int(int: i64) -> Option<Self> {
                Some(int as $t)
            }

            fn from_float(float: f64) -> Option<Self> {
                Some(float as $t)
            }

            fn to_value(self) -> Option<Value> {
                Some(Value::Float(self as f64))
            }
        }
    )*};
}

numeric_float!(f32 f64);
