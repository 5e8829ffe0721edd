use std::borrow::Cow;

/// Tagged-union cell value (spec §3 `Field`, §9 "Tagged-union field values").
///
/// The view arms (`Cow::Borrowed`) are non-owning; the compiler path that
/// needs owning storage (e.g. a parameter packet surviving past the
/// caller's stack frame) must call [`FieldValue::into_owned`] first.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Text(Cow<'static, str>),
    Bytes(Cow<'static, [u8]>),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// The name used in error messages and in the compile-time
    /// `SqlTypeMapping` table (spec §4.3 "Numeric semantics").
    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldValue::Null => "null",
            FieldValue::Bool(_) => "bool",
            FieldValue::I32(_) => "i32",
            FieldValue::I64(_) => "i64",
            FieldValue::F32(_) => "f32",
            FieldValue::F64(_) => "f64",
            FieldValue::Text(_) => "text",
            FieldValue::Bytes(_) => "bytes",
        }
    }

    /// Detach any borrowed view arms, producing a value with `'static`
    /// ownership. Required before a value is stored in a `ParamSink`
    /// that must outlive the caller's borrow.
    pub fn into_owned(self) -> FieldValue {
        match self {
            FieldValue::Text(c) => FieldValue::Text(Cow::Owned(c.into_owned())),
            FieldValue::Bytes(c) => FieldValue::Bytes(Cow::Owned(c.into_owned())),
            other => other,
        }
    }
}

/// Conversion from a host type into a [`FieldValue`], mirroring
/// `Field::set<T>`.
pub trait IntoFieldValue {
    fn into_field_value(self) -> FieldValue;
    /// The Rust type name used for `TypeMismatch`/column-creation checks.
    fn type_name() -> &'static str;
}

/// Fallible extraction of a host type from a [`FieldValue`], mirroring
/// `Field::get<T>`/`try_get<T>`.
pub trait FromFieldValue: Sized {
    fn from_field_value(value: &FieldValue) -> Option<Self>;
}

macro_rules! impl_field_value_scalar {
    ($ty:ty, $variant:ident, $name:literal) => {
        impl IntoFieldValue for $ty {
            fn into_field_value(self) -> FieldValue {
                FieldValue::$variant(self)
            }
            fn type_name() -> &'static str {
                $name
            }
        }

        impl FromFieldValue for $ty {
            fn from_field_value(value: &FieldValue) -> Option<Self> {
                match value {
                    FieldValue::$variant(v) => Some(*v),
                    _ => None,
                }
            }
        }
    };
}

impl_field_value_scalar!(bool, Bool, "bool");
impl_field_value_scalar!(i32, I32, "i32");
impl_field_value_scalar!(i64, I64, "i64");
impl_field_value_scalar!(f32, F32, "f32");
impl_field_value_scalar!(f64, F64, "f64");

impl IntoFieldValue for String {
    fn into_field_value(self) -> FieldValue {
        FieldValue::Text(Cow::Owned(self))
    }
    fn type_name() -> &'static str {
        "text"
    }
}

impl FromFieldValue for String {
    fn from_field_value(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::Text(c) => Some(c.clone().into_owned()),
            _ => None,
        }
    }
}

impl IntoFieldValue for Vec<u8> {
    fn into_field_value(self) -> FieldValue {
        FieldValue::Bytes(Cow::Owned(self))
    }
    fn type_name() -> &'static str {
        "bytes"
    }
}

impl FromFieldValue for Vec<u8> {
    fn from_field_value(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::Bytes(c) => Some(c.clone().into_owned()),
            _ => None,
        }
    }
}

impl<T: FromFieldValue> FromFieldValue for Option<T> {
    fn from_field_value(value: &FieldValue) -> Option<Self> {
        if value.is_null() {
            Some(None)
        } else {
            T::from_field_value(value).map(Some)
        }
    }
}
