//! Typed call arguments and decoded contract values.
//!
//! ## Arguments
//!
//! [`ScArg`] is what callers hand to the call builder. Every argument carries
//! its wire type tag explicitly; nothing is inferred, because the tag must
//! match the target entry point's declared signature exactly.
//!
//! ## Return Values
//!
//! [`ScValue`] is the decoded native form of whatever a contract returned.
//! Contract structs arrive as [`ScValue::Map`] keyed by field name, unit
//! enum variants as a one-element [`ScValue::Vec`] holding a symbol.
//!
//! ## Wire Form
//!
//! Both types serialize as `{"type": <tag>, "value": <content>}`. 128-bit
//! integers travel as decimal strings.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// ScType
// ============================================================================

/// Declared type of an entry-point parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScType {
    /// Account (`G...`) or contract (`C...`) address
    Address,
    /// Signed 128-bit integer
    I128,
    /// Unsigned 32-bit integer
    U32,
    /// UTF-8 string
    String,
    /// Boolean
    Bool,
    /// `Option<T>`
    Option(Box<ScType>),
}

impl fmt::Display for ScType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScType::Address => f.write_str("address"),
            ScType::I128 => f.write_str("i128"),
            ScType::U32 => f.write_str("u32"),
            ScType::String => f.write_str("string"),
            ScType::Bool => f.write_str("bool"),
            ScType::Option(inner) => write!(f, "option<{}>", inner),
        }
    }
}

// ============================================================================
// ScArg
// ============================================================================

/// A typed argument for a contract invocation.
///
/// ## Example
///
/// ```
/// use papex_client::types::{ScArg, ScType};
///
/// let doi = ScArg::none(ScType::String);
/// assert_eq!(doi.sc_type(), ScType::Option(Box::new(ScType::String)));
///
/// let amount = ScArg::i128(5_000_000);
/// assert_eq!(amount.sc_type(), ScType::I128);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ScArg {
    /// Address argument
    Address(String),
    /// Signed 128-bit integer argument
    I128(#[serde(with = "int_string")] i128),
    /// Unsigned 32-bit integer argument
    U32(u32),
    /// String argument
    String(String),
    /// Boolean argument
    Bool(bool),
    /// Optional argument; `inner` is the declared type even when empty
    Option {
        /// Declared inner type
        inner: ScType,
        /// `Some` payload, or `None`
        value: Option<Box<ScArg>>,
    },
}

impl ScArg {
    /// Address argument
    pub fn address(address: impl Into<String>) -> Self {
        ScArg::Address(address.into())
    }

    /// i128 argument
    pub fn i128(value: i128) -> Self {
        ScArg::I128(value)
    }

    /// u32 argument
    pub fn u32(value: u32) -> Self {
        ScArg::U32(value)
    }

    /// String argument
    pub fn string(value: impl Into<String>) -> Self {
        ScArg::String(value.into())
    }

    /// Bool argument
    pub fn bool(value: bool) -> Self {
        ScArg::Bool(value)
    }

    /// `Some(arg)`; the declared inner type is taken from `arg`.
    pub fn some(arg: ScArg) -> Self {
        ScArg::Option {
            inner: arg.sc_type(),
            value: Some(Box::new(arg)),
        }
    }

    /// `None` of the given inner type.
    pub fn none(inner: ScType) -> Self {
        ScArg::Option { inner, value: None }
    }

    /// `Some(arg)` or `None` of `inner`, depending on `arg`.
    pub fn optional(inner: ScType, arg: Option<ScArg>) -> Self {
        match arg {
            Some(arg) => ScArg::Option {
                inner,
                value: Some(Box::new(arg)),
            },
            None => ScArg::none(inner),
        }
    }

    /// Wire type of this argument.
    pub fn sc_type(&self) -> ScType {
        match self {
            ScArg::Address(_) => ScType::Address,
            ScArg::I128(_) => ScType::I128,
            ScArg::U32(_) => ScType::U32,
            ScArg::String(_) => ScType::String,
            ScArg::Bool(_) => ScType::Bool,
            ScArg::Option { inner, .. } => ScType::Option(Box::new(inner.clone())),
        }
    }
}

// ============================================================================
// ScValue
// ============================================================================

/// A decoded contract return value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ScValue {
    /// Unit / `None`
    Void,
    /// Boolean
    Bool(bool),
    /// u32
    U32(u32),
    /// i32
    I32(i32),
    /// u64 (ledger timestamps)
    U64(u64),
    /// i64
    I64(i64),
    /// u128
    U128(#[serde(with = "int_string")] u128),
    /// i128 (token amounts)
    I128(#[serde(with = "int_string")] i128),
    /// String
    String(String),
    /// Symbol (enum variant names, struct keys)
    Symbol(String),
    /// Address
    Address(String),
    /// Raw bytes, hex encoded
    Bytes(String),
    /// Vector
    Vec(Vec<ScValue>),
    /// Map / contract struct, keyed by field name
    Map(BTreeMap<String, ScValue>),
}

impl ScValue {
    /// String value
    pub fn string(value: impl Into<String>) -> Self {
        ScValue::String(value.into())
    }

    /// Symbol value
    pub fn symbol(value: impl Into<String>) -> Self {
        ScValue::Symbol(value.into())
    }

    /// Address value
    pub fn address(value: impl Into<String>) -> Self {
        ScValue::Address(value.into())
    }

    /// Build a map from `(key, value)` pairs.
    pub fn map<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, ScValue)>,
    {
        ScValue::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// True for [`ScValue::Void`].
    pub fn is_void(&self) -> bool {
        matches!(self, ScValue::Void)
    }

    /// Look up `key` in a map value.
    pub fn get(&self, key: &str) -> Option<&ScValue> {
        match self {
            ScValue::Map(entries) => entries.get(key),
            _ => None,
        }
    }

    /// First present, non-void entry among `keys`.
    ///
    /// Used to accept both `snake_case` and `camelCase` spellings of a field.
    pub fn field(&self, keys: &[&str]) -> Option<&ScValue> {
        keys.iter()
            .filter_map(|key| self.get(key))
            .find(|value| !value.is_void())
    }

    /// Integer view of a numeric value (or a string holding one).
    pub fn as_i128(&self) -> Option<i128> {
        match self {
            ScValue::U32(v) => Some(i128::from(*v)),
            ScValue::I32(v) => Some(i128::from(*v)),
            ScValue::U64(v) => Some(i128::from(*v)),
            ScValue::I64(v) => Some(i128::from(*v)),
            ScValue::U128(v) => i128::try_from(*v).ok(),
            ScValue::I128(v) => Some(*v),
            ScValue::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// u32 view, if the value is numeric and in range.
    pub fn as_u32(&self) -> Option<u32> {
        self.as_i128().and_then(|v| u32::try_from(v).ok())
    }

    /// u64 view, if the value is numeric and in range.
    pub fn as_u64(&self) -> Option<u64> {
        self.as_i128().and_then(|v| u64::try_from(v).ok())
    }

    /// Text of a string, symbol or address.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ScValue::String(s) | ScValue::Symbol(s) | ScValue::Address(s) => Some(s),
            _ => None,
        }
    }

    /// Elements of a vector value.
    pub fn as_vec(&self) -> Option<&[ScValue]> {
        match self {
            ScValue::Vec(items) => Some(items),
            _ => None,
        }
    }

    /// Permissive truthiness: void, `false`, zero and empty strings are
    /// false; everything else is true.
    pub fn is_truthy(&self) -> bool {
        match self {
            ScValue::Void => false,
            ScValue::Bool(b) => *b,
            ScValue::String(s) | ScValue::Symbol(s) | ScValue::Bytes(s) => !s.is_empty(),
            ScValue::Address(_) | ScValue::Vec(_) | ScValue::Map(_) => true,
            _ => self.as_i128().map_or(true, |v| v != 0),
        }
    }
}

// ============================================================================
// Serde helpers
// ============================================================================

/// 128-bit integers as decimal strings; plain JSON numbers are accepted on
/// input.
mod int_string {
    use std::fmt::Display;
    use std::str::FromStr;

    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Text(String),
        Number(serde_json::Number),
    }

    pub fn serialize<T: Display, S: Serializer>(value: &T, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: FromStr,
        T::Err: Display,
        D: Deserializer<'de>,
    {
        let text = match Repr::deserialize(deserializer)? {
            Repr::Text(s) => s,
            Repr::Number(n) => n.to_string(),
        };
        text.trim().parse().map_err(D::Error::custom)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
