//! Attribute templates and their native `CK_ATTRIBUTE` arrays.
//!
//! Managed to native conversion is driven by the [`Value`] variant, native to
//! managed conversion by the attribute type through [`AttributeKind`].

use std::fmt;

use cosmian_pkcs11_sys::{CK_ATTRIBUTE_TYPE, CK_ULONG};

use crate::{
    WResult,
    convert::{
        CharEncoding, Date, Version, chars_from_native, date_from_bytes, ulong_from_native,
        ulong_to_native,
    },
};

mod kind;
mod native;
mod negotiate;
mod reader;

pub use kind::AttributeKind;
pub use native::{NativeTemplate, NativeValue};
pub use negotiate::{read_bytes_two_pass, read_bytes_with_guess, read_ulongs_two_pass};
pub use reader::AttributeReader;

/// A dynamically typed attribute or parameter value.
#[derive(Debug, Clone, PartialEq, strum_macros::IntoStaticStr)]
pub enum Value {
    Absent,
    Bool(bool),
    Byte(u8),
    Char(char),
    Integer(i32),
    Long(i64),
    Bytes(Vec<u8>),
    /// Characters, encoded with the encoding of the call.
    Chars(Vec<char>),
    /// Always UTF-8 on the native side.
    Text(String),
    Date(Date),
    Version(Version),
    /// Packed native words, e.g. the allowed mechanisms of a key.
    UlongArray(Vec<CK_ULONG>),
    /// Nested template of an array attribute.
    Template(Vec<Attribute>),
    /// Floating-point numbers have no PKCS#11 encoding and are always rejected.
    Float(f64),
}

impl Value {
    /// A native word, stored as its two's complement long.
    #[must_use]
    pub const fn ulong(value: CK_ULONG) -> Self {
        Self::Long(ulong_from_native(value))
    }

    /// Name of the variant, used in conversion errors.
    #[must_use]
    pub fn shape(&self) -> &'static str {
        self.into()
    }

    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    #[must_use]
    pub const fn as_ulong(&self) -> Option<CK_ULONG> {
        match self {
            Self::Long(v) => Some(ulong_to_native(*v)),
            Self::Integer(v) => Some(ulong_to_native(*v as i64)),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Text(s) => Some(s.clone()),
            Self::Chars(c) => Some(c.iter().collect()),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_template(&self) -> Option<&[Attribute]> {
        match self {
            Self::Template(t) => Some(t),
            _ => None,
        }
    }

    /// Decode the raw bytes of a scalar attribute of the given kind.
    ///
    /// An empty value is absent. A value whose length does not match the
    /// expected native layout is kept as raw bytes.
    pub fn decode(kind: AttributeKind, bytes: &[u8], encoding: CharEncoding) -> WResult<Self> {
        if bytes.is_empty() && !matches!(kind, AttributeKind::Bytes | AttributeKind::Text) {
            return Ok(Self::Absent);
        }
        Ok(match kind {
            AttributeKind::Ulong => match <[u8; size_of::<CK_ULONG>()]>::try_from(bytes) {
                Ok(word) => Self::ulong(CK_ULONG::from_ne_bytes(word)),
                Err(_) => Self::Bytes(bytes.to_vec()),
            },
            AttributeKind::Bool => Self::Bool(bytes.iter().any(|b| *b != 0)),
            AttributeKind::Text => Self::Chars(chars_from_native(bytes, encoding)?),
            AttributeKind::Date => match date_from_bytes(bytes) {
                Ok(date) => Self::Date(date),
                Err(_) => Self::Bytes(bytes.to_vec()),
            },
            AttributeKind::MechanismArray => {
                Self::UlongArray(crate::convert::ulongs_from_bytes(bytes)?)
            }
            AttributeKind::TemplateArray | AttributeKind::Bytes => {
                Self::Bytes(crate::convert::bytes_from_native(bytes)?)
            }
        })
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => write!(f, "<absent>"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Byte(v) => write!(f, "0x{v:02X}"),
            Self::Char(v) => write!(f, "{v}"),
            Self::Integer(v) => write!(f, "{v}"),
            Self::Long(v) => write!(f, "{v}"),
            Self::Bytes(v) => write!(f, "{} bytes", v.len()),
            Self::Chars(v) => write!(f, "{}", v.iter().collect::<String>()),
            Self::Text(v) => write!(f, "{v}"),
            Self::Date(v) => write!(f, "{v}"),
            Self::Version(v) => write!(f, "{v}"),
            Self::UlongArray(v) => write!(f, "{v:?}"),
            Self::Template(v) => write!(f, "{} nested attributes", v.len()),
            Self::Float(v) => write!(f, "{v}"),
        }
    }
}

/// A typed attribute of a template.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub attribute_type: CK_ATTRIBUTE_TYPE,
    pub value: Value,
}

impl Attribute {
    #[must_use]
    pub const fn new(attribute_type: CK_ATTRIBUTE_TYPE, value: Value) -> Self {
        Self {
            attribute_type,
            value,
        }
    }

    /// An attribute to be read back; its value is filled by the module.
    #[must_use]
    pub const fn query(attribute_type: CK_ATTRIBUTE_TYPE) -> Self {
        Self::new(attribute_type, Value::Absent)
    }

    #[must_use]
    pub const fn kind(&self) -> AttributeKind {
        AttributeKind::of(self.attribute_type)
    }
}
