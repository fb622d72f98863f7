use std::{collections::TryReserveError, str::Utf8Error, string::FromUtf8Error};

use cosmian_pkcs11_sys::{
    CK_ATTRIBUTE_TYPE, CK_RV, CKR_ARGUMENTS_BAD, CKR_ATTRIBUTE_TYPE_INVALID,
    CKR_CRYPTOKI_NOT_INITIALIZED, CKR_FUNCTION_NOT_SUPPORTED, CKR_GENERAL_ERROR, CKR_HOST_MEMORY,
};
use thiserror::Error;

use crate::names::rv_label;

pub(crate) mod result;

#[derive(Error, Debug)]
pub enum WrapperError {
    /// No connection is registered for the module handle.
    #[error("module is not connected")]
    Disconnected,

    /// The function list, or the entry in it, is null.
    #[error("{0} is not supported by the module")]
    FunctionNotSupported(&'static str),

    #[error("{function} returned {}", rv_label(.code))]
    Pkcs11 { function: &'static str, code: CK_RV },

    #[error("allocation failed: {0}")]
    Allocation(String),

    #[error("unrecognized value shape: {0}")]
    UnrecognizedValue(String),

    /// The module reported `CK_UNAVAILABLE_INFORMATION` as the length of an attribute.
    #[error("attribute 0x{attribute_type:08X} (template index {index}) is not available")]
    AttributeUnavailable {
        index: usize,
        attribute_type: CK_ATTRIBUTE_TYPE,
    },

    #[error("{0}")]
    Io(String),

    #[error("conversion error: {0}")]
    Conversion(String),

    #[error(transparent)]
    TryFromInt(#[from] std::num::TryFromIntError),

    #[error("{0}")]
    Default(String),
}

impl WrapperError {
    /// The PKCS#11 status code reported back to a native caller for this error.
    #[must_use]
    pub const fn code(&self) -> CK_RV {
        match self {
            Self::Pkcs11 { code, .. } => *code,
            Self::Disconnected => CKR_CRYPTOKI_NOT_INITIALIZED,
            Self::FunctionNotSupported(_) => CKR_FUNCTION_NOT_SUPPORTED,
            Self::Allocation(_) => CKR_HOST_MEMORY,
            Self::AttributeUnavailable { .. } => CKR_ATTRIBUTE_TYPE_INVALID,
            Self::UnrecognizedValue(_) | Self::Conversion(_) | Self::TryFromInt(_) => {
                CKR_ARGUMENTS_BAD
            }
            Self::Io(_) | Self::Default(_) => CKR_GENERAL_ERROR,
        }
    }

    /// Build the error for a non `CKR_OK` status returned by `function`.
    #[must_use]
    pub const fn pkcs11(function: &'static str, code: CK_RV) -> Self {
        Self::Pkcs11 { function, code }
    }
}

impl From<WrapperError> for CK_RV {
    fn from(e: WrapperError) -> Self {
        e.code()
    }
}

impl From<TryReserveError> for WrapperError {
    fn from(e: TryReserveError) -> Self {
        Self::Allocation(e.to_string())
    }
}

impl From<Utf8Error> for WrapperError {
    fn from(e: Utf8Error) -> Self {
        Self::Conversion(e.to_string())
    }
}

impl From<FromUtf8Error> for WrapperError {
    fn from(e: FromUtf8Error) -> Self {
        Self::Conversion(e.to_string())
    }
}

impl From<libloading::Error> for WrapperError {
    fn from(e: libloading::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<std::io::Error> for WrapperError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

/// Return early with an error if a condition is not satisfied.
///
/// This macro is equivalent to `if !$cond { return Err(From::from($err)); }`.
#[macro_export]
macro_rules! wrapper_ensure {
    ($cond:expr, $msg:literal $(,)?) => {
        if !$cond {
            return ::core::result::Result::Err($crate::wrapper_error!($msg));
        }
    };
    ($cond:expr, $err:expr $(,)?) => {
        if !$cond {
            return ::core::result::Result::Err($err);
        }
    };
    ($cond:expr, $fmt:expr, $($arg:tt)*) => {
        if !$cond {
            return ::core::result::Result::Err($crate::wrapper_error!($fmt, $($arg)*));
        }
    };
}

/// Construct a default error from a string.
#[macro_export]
macro_rules! wrapper_error {
    ($msg:literal) => {
        $crate::WrapperError::Default(::core::format_args!($msg).to_string())
    };
    ($err:expr $(,)?) => ({
        $crate::WrapperError::Default($err.to_string())
    });
    ($fmt:expr, $($arg:tt)*) => {
        $crate::WrapperError::Default(::core::format_args!($fmt, $($arg)*).to_string())
    };
}

/// Return early with an error.
#[macro_export]
macro_rules! wrapper_bail {
    ($msg:literal) => {
        return ::core::result::Result::Err($crate::wrapper_error!($msg))
    };
    ($err:expr $(,)?) => {
        return ::core::result::Result::Err($err)
    };
    ($fmt:expr, $($arg:tt)*) => {
        return ::core::result::Result::Err($crate::wrapper_error!($fmt, $($arg)*))
    };
}
