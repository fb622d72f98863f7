use cosmian_pkcs11_sys::{CK_RV, CKR_OK};
use tracing::debug;

use crate::{WResult, WrapperError};

/// Map a non `CKR_OK` status returned by `function` to [`WrapperError::Pkcs11`].
pub(crate) fn check_rv(function: &'static str, rv: CK_RV) -> WResult<()> {
    if rv == CKR_OK {
        Ok(())
    } else {
        let e = WrapperError::pkcs11(function, rv);
        debug!("{e}");
        Err(e)
    }
}

/// Resolve an entry of the module's function list.
///
/// A null function list or a null entry is [`WrapperError::FunctionNotSupported`].
macro_rules! entry {
    ($module:expr, $function:ident) => {
        $module
            .function_list(stringify!($function))?
            .$function
            .ok_or($crate::WrapperError::FunctionNotSupported(stringify!($function)))
    };
}
pub(crate) use entry;

/// Call an entry of the module's function list once and check its status.
macro_rules! native_call {
    ($module:expr, $function:ident $(, $arg:expr)* $(,)?) => {{
        let f = $crate::native_call::entry!($module, $function)?;
        // SAFETY: arguments are built by the caller according to the PKCS#11
        // signature of the entry, and their storage outlives the call.
        let rv = unsafe { f($($arg),*) };
        $crate::native_call::check_rv(stringify!($function), rv)
    }};
}
pub(crate) use native_call;
