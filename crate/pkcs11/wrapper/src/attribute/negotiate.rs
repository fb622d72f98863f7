//! Output length negotiation for functions returning a buffer or a word array.

use cosmian_pkcs11_sys::{CK_BYTE_PTR, CK_RV, CK_ULONG, CK_ULONG_PTR, CKR_BUFFER_TOO_SMALL, CKR_OK};
use tracing::debug;

use crate::{
    WResult, WrapperError,
    convert::{alloc_bytes, alloc_ulongs},
    native_call::check_rv,
};

/// Read a byte buffer with the size query then fill protocol.
///
/// `call(output, output_len)` performs the native call. If the module reports
/// `CKR_BUFFER_TOO_SMALL` on the fill call (the size changed in between), the
/// buffer is grown to the newly reported size and the call repeated.
pub fn read_bytes_two_pass<F>(function: &'static str, mut call: F) -> WResult<Vec<u8>>
where
    F: FnMut(CK_BYTE_PTR, &mut CK_ULONG) -> CK_RV,
{
    let mut len: CK_ULONG = 0;
    check_rv(function, call(std::ptr::null_mut(), &mut len))?;
    loop {
        let mut buffer = alloc_bytes(usize::try_from(len)?)?;
        let requested = len;
        match call(buffer.as_mut_ptr(), &mut len) {
            CKR_OK => {
                buffer.truncate(usize::try_from(len)?);
                return Ok(buffer);
            }
            CKR_BUFFER_TOO_SMALL if len > requested => {
                debug!("{function}: output grew from {requested} to {len} bytes");
            }
            rv => return Err(WrapperError::pkcs11(function, rv)),
        }
    }
}

/// Read an array of native words (slot ids, mechanism types) with the count
/// query then fill protocol.
pub fn read_ulongs_two_pass<F>(function: &'static str, mut call: F) -> WResult<Vec<CK_ULONG>>
where
    F: FnMut(CK_ULONG_PTR, &mut CK_ULONG) -> CK_RV,
{
    let mut count: CK_ULONG = 0;
    check_rv(function, call(std::ptr::null_mut(), &mut count))?;
    loop {
        let mut words = alloc_ulongs(usize::try_from(count)?)?;
        let requested = count;
        match call(words.as_mut_ptr(), &mut count) {
            CKR_OK => {
                words.truncate(usize::try_from(count)?);
                return Ok(words);
            }
            CKR_BUFFER_TOO_SMALL if count > requested => {
                debug!("{function}: count grew from {requested} to {count}");
            }
            rv => return Err(WrapperError::pkcs11(function, rv)),
        }
    }
}

/// Read a byte buffer starting from a guessed size instead of a size query.
///
/// Some tokens fail the null-buffer size query of `C_Sign`. Starting with a
/// buffer of `guess` bytes avoids the query for most signatures. On
/// `CKR_BUFFER_TOO_SMALL` the call is repeated with the size the module
/// reported, and only if the module did not report a larger size does this
/// fall back to [`read_bytes_two_pass`].
pub fn read_bytes_with_guess<F>(function: &'static str, guess: usize, mut call: F) -> WResult<Vec<u8>>
where
    F: FnMut(CK_BYTE_PTR, &mut CK_ULONG) -> CK_RV,
{
    let mut buffer = alloc_bytes(guess)?;
    let requested = CK_ULONG::try_from(guess)?;
    let mut len = requested;
    match call(buffer.as_mut_ptr(), &mut len) {
        CKR_OK => {
            buffer.truncate(usize::try_from(len)?);
            Ok(buffer)
        }
        CKR_BUFFER_TOO_SMALL if len > requested => {
            debug!("{function}: {guess} byte guess too small, retrying with {len}");
            let mut buffer = alloc_bytes(usize::try_from(len)?)?;
            check_rv(function, call(buffer.as_mut_ptr(), &mut len))?;
            buffer.truncate(usize::try_from(len)?);
            Ok(buffer)
        }
        CKR_BUFFER_TOO_SMALL => {
            debug!("{function}: {guess} byte guess too small, querying the size");
            read_bytes_two_pass(function, call)
        }
        rv => Err(WrapperError::pkcs11(function, rv)),
    }
}
