//! Variable-length arrays: byte buffers, word (handle) arrays and character arrays.
//!
//! Output sizes are chosen by the module, so every allocation here is fallible
//! and reported as [`WrapperError::Allocation`].

use std::{ptr, slice};

use cosmian_pkcs11_sys::{CK_BYTE, CK_BYTE_PTR, CK_ULONG};

use crate::{WResult, WrapperError};

/// Pointer and length of an optional buffer; absent maps to `(null, 0)`.
///
/// `CK_BYTE` and `u8` share their layout, so the managed buffer is lent
/// without a copy.
pub fn buffer_ptr_len(bytes: Option<&[u8]>) -> WResult<(CK_BYTE_PTR, CK_ULONG)> {
    Ok(match bytes {
        Some(bytes) => (bytes.as_ptr().cast_mut(), CK_ULONG::try_from(bytes.len())?),
        None => (ptr::null_mut(), 0),
    })
}

/// A zeroed buffer of `len` bytes.
pub fn alloc_bytes(len: usize) -> WResult<Vec<u8>> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|e| WrapperError::Allocation(format!("{len} bytes: {e}")))?;
    buffer.resize(len, 0);
    Ok(buffer)
}

/// A zeroed array of `len` native words.
pub fn alloc_ulongs(len: usize) -> WResult<Vec<CK_ULONG>> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|e| WrapperError::Allocation(format!("{len} words: {e}")))?;
    buffer.resize(len, 0);
    Ok(buffer)
}

pub fn bytes_from_native(bytes: &[CK_BYTE]) -> WResult<Vec<u8>> {
    let mut out = Vec::new();
    out.try_reserve_exact(bytes.len())?;
    out.extend_from_slice(bytes);
    Ok(out)
}

/// Copy `len` bytes out of native memory. A null pointer maps to `None`.
///
/// # Safety
///
/// When non-null, `data` must be valid for reads of `len` bytes.
pub unsafe fn bytes_from_raw(data: *const CK_BYTE, len: CK_ULONG) -> WResult<Option<Vec<u8>>> {
    if data.is_null() {
        return Ok(None);
    }
    let len = usize::try_from(len)?;
    // SAFETY: guaranteed by the caller.
    let bytes = unsafe { slice::from_raw_parts(data, len) };
    bytes_from_native(bytes).map(Some)
}

/// Decode a packed array of native words from raw attribute bytes.
pub fn ulongs_from_bytes(bytes: &[u8]) -> WResult<Vec<CK_ULONG>> {
    const WORD: usize = size_of::<CK_ULONG>();
    if bytes.len() % WORD != 0 {
        return Err(WrapperError::Conversion(format!(
            "{} bytes is not a whole number of {WORD}-byte words",
            bytes.len()
        )));
    }
    let mut out = Vec::new();
    out.try_reserve_exact(bytes.len() / WORD)?;
    for chunk in bytes.chunks_exact(WORD) {
        let mut word = [0_u8; WORD];
        word.copy_from_slice(chunk);
        out.push(CK_ULONG::from_ne_bytes(word));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_buffers_round_trip() {
        let large: Vec<u8> = (0..2048_u32).map(|i| (i % 251) as u8).collect();
        for data in [Vec::new(), vec![0_u8], vec![1, 2, 3], large] {
            let back = bytes_from_native(&data).unwrap();
            assert_eq!(back.len(), data.len());
            assert_eq!(back, data);
        }
    }

    #[test]
    fn raw_null_is_absent() {
        // SAFETY: a null pointer is never read.
        let none = unsafe { bytes_from_raw(ptr::null(), 12) }.unwrap();
        assert!(none.is_none());
        let data = [9_u8, 8, 7];
        // SAFETY: `data` outlives the call.
        let some = unsafe { bytes_from_raw(data.as_ptr(), 3) }.unwrap();
        assert_eq!(some, Some(data.to_vec()));
        let (p, l) = buffer_ptr_len(None).unwrap();
        assert!(p.is_null());
        assert_eq!(l, 0);
        let (p, l) = buffer_ptr_len(Some(&data[..])).unwrap();
        assert_eq!((p.cast_const(), l), (data.as_ptr(), 3));
    }

    #[test]
    fn word_arrays_round_trip() {
        let native = [0, 1, 42, CK_ULONG::MAX];
        let packed: Vec<u8> = native.iter().flat_map(|v| v.to_ne_bytes()).collect();
        assert_eq!(packed.len(), 4 * size_of::<CK_ULONG>());
        assert_eq!(ulongs_from_bytes(&packed).unwrap(), native);
        assert!(ulongs_from_bytes(&packed[1..]).is_err());
    }

    #[test]
    fn oversized_allocation_is_an_error() {
        assert!(matches!(
            alloc_bytes(usize::MAX),
            Err(WrapperError::Allocation(_))
        ));
        assert!(matches!(
            alloc_ulongs(usize::MAX / 2),
            Err(WrapperError::Allocation(_))
        ));
    }
}
