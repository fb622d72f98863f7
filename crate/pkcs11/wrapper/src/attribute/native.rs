use std::{borrow::Cow, ffi::c_void, ptr};

use cosmian_pkcs11_sys::{
    CK_ATTRIBUTE, CK_ATTRIBUTE_PTR, CK_DATE, CK_ULONG, CK_VERSION, CK_VOID_PTR,
    CKF_ARRAY_ATTRIBUTE,
};

use super::{Attribute, Value};
use crate::{
    WResult, WrapperError,
    convert::{
        CharEncoding, bool_to_native, chars_to_native, date_to_native, str_to_native,
        ulong_to_native, version_to_native,
    },
    wrapper_bail,
};

/// Native memory backing one value. The heap blocks never move while the
/// owner is alive, so pointers handed to the module stay valid.
#[derive(Debug)]
enum Storage<'a> {
    None,
    Bytes(Cow<'a, [u8]>),
    Word(Box<CK_ULONG>),
    Words(Cow<'a, [CK_ULONG]>),
    Date(Box<CK_DATE>),
    Version(Box<CK_VERSION>),
    Nested(NativeTemplate<'a>),
}

/// A managed value marshaled into native memory: `(pointer, length)` plus
/// the storage it points into.
#[derive(Debug)]
pub struct NativeValue<'a> {
    storage: Storage<'a>,
    len: CK_ULONG,
}

impl<'a> NativeValue<'a> {
    /// Marshal a value. Nested templates are only accepted when `allow_nested`
    /// is set, as in attribute templates.
    pub(crate) fn build(
        value: &'a Value,
        encoding: CharEncoding,
        allow_nested: bool,
    ) -> WResult<Self> {
        let storage = match value {
            Value::Absent => Storage::None,
            Value::Bool(b) => Storage::Bytes(Cow::Owned(vec![bool_to_native(*b)])),
            Value::Byte(b) => Storage::Bytes(Cow::Owned(vec![*b])),
            Value::Char(c) => Storage::Bytes(Cow::Owned(chars_to_native(&[*c], encoding)?)),
            Value::Integer(v) => Storage::Word(Box::new(ulong_to_native(i64::from(*v)))),
            Value::Long(v) => Storage::Word(Box::new(ulong_to_native(*v))),
            Value::Bytes(b) => Storage::Bytes(Cow::Borrowed(b.as_slice())),
            Value::Chars(c) => Storage::Bytes(Cow::Owned(chars_to_native(c, encoding)?)),
            Value::Text(s) => Storage::Bytes(str_to_native(s, CharEncoding::Utf8)?),
            Value::Date(d) => Storage::Date(Box::new(date_to_native(d)?)),
            Value::Version(v) => Storage::Version(Box::new(version_to_native(v))),
            Value::UlongArray(words) => Storage::Words(Cow::Borrowed(words.as_slice())),
            Value::Template(nested) if allow_nested => {
                Storage::Nested(NativeTemplate::new(nested, encoding)?)
            }
            Value::Template(_) | Value::Float(_) => {
                wrapper_bail!(WrapperError::UnrecognizedValue(value.shape().to_owned()));
            }
        };
        let len = match &storage {
            Storage::None => 0,
            Storage::Bytes(b) => b.len(),
            Storage::Word(_) => size_of::<CK_ULONG>(),
            Storage::Words(w) => w.len() * size_of::<CK_ULONG>(),
            Storage::Date(_) => size_of::<CK_DATE>(),
            Storage::Version(_) => size_of::<CK_VERSION>(),
            Storage::Nested(t) => t.len() * size_of::<CK_ATTRIBUTE>(),
        };
        Ok(Self {
            storage,
            len: CK_ULONG::try_from(len)?,
        })
    }

    /// Marshal a value of a mechanism parameter, where nested templates are
    /// not a valid shape.
    pub fn new(value: &'a Value, encoding: CharEncoding) -> WResult<Self> {
        Self::build(value, encoding, false)
    }

    /// Pointer to the native value; null when absent or empty.
    pub fn as_mut_ptr(&mut self) -> CK_VOID_PTR {
        match &mut self.storage {
            Storage::None => ptr::null_mut(),
            Storage::Bytes(b) if b.is_empty() => ptr::null_mut(),
            Storage::Bytes(b) => b.as_ptr().cast_mut().cast::<c_void>(),
            Storage::Word(w) => (&raw mut **w).cast::<c_void>(),
            Storage::Words(w) if w.is_empty() => ptr::null_mut(),
            Storage::Words(w) => w.as_ptr().cast_mut().cast::<c_void>(),
            Storage::Date(d) => (&raw mut **d).cast::<c_void>(),
            Storage::Version(v) => (&raw mut **v).cast::<c_void>(),
            Storage::Nested(t) => t.as_mut_ptr().cast::<c_void>(),
        }
    }

    #[must_use]
    pub const fn len(&self) -> CK_ULONG {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    const fn is_nested(&self) -> bool {
        matches!(self.storage, Storage::Nested(_))
    }
}

/// A native `CK_ATTRIBUTE` array together with every buffer it points into.
///
/// Nested templates of array attributes are marshaled recursively; their
/// type carries `CKF_ARRAY_ATTRIBUTE` and their length is the size of the
/// nested `CK_ATTRIBUTE` array in bytes.
#[derive(Debug)]
pub struct NativeTemplate<'a> {
    attributes: Vec<CK_ATTRIBUTE>,
    values: Vec<NativeValue<'a>>,
}

impl<'a> NativeTemplate<'a> {
    /// Marshal `template`, stopping at the first value that cannot be
    /// converted. Everything built so far is released on error.
    pub fn new(template: &'a [Attribute], encoding: CharEncoding) -> WResult<Self> {
        let mut attributes = Vec::new();
        attributes.try_reserve_exact(template.len())?;
        let mut values = Vec::new();
        values.try_reserve_exact(template.len())?;
        for attribute in template {
            let mut value = NativeValue::build(&attribute.value, encoding, true)?;
            let type_ = if value.is_nested() {
                attribute.attribute_type | CKF_ARRAY_ATTRIBUTE
            } else {
                attribute.attribute_type
            };
            attributes.push(CK_ATTRIBUTE {
                type_,
                pValue: value.as_mut_ptr(),
                ulValueLen: value.len(),
            });
            values.push(value);
        }
        Ok(Self { attributes, values })
    }

    /// Pointer to the first attribute; null for an empty template.
    pub fn as_mut_ptr(&mut self) -> CK_ATTRIBUTE_PTR {
        if self.attributes.is_empty() {
            ptr::null_mut()
        } else {
            self.attributes.as_mut_ptr()
        }
    }

    /// Number of attributes, as passed in the `ulCount` argument.
    pub fn count(&self) -> WResult<CK_ULONG> {
        Ok(CK_ULONG::try_from(self.attributes.len())?)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    #[must_use]
    pub fn attributes(&self) -> &[CK_ATTRIBUTE] {
        &self.attributes
    }

    /// Number of marshaled values, nested ones included.
    #[must_use]
    pub fn value_count(&self) -> usize {
        self.values.len()
            + self
                .values
                .iter()
                .map(|v| match &v.storage {
                    Storage::Nested(t) => t.value_count(),
                    _ => 0,
                })
                .sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use std::slice;

    use cosmian_pkcs11_sys::*;

    use super::*;
    use crate::convert::{Date, Version};

    fn raw_bytes(attribute: &CK_ATTRIBUTE) -> Vec<u8> {
        let len = usize::try_from(attribute.ulValueLen).unwrap();
        // SAFETY: the template owns `len` bytes at `pValue`.
        unsafe { slice::from_raw_parts(attribute.pValue.cast::<u8>(), len) }.to_vec()
    }

    #[test]
    fn values_are_marshaled_by_variant() {
        let template = vec![
            Attribute::new(CKA_TOKEN, Value::Bool(true)),
            Attribute::new(CKA_CLASS, Value::ulong(CKO_SECRET_KEY)),
            Attribute::new(CKA_VALUE_LEN, Value::Integer(32)),
            Attribute::new(CKA_LABEL, Value::Text("aes".to_owned())),
            Attribute::new(CKA_APPLICATION, Value::Chars(vec!['é'])),
            Attribute::new(CKA_START_DATE, Value::Date(Date::new(2024, 3, 1))),
            Attribute::new(CKA_VENDOR_DEFINED, Value::Version(Version::new(2, 40))),
            Attribute::new(CKA_ID, Value::Bytes(vec![1, 2, 3])),
            Attribute::new(CKA_ALLOWED_MECHANISMS, Value::UlongArray(vec![CKM_AES_CBC])),
            Attribute::query(CKA_VALUE),
        ];
        let mut native = NativeTemplate::new(&template, CharEncoding::SingleByte).unwrap();
        assert_eq!(native.count().unwrap(), 10);
        assert!(!native.as_mut_ptr().is_null());
        let attrs = native.attributes();
        assert_eq!(raw_bytes(&attrs[0]), vec![CK_TRUE]);
        assert_eq!(raw_bytes(&attrs[1]), CKO_SECRET_KEY.to_ne_bytes().to_vec());
        assert_eq!(raw_bytes(&attrs[2]), (32 as CK_ULONG).to_ne_bytes().to_vec());
        assert_eq!(raw_bytes(&attrs[3]), b"aes".to_vec());
        assert_eq!(raw_bytes(&attrs[4]), vec![0xE9]);
        assert_eq!(raw_bytes(&attrs[5]), b"20240301".to_vec());
        assert_eq!(raw_bytes(&attrs[6]), vec![2, 40]);
        assert_eq!(raw_bytes(&attrs[7]), vec![1, 2, 3]);
        assert_eq!(
            attrs[8].ulValueLen as usize,
            size_of::<CK_ULONG>()
        );
        assert!(attrs[9].pValue.is_null());
        assert_eq!(attrs[9].ulValueLen, 0);
    }

    #[test]
    fn nested_templates() {
        for n in [0_usize, 1, 3] {
            let nested: Vec<Attribute> = (0..n)
                .map(|i| Attribute::new(CKA_ENCRYPT, Value::Bool(i % 2 == 0)))
                .collect();
            let template = vec![Attribute::new(CKA_WRAP_TEMPLATE, Value::Template(nested))];
            let native = NativeTemplate::new(&template, CharEncoding::Utf8).unwrap();
            let outer = native.attributes()[0];
            assert_eq!(outer.type_ & CKF_ARRAY_ATTRIBUTE, CKF_ARRAY_ATTRIBUTE);
            assert_eq!(outer.ulValueLen as usize, n * size_of::<CK_ATTRIBUTE>());
            assert_eq!(outer.pValue.is_null(), n == 0);
            assert_eq!(native.value_count(), 1 + n);
            if n > 0 {
                // SAFETY: the template owns `n` nested attributes.
                let inner = unsafe {
                    slice::from_raw_parts(outer.pValue.cast::<CK_ATTRIBUTE>(), n)
                };
                assert!(inner.iter().all(|a| a.type_ == CKA_ENCRYPT && a.ulValueLen == 1));
            }
        }
    }

    #[test]
    fn unmarshalable_shapes_are_rejected() {
        let template = vec![
            Attribute::new(CKA_TOKEN, Value::Bool(true)),
            Attribute::new(CKA_VALUE, Value::Float(0.5)),
        ];
        let err = NativeTemplate::new(&template, CharEncoding::Utf8).unwrap_err();
        assert!(matches!(err, WrapperError::UnrecognizedValue(ref s) if s == "Float"));

        let nested = Value::Template(Vec::new());
        assert!(matches!(
            NativeValue::new(&nested, CharEncoding::Utf8),
            Err(WrapperError::UnrecognizedValue(_))
        ));
        let mut absent = NativeValue::new(&Value::Absent, CharEncoding::Utf8).unwrap();
        assert!(absent.as_mut_ptr().is_null());
        assert!(absent.is_empty());
    }
}
