//! `C_GetAttributeValue` length negotiation.
//!
//! The values are read in three or four passes:
//! 1. probe every length with null value pointers,
//! 2. allocate by attribute kind; array attributes get an array of nested
//!    `CK_ATTRIBUTE` with null values, and a second probe reads the nested
//!    types and lengths,
//! 3. fill,
//! 4. decode.

use std::{ffi::c_void, ptr, slice};

use cosmian_pkcs11_sys::{
    CK_ATTRIBUTE, CK_ATTRIBUTE_PTR, CK_RV, CK_ULONG, CK_UNAVAILABLE_INFORMATION,
    CKR_ATTRIBUTE_SENSITIVE, CKR_ATTRIBUTE_TYPE_INVALID, CKR_OK,
};
use tracing::trace;

use super::{Attribute, AttributeKind, Value};
use crate::{
    WResult, WrapperError,
    convert::{CharEncoding, alloc_ulongs},
};

const FUNCTION: &str = "C_GetAttributeValue";

/// Word-aligned byte buffer, so that the module may write native words into it.
#[derive(Debug)]
struct Buffer {
    words: Vec<CK_ULONG>,
    len: usize,
}

impl Buffer {
    fn new(len: usize) -> WResult<Self> {
        Ok(Self {
            words: alloc_ulongs(len.div_ceil(size_of::<CK_ULONG>()))?,
            len,
        })
    }

    fn as_mut_ptr(&mut self) -> *mut c_void {
        if self.len == 0 {
            ptr::null_mut()
        } else {
            self.words.as_mut_ptr().cast::<c_void>()
        }
    }

    fn bytes(&self, len: usize) -> &[u8] {
        let len = len.min(self.len);
        // SAFETY: `words` holds at least `self.len` initialized bytes.
        unsafe { slice::from_raw_parts(self.words.as_ptr().cast::<u8>(), len) }
    }
}

/// Native storage of one requested attribute.
#[derive(Debug)]
enum Slot {
    Unavailable,
    Scalar(Buffer),
    Nested {
        attributes: Vec<CK_ATTRIBUTE>,
        buffers: Vec<Option<Buffer>>,
    },
}

impl Slot {
    /// Point `attribute` at this slot's storage.
    fn bind(&mut self, attribute: &mut CK_ATTRIBUTE) {
        match self {
            Self::Unavailable => attribute.pValue = ptr::null_mut(),
            Self::Scalar(buffer) => attribute.pValue = buffer.as_mut_ptr(),
            Self::Nested {
                attributes,
                buffers,
            } => {
                for (nested, buffer) in attributes.iter_mut().zip(buffers.iter_mut()) {
                    nested.pValue = buffer.as_mut().map_or(ptr::null_mut(), Buffer::as_mut_ptr);
                }
                attribute.pValue = if attributes.is_empty() {
                    ptr::null_mut()
                } else {
                    attributes.as_mut_ptr().cast::<c_void>()
                };
            }
        }
    }
}

const fn tolerated(rv: CK_RV) -> bool {
    matches!(
        rv,
        CKR_OK | CKR_ATTRIBUTE_SENSITIVE | CKR_ATTRIBUTE_TYPE_INVALID
    )
}

fn check(rv: CK_RV) -> WResult<()> {
    if tolerated(rv) {
        Ok(())
    } else {
        Err(WrapperError::pkcs11(FUNCTION, rv))
    }
}

fn decode_scalar(
    attribute: &CK_ATTRIBUTE,
    buffer: Option<&Buffer>,
    encoding: CharEncoding,
) -> WResult<Value> {
    if attribute.ulValueLen == CK_UNAVAILABLE_INFORMATION {
        return Ok(Value::Absent);
    }
    let len = usize::try_from(attribute.ulValueLen)?;
    let bytes = buffer.map_or(&[][..], |b| b.bytes(len));
    // nested array attributes of nested templates are kept as raw bytes
    let kind = match AttributeKind::of(attribute.type_) {
        AttributeKind::TemplateArray => AttributeKind::Bytes,
        kind => kind,
    };
    Value::decode(kind, bytes, encoding)
}

/// Reads attribute values through a `C_GetAttributeValue`-shaped callback.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttributeReader {
    encoding: CharEncoding,
}

impl AttributeReader {
    #[must_use]
    pub const fn new(encoding: CharEncoding) -> Self {
        Self { encoding }
    }

    /// Fill the value of every attribute of `template`.
    ///
    /// `get_attribute_value(template, count)` performs the native call. When
    /// the module reports an attribute as unavailable (`CK_UNAVAILABLE_INFORMATION`
    /// length), the other attributes are still populated, the unavailable
    /// ones are set to [`Value::Absent`], and the first of them is reported as
    /// [`WrapperError::AttributeUnavailable`].
    pub fn read<F>(&self, template: &mut [Attribute], mut get_attribute_value: F) -> WResult<()>
    where
        F: FnMut(CK_ATTRIBUTE_PTR, CK_ULONG) -> CK_RV,
    {
        if template.is_empty() {
            return Ok(());
        }
        let count = CK_ULONG::try_from(template.len())?;
        let mut native: Vec<CK_ATTRIBUTE> = Vec::new();
        native.try_reserve_exact(template.len())?;
        native.extend(template.iter().map(|a| CK_ATTRIBUTE {
            type_: a.attribute_type,
            pValue: ptr::null_mut(),
            ulValueLen: 0,
        }));

        // 1. lengths
        let rv = get_attribute_value(native.as_mut_ptr(), count);
        check(rv)?;

        // 2. allocation
        let mut slots = Vec::new();
        slots.try_reserve_exact(template.len())?;
        for attribute in &native {
            let slot = if attribute.ulValueLen == CK_UNAVAILABLE_INFORMATION {
                Slot::Unavailable
            } else {
                let len = usize::try_from(attribute.ulValueLen)?;
                match AttributeKind::of(attribute.type_) {
                    AttributeKind::TemplateArray => {
                        let n = len / size_of::<CK_ATTRIBUTE>();
                        let mut attributes = Vec::new();
                        attributes.try_reserve_exact(n)?;
                        attributes.resize(n, CK_ATTRIBUTE::default());
                        let mut buffers = Vec::new();
                        buffers.try_reserve_exact(n)?;
                        buffers.resize_with(n, || None);
                        Slot::Nested {
                            attributes,
                            buffers,
                        }
                    }
                    _ => Slot::Scalar(Buffer::new(len)?),
                }
            };
            slots.push(slot);
        }

        let arrays: Vec<usize> = slots
            .iter()
            .enumerate()
            .filter(|(_, s)| matches!(s, Slot::Nested { attributes, .. } if !attributes.is_empty()))
            .map(|(i, _)| i)
            .collect();
        if !arrays.is_empty() {
            // second probe: nested types and lengths
            let mut probe = Vec::new();
            probe.try_reserve_exact(arrays.len())?;
            for &i in &arrays {
                let mut attribute = native[i];
                slots[i].bind(&mut attribute);
                probe.push(attribute);
            }
            trace!("{FUNCTION}: probing {} nested templates", probe.len());
            check(get_attribute_value(
                probe.as_mut_ptr(),
                CK_ULONG::try_from(probe.len())?,
            ))?;
            for &i in &arrays {
                if let Slot::Nested {
                    attributes,
                    buffers,
                } = &mut slots[i]
                {
                    for (nested, buffer) in attributes.iter().zip(buffers.iter_mut()) {
                        if nested.ulValueLen != CK_UNAVAILABLE_INFORMATION {
                            *buffer = Some(Buffer::new(usize::try_from(nested.ulValueLen)?)?);
                        }
                    }
                }
            }
        }

        // 3. values
        for (attribute, slot) in native.iter_mut().zip(slots.iter_mut()) {
            slot.bind(attribute);
        }
        let rv = get_attribute_value(native.as_mut_ptr(), count);
        check(rv)?;

        // 4. decoding
        let mut unavailable = None;
        for (index, ((managed, attribute), slot)) in template
            .iter_mut()
            .zip(&native)
            .zip(&slots)
            .enumerate()
        {
            managed.value = match slot {
                _ if attribute.ulValueLen == CK_UNAVAILABLE_INFORMATION => {
                    unavailable.get_or_insert(index);
                    Value::Absent
                }
                Slot::Unavailable => {
                    unavailable.get_or_insert(index);
                    Value::Absent
                }
                Slot::Scalar(buffer) => decode_scalar(attribute, Some(buffer), self.encoding)?,
                Slot::Nested {
                    attributes,
                    buffers,
                } => {
                    let n = usize::try_from(attribute.ulValueLen)? / size_of::<CK_ATTRIBUTE>();
                    let mut nested = Vec::new();
                    nested.try_reserve_exact(n.min(attributes.len()))?;
                    for (a, b) in attributes.iter().zip(buffers).take(n) {
                        nested.push(Attribute::new(
                            a.type_,
                            decode_scalar(a, b.as_ref(), self.encoding)?,
                        ));
                    }
                    Value::Template(nested)
                }
            };
        }

        match unavailable {
            Some(index) => Err(WrapperError::AttributeUnavailable {
                index,
                attribute_type: template[index].attribute_type,
            }),
            None if rv != CKR_OK => Err(WrapperError::pkcs11(FUNCTION, rv)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use cosmian_pkcs11_sys::*;

    use super::*;

    /// An in-memory object answering `C_GetAttributeValue` like a module does.
    enum Stored {
        Raw(Vec<u8>),
        Template(Vec<(CK_ATTRIBUTE_TYPE, Vec<u8>)>),
    }

    struct FakeObject {
        attributes: HashMap<CK_ATTRIBUTE_TYPE, Stored>,
        calls: usize,
    }

    impl FakeObject {
        fn get(&mut self, template: CK_ATTRIBUTE_PTR, count: CK_ULONG) -> CK_RV {
            self.calls += 1;
            // SAFETY: the reader passes `count` valid attributes.
            let template = unsafe { slice::from_raw_parts_mut(template, count as usize) };
            let mut rv = CKR_OK;
            for attribute in template.iter_mut() {
                match self.attributes.get(&attribute.type_) {
                    None => {
                        attribute.ulValueLen = CK_UNAVAILABLE_INFORMATION;
                        rv = CKR_ATTRIBUTE_TYPE_INVALID;
                    }
                    Some(Stored::Raw(bytes)) => {
                        if !attribute.pValue.is_null() {
                            // SAFETY: the reader allocated the probed length.
                            unsafe {
                                ptr::copy_nonoverlapping(
                                    bytes.as_ptr(),
                                    attribute.pValue.cast::<u8>(),
                                    bytes.len(),
                                );
                            }
                        }
                        attribute.ulValueLen = bytes.len() as CK_ULONG;
                    }
                    Some(Stored::Template(nested)) => {
                        if !attribute.pValue.is_null() {
                            // SAFETY: the reader allocated one entry per nested attribute.
                            let inner = unsafe {
                                slice::from_raw_parts_mut(
                                    attribute.pValue.cast::<CK_ATTRIBUTE>(),
                                    nested.len(),
                                )
                            };
                            for (slot, (t, bytes)) in inner.iter_mut().zip(nested) {
                                slot.type_ = *t;
                                if !slot.pValue.is_null() {
                                    // SAFETY: as above, for the nested lengths.
                                    unsafe {
                                        ptr::copy_nonoverlapping(
                                            bytes.as_ptr(),
                                            slot.pValue.cast::<u8>(),
                                            bytes.len(),
                                        );
                                    }
                                }
                                slot.ulValueLen = bytes.len() as CK_ULONG;
                            }
                        }
                        attribute.ulValueLen =
                            (nested.len() * size_of::<CK_ATTRIBUTE>()) as CK_ULONG;
                    }
                }
            }
            rv
        }
    }

    fn object() -> FakeObject {
        let mut attributes = HashMap::new();
        attributes.insert(CKA_CLASS, Stored::Raw(CKO_SECRET_KEY.to_ne_bytes().to_vec()));
        attributes.insert(CKA_LABEL, Stored::Raw(b"my key".to_vec()));
        attributes.insert(CKA_VALUE, Stored::Raw((0..=255).collect()));
        attributes.insert(
            CKA_ALLOWED_MECHANISMS,
            Stored::Raw(
                [CKM_AES_CBC, CKM_AES_GCM]
                    .iter()
                    .flat_map(|m| m.to_ne_bytes())
                    .collect(),
            ),
        );
        attributes.insert(CKA_UNWRAP_TEMPLATE, Stored::Template(Vec::new()));
        attributes.insert(
            CKA_WRAP_TEMPLATE,
            Stored::Template(vec![
                (CKA_CLASS, CKO_SECRET_KEY.to_ne_bytes().to_vec()),
                (CKA_EXTRACTABLE, vec![CK_TRUE]),
                (CKA_END_DATE, b"20301231".to_vec()),
            ]),
        );
        FakeObject {
            attributes,
            calls: 0,
        }
    }

    #[test]
    fn scalars_are_read_in_two_calls() {
        let mut object = object();
        let mut template = vec![
            Attribute::query(CKA_CLASS),
            Attribute::query(CKA_LABEL),
            Attribute::query(CKA_VALUE),
            Attribute::query(CKA_ALLOWED_MECHANISMS),
        ];
        AttributeReader::default()
            .read(&mut template, |t, c| object.get(t, c))
            .unwrap();
        assert_eq!(object.calls, 2);
        assert_eq!(template[0].value, Value::ulong(CKO_SECRET_KEY));
        assert_eq!(template[1].value.as_text(), Some("my key".to_owned()));
        assert_eq!(template[2].value.as_bytes().map(<[u8]>::len), Some(256));
        assert_eq!(
            template[3].value,
            Value::UlongArray(vec![CKM_AES_CBC, CKM_AES_GCM])
        );
    }

    #[test]
    fn nested_templates_use_a_second_probe() {
        let mut object = object();
        let mut template = vec![
            Attribute::query(CKA_WRAP_TEMPLATE),
            Attribute::query(CKA_UNWRAP_TEMPLATE),
        ];
        AttributeReader::default()
            .read(&mut template, |t, c| object.get(t, c))
            .unwrap();
        assert_eq!(object.calls, 3);
        let nested = template[0].value.as_template().unwrap();
        assert_eq!(nested.len(), 3);
        assert_eq!(nested[0].value, Value::ulong(CKO_SECRET_KEY));
        assert_eq!(nested[1].value, Value::Bool(true));
        assert_eq!(
            nested[2].value,
            Value::Date(crate::convert::Date::new(2030, 12, 31))
        );
        assert_eq!(template[1].value, Value::Template(Vec::new()));
    }

    #[test]
    fn unavailable_attributes_are_reported() {
        let mut object = object();
        let mut template = vec![
            Attribute::query(CKA_CLASS),
            Attribute::query(CKA_PRIME_1),
            Attribute::query(CKA_LABEL),
        ];
        let err = AttributeReader::default()
            .read(&mut template, |t, c| object.get(t, c))
            .unwrap_err();
        assert!(matches!(
            err,
            WrapperError::AttributeUnavailable {
                index: 1,
                attribute_type: CKA_PRIME_1
            }
        ));
        assert_eq!(template[0].value, Value::ulong(CKO_SECRET_KEY));
        assert!(template[1].value.is_absent());
        assert_eq!(template[2].value.as_text(), Some("my key".to_owned()));
    }

    #[test]
    fn other_failures_are_returned_verbatim() {
        let mut template = vec![Attribute::query(CKA_CLASS)];
        let err = AttributeReader::default()
            .read(&mut template, |_, _| CKR_OBJECT_HANDLE_INVALID)
            .unwrap_err();
        assert_eq!(err.code(), CKR_OBJECT_HANDLE_INVALID);
    }
}
