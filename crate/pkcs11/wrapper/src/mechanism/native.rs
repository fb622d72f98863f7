use std::{any::Any, ffi::c_void, marker::PhantomData, ptr};

use cosmian_pkcs11_sys::{
    CK_AES_CBC_ENCRYPT_DATA_PARAMS, CK_BYTE_PTR, CK_DES_CBC_ENCRYPT_DATA_PARAMS,
    CK_ECDH1_DERIVE_PARAMS, CK_ECDH2_DERIVE_PARAMS, CK_ECMQV_DERIVE_PARAMS, CK_GCM_PARAMS,
    CK_KEA_DERIVE_PARAMS, CK_KEY_DERIVATION_STRING_DATA, CK_KEY_WRAP_SET_OAEP_PARAMS, CK_MECHANISM,
    CK_MECHANISM_TYPE, CK_PBE_PARAMS, CK_PKCS5_PBKD2_PARAMS, CK_RC2_CBC_PARAMS,
    CK_RC2_MAC_GENERAL_PARAMS, CK_RC5_CBC_PARAMS, CK_RC5_MAC_GENERAL_PARAMS, CK_RC5_PARAMS,
    CK_RSA_PKCS_OAEP_PARAMS, CK_RSA_PKCS_PSS_PARAMS, CK_SKIPJACK_PRIVATE_WRAP_PARAMS,
    CK_SKIPJACK_RELAYX_PARAMS, CK_SSL3_KEY_MAT_OUT, CK_SSL3_KEY_MAT_PARAMS,
    CK_SSL3_MASTER_KEY_DERIVE_PARAMS, CK_SSL3_RANDOM_DATA, CK_ULONG, CK_VERSION, CK_VOID_PTR,
    CK_X9_42_DH1_DERIVE_PARAMS, CK_X9_42_DH2_DERIVE_PARAMS, CK_X9_42_MQV_DERIVE_PARAMS,
    CKM_KEY_WRAP_SET_OAEP,
};
use tracing::trace;
use zeroize::Zeroizing;

use super::{
    Mechanism, MechanismParameters, Ssl3RandomData,
    copy_back::{CopyBack, CopyBackData, is_key_and_mac_derive, is_master_key_derive, is_pbe_with_iv},
    params::Ssl3KeyMatOut,
};
use crate::{
    WResult,
    attribute::NativeValue,
    convert::{
        CharEncoding, bool_to_native, buffer_ptr_len, bytes_from_raw, chars_to_native,
        ulong_to_native, version_from_native, version_to_native,
    },
};

/// Length of the initialization vector generated by the PBE mechanisms.
const PBE_IV_LEN: usize = 8;

/// Native memory owned on behalf of the parameter struct. Only the `Vec`
/// headers move when an entry is added, never the heap blocks pointed to.
#[derive(Default)]
struct Arena {
    bytes: Vec<Vec<u8>>,
    secrets: Vec<Zeroizing<Vec<u8>>>,
    words: Vec<Vec<CK_ULONG>>,
    versions: Vec<Vec<CK_VERSION>>,
    key_material: Vec<Vec<CK_SSL3_KEY_MAT_OUT>>,
}

fn keep<T>(store: &mut Vec<Vec<T>>, mut items: Vec<T>) -> *mut T {
    if items.is_empty() {
        return ptr::null_mut();
    }
    let p = items.as_mut_ptr();
    store.push(items);
    p
}

impl Arena {
    /// A writable copy of `bytes`.
    fn output(&mut self, bytes: &[u8]) -> WResult<(CK_BYTE_PTR, CK_ULONG)> {
        let len = CK_ULONG::try_from(bytes.len())?;
        Ok((keep(&mut self.bytes, bytes.to_vec()), len))
    }

    /// A zeroed writable buffer of `len` bytes.
    fn zeroed(&mut self, len: usize) -> CK_BYTE_PTR {
        keep(&mut self.bytes, vec![0; len])
    }

    /// Encoded characters, wiped on release.
    fn secret(&mut self, chars: &[char], encoding: CharEncoding) -> WResult<(CK_BYTE_PTR, CK_ULONG)> {
        let mut encoded = Zeroizing::new(chars_to_native(chars, encoding)?);
        let len = CK_ULONG::try_from(encoded.len())?;
        if encoded.is_empty() {
            return Ok((ptr::null_mut(), 0));
        }
        let p = encoded.as_mut_ptr();
        self.secrets.push(encoded);
        Ok((p, len))
    }

    fn secret_bytes(&mut self, bytes: &[u8]) -> WResult<(CK_BYTE_PTR, CK_ULONG)> {
        let mut copy = Zeroizing::new(bytes.to_vec());
        let len = CK_ULONG::try_from(copy.len())?;
        if copy.is_empty() {
            return Ok((ptr::null_mut(), 0));
        }
        let p = copy.as_mut_ptr();
        self.secrets.push(copy);
        Ok((p, len))
    }

    fn word(&mut self, value: CK_ULONG) -> *mut CK_ULONG {
        keep(&mut self.words, vec![value])
    }
}

/// A managed input buffer lent to the module; empty maps to `(null, 0)`.
fn input(bytes: &[u8]) -> WResult<(CK_BYTE_PTR, CK_ULONG)> {
    buffer_ptr_len(Some(bytes).filter(|b| !b.is_empty()))
}

#[allow(non_snake_case)]
fn random_data(random: &Ssl3RandomData) -> WResult<CK_SSL3_RANDOM_DATA> {
    let (pClientRandom, ulClientRandomLen) = input(&random.client_random)?;
    let (pServerRandom, ulServerRandomLen) = input(&random.server_random)?;
    Ok(CK_SSL3_RANDOM_DATA {
        pClientRandom,
        ulClientRandomLen,
        pServerRandom,
        ulServerRandomLen,
    })
}

enum Parameter<'a> {
    None,
    /// A buffer lent by the caller or held in the arena.
    Buffer { data: CK_VOID_PTR, len: CK_ULONG },
    Value(NativeValue<'a>),
    /// A native parameter struct.
    Struct { data: Box<dyn Any>, len: CK_ULONG },
}

fn boxed<'a, T: Any>(value: T) -> WResult<Parameter<'a>> {
    Ok(Parameter::Struct {
        len: CK_ULONG::try_from(size_of::<T>())?,
        data: Box::new(value),
    })
}

/// A mechanism marshaled for one native call.
///
/// Everything the `CK_MECHANISM` points to is owned here, or borrowed from
/// the managed mechanism for read-only inputs, and released on drop.
pub struct NativeMechanism<'a> {
    mechanism: CK_MECHANISM_TYPE,
    parameter: Parameter<'a>,
    /// Only holds the memory the parameter points into.
    #[cfg_attr(not(test), allow(dead_code))]
    arena: Arena,
    /// Capacity of the `X` buffer of `CKM_KEY_WRAP_SET_OAEP`.
    oaep_x_len: CK_ULONG,
    borrowed: PhantomData<&'a [u8]>,
}

impl<'a> NativeMechanism<'a> {
    /// Marshal `mechanism`; passwords are encoded with `encoding`.
    ///
    /// Returns [`crate::WrapperError::UnrecognizedValue`] for an `Other` value
    /// with no native encoding.
    #[allow(non_snake_case)]
    pub fn new(mechanism: &'a Mechanism, encoding: CharEncoding) -> WResult<Self> {
        let mut arena = Arena::default();
        let mut oaep_x_len = 0;
        let parameter = match &mechanism.parameters {
            None => Parameter::None,
            Some(MechanismParameters::Bytes(b)) => {
                let (data, len) = input(b)?;
                Parameter::Buffer {
                    data: data.cast(),
                    len,
                }
            }
            Some(MechanismParameters::Long(v)) => Parameter::Buffer {
                data: arena.word(ulong_to_native(*v)).cast(),
                len: CK_ULONG::try_from(size_of::<CK_ULONG>())?,
            },
            Some(
                MechanismParameters::ObjectHandle(v)
                | MechanismParameters::Rc2(v)
                | MechanismParameters::MacGeneral(v)
                | MechanismParameters::Extract(v),
            ) => Parameter::Buffer {
                data: arena.word(*v).cast(),
                len: CK_ULONG::try_from(size_of::<CK_ULONG>())?,
            },
            Some(MechanismParameters::Version(v)) => Parameter::Buffer {
                data: keep(&mut arena.versions, vec![version_to_native(v)]).cast(),
                len: CK_ULONG::try_from(size_of::<CK_VERSION>())?,
            },
            Some(MechanismParameters::RsaPkcsOaep(p)) => {
                let (pSourceData, ulSourceDataLen) = input(&p.source_data)?;
                boxed(CK_RSA_PKCS_OAEP_PARAMS {
                    hashAlg: p.hash_alg,
                    mgf: p.mgf,
                    source: p.source,
                    pSourceData: pSourceData.cast(),
                    ulSourceDataLen,
                })?
            }
            Some(MechanismParameters::RsaPkcsPss(p)) => boxed(CK_RSA_PKCS_PSS_PARAMS {
                hashAlg: p.hash_alg,
                mgf: p.mgf,
                sLen: p.salt_len,
            })?,
            Some(MechanismParameters::KeaDerive(p)) => {
                let (pRandomA, ulRandomLen) = input(&p.random_a)?;
                let (pRandomB, _) = input(&p.random_b)?;
                let (pPublicData, ulPublicDataLen) = input(&p.public_data)?;
                boxed(CK_KEA_DERIVE_PARAMS {
                    isSender: bool_to_native(p.is_sender),
                    ulRandomLen,
                    pRandomA,
                    pRandomB,
                    ulPublicDataLen,
                    pPublicData,
                })?
            }
            Some(MechanismParameters::Rc2Cbc(p)) => boxed(CK_RC2_CBC_PARAMS {
                ulEffectiveBits: p.effective_bits,
                iv: p.iv,
            })?,
            Some(MechanismParameters::Rc2MacGeneral(p)) => boxed(CK_RC2_MAC_GENERAL_PARAMS {
                ulEffectiveBits: p.effective_bits,
                ulMacLength: p.mac_length,
            })?,
            Some(MechanismParameters::Rc5(p)) => boxed(CK_RC5_PARAMS {
                ulWordsize: p.word_size,
                ulRounds: p.rounds,
            })?,
            Some(MechanismParameters::Rc5Cbc(p)) => {
                let (pIv, ulIvLen) = input(&p.iv)?;
                boxed(CK_RC5_CBC_PARAMS {
                    ulWordsize: p.word_size,
                    ulRounds: p.rounds,
                    pIv,
                    ulIvLen,
                })?
            }
            Some(MechanismParameters::Rc5MacGeneral(p)) => boxed(CK_RC5_MAC_GENERAL_PARAMS {
                ulWordsize: p.word_size,
                ulRounds: p.rounds,
                ulMacLength: p.mac_length,
            })?,
            Some(MechanismParameters::SkipjackPrivateWrap(p)) => {
                let (pPassword, ulPasswordLen) = arena.secret_bytes(&p.password)?;
                let (pPublicData, ulPublicDataLen) = input(&p.public_data)?;
                let (pRandomA, ulRandomLen) = input(&p.random_a)?;
                let (pPrimeP, ulPAndGLen) = input(&p.prime_p)?;
                let (pBaseG, _) = input(&p.base_g)?;
                let (pSubprimeQ, ulQLen) = input(&p.subprime_q)?;
                boxed(CK_SKIPJACK_PRIVATE_WRAP_PARAMS {
                    ulPasswordLen,
                    pPassword,
                    ulPublicDataLen,
                    pPublicData,
                    ulPAndGLen,
                    ulQLen,
                    ulRandomLen,
                    pRandomA,
                    pPrimeP,
                    pBaseG,
                    pSubprimeQ,
                })?
            }
            Some(MechanismParameters::SkipjackRelayx(p)) => {
                let (pOldWrappedX, ulOldWrappedXLen) = input(&p.old_wrapped_x)?;
                let (pOldPassword, ulOldPasswordLen) = arena.secret_bytes(&p.old_password)?;
                let (pOldPublicData, ulOldPublicDataLen) = input(&p.old_public_data)?;
                let (pOldRandomA, ulOldRandomLen) = input(&p.old_random_a)?;
                let (pNewPassword, ulNewPasswordLen) = arena.secret_bytes(&p.new_password)?;
                let (pNewPublicData, ulNewPublicDataLen) = input(&p.new_public_data)?;
                let (pNewRandomA, ulNewRandomLen) = input(&p.new_random_a)?;
                boxed(CK_SKIPJACK_RELAYX_PARAMS {
                    ulOldWrappedXLen,
                    pOldWrappedX,
                    ulOldPasswordLen,
                    pOldPassword,
                    ulOldPublicDataLen,
                    pOldPublicData,
                    ulOldRandomLen,
                    pOldRandomA,
                    ulNewPasswordLen,
                    pNewPassword,
                    ulNewPublicDataLen,
                    pNewPublicData,
                    ulNewRandomLen,
                    pNewRandomA,
                })?
            }
            Some(MechanismParameters::Pbe(p)) => {
                // the module writes the generated IV here
                let mut iv = vec![0_u8; PBE_IV_LEN.max(p.init_vector.len())];
                iv[..p.init_vector.len()].copy_from_slice(&p.init_vector);
                let pInitVector = keep(&mut arena.bytes, iv);
                let (pPassword, ulPasswordLen) = arena.secret(&p.password, encoding)?;
                let (pSalt, ulSaltLen) = input(&p.salt)?;
                boxed(CK_PBE_PARAMS {
                    pInitVector,
                    pPassword,
                    ulPasswordLen,
                    pSalt,
                    ulSaltLen,
                    ulIteration: p.iteration,
                })?
            }
            Some(MechanismParameters::Pkcs5Pbkd2(p)) => {
                let (pSaltSourceData, ulSaltSourceDataLen) = input(&p.salt_source_data)?;
                let (pPrfData, ulPrfDataLen) = input(&p.prf_data)?;
                let (pPassword, password_len) = arena.secret(&p.password, encoding)?;
                boxed(CK_PKCS5_PBKD2_PARAMS {
                    saltSource: p.salt_source,
                    pSaltSourceData: pSaltSourceData.cast(),
                    ulSaltSourceDataLen,
                    iterations: p.iterations,
                    prf: p.prf,
                    pPrfData: pPrfData.cast(),
                    ulPrfDataLen,
                    pPassword,
                    ulPasswordLen: arena.word(password_len),
                })?
            }
            Some(MechanismParameters::KeyWrapSetOaep(p)) => {
                let (pX, ulXLen) = arena.output(&p.x)?;
                oaep_x_len = ulXLen;
                boxed(CK_KEY_WRAP_SET_OAEP_PARAMS {
                    bBC: p.bc,
                    pX,
                    ulXLen,
                })?
            }
            Some(MechanismParameters::KeyDerivationStringData(b)) => {
                let (pData, ulLen) = input(b)?;
                boxed(CK_KEY_DERIVATION_STRING_DATA { pData, ulLen })?
            }
            Some(MechanismParameters::Ssl3MasterKeyDerive(p)) => {
                let pVersion = match &p.version {
                    Some(v) => keep(&mut arena.versions, vec![version_to_native(v)]),
                    None => ptr::null_mut(),
                };
                boxed(CK_SSL3_MASTER_KEY_DERIVE_PARAMS {
                    RandomInfo: random_data(&p.random_info)?,
                    pVersion,
                })?
            }
            Some(MechanismParameters::Ssl3KeyMat(p)) => {
                let iv_len = usize::try_from(p.iv_size_in_bits / 8)?;
                let out = CK_SSL3_KEY_MAT_OUT {
                    pIVClient: arena.zeroed(iv_len),
                    pIVServer: arena.zeroed(iv_len),
                    ..Default::default()
                };
                boxed(CK_SSL3_KEY_MAT_PARAMS {
                    ulMacSizeInBits: p.mac_size_in_bits,
                    ulKeySizeInBits: p.key_size_in_bits,
                    ulIVSizeInBits: p.iv_size_in_bits,
                    bIsExport: bool_to_native(p.is_export),
                    RandomInfo: random_data(&p.random_info)?,
                    pReturnedKeyMaterial: keep(&mut arena.key_material, vec![out]),
                })?
            }
            Some(MechanismParameters::Ecdh1Derive(p)) => {
                let (pSharedData, ulSharedDataLen) = input(&p.shared_data)?;
                let (pPublicData, ulPublicDataLen) = input(&p.public_data)?;
                boxed(CK_ECDH1_DERIVE_PARAMS {
                    kdf: p.kdf,
                    ulSharedDataLen,
                    pSharedData,
                    ulPublicDataLen,
                    pPublicData,
                })?
            }
            Some(MechanismParameters::Ecdh2Derive(p)) => {
                let (pSharedData, ulSharedDataLen) = input(&p.shared_data)?;
                let (pPublicData, ulPublicDataLen) = input(&p.public_data)?;
                let (pPublicData2, ulPublicDataLen2) = input(&p.public_data2)?;
                boxed(CK_ECDH2_DERIVE_PARAMS {
                    kdf: p.kdf,
                    ulSharedDataLen,
                    pSharedData,
                    ulPublicDataLen,
                    pPublicData,
                    ulPrivateDataLen: p.private_data_len,
                    hPrivateData: p.private_data,
                    ulPublicDataLen2,
                    pPublicData2,
                })?
            }
            Some(MechanismParameters::EcmqvDerive(p)) => {
                let (pSharedData, ulSharedDataLen) = input(&p.shared_data)?;
                let (pPublicData, ulPublicDataLen) = input(&p.public_data)?;
                let (pPublicData2, ulPublicDataLen2) = input(&p.public_data2)?;
                boxed(CK_ECMQV_DERIVE_PARAMS {
                    kdf: p.kdf,
                    ulSharedDataLen,
                    pSharedData,
                    ulPublicDataLen,
                    pPublicData,
                    ulPrivateDataLen: p.private_data_len,
                    hPrivateData: p.private_data,
                    ulPublicDataLen2,
                    pPublicData2,
                    publicKey: p.public_key,
                })?
            }
            Some(MechanismParameters::X942Dh1Derive(p)) => {
                let (pOtherInfo, ulOtherInfoLen) = input(&p.other_info)?;
                let (pPublicData, ulPublicDataLen) = input(&p.public_data)?;
                boxed(CK_X9_42_DH1_DERIVE_PARAMS {
                    kdf: p.kdf,
                    ulOtherInfoLen,
                    pOtherInfo,
                    ulPublicDataLen,
                    pPublicData,
                })?
            }
            Some(MechanismParameters::X942Dh2Derive(p)) => {
                let (pOtherInfo, ulOtherInfoLen) = input(&p.other_info)?;
                let (pPublicData, ulPublicDataLen) = input(&p.public_data)?;
                let (pPublicData2, ulPublicDataLen2) = input(&p.public_data2)?;
                boxed(CK_X9_42_DH2_DERIVE_PARAMS {
                    kdf: p.kdf,
                    ulOtherInfoLen,
                    pOtherInfo,
                    ulPublicDataLen,
                    pPublicData,
                    ulPrivateDataLen: p.private_data_len,
                    hPrivateData: p.private_data,
                    ulPublicDataLen2,
                    pPublicData2,
                })?
            }
            Some(MechanismParameters::X942MqvDerive(p)) => {
                let (pOtherInfo, ulOtherInfoLen) = input(&p.other_info)?;
                let (pPublicData, ulPublicDataLen) = input(&p.public_data)?;
                let (pPublicData2, ulPublicDataLen2) = input(&p.public_data2)?;
                boxed(CK_X9_42_MQV_DERIVE_PARAMS {
                    kdf: p.kdf,
                    ulOtherInfoLen,
                    pOtherInfo,
                    ulPublicDataLen,
                    pPublicData,
                    ulPrivateDataLen: p.private_data_len,
                    hPrivateData: p.private_data,
                    ulPublicDataLen2,
                    pPublicData2,
                    publicKey: p.public_key,
                })?
            }
            Some(MechanismParameters::DesCbcEncryptData(p)) => {
                let (pData, length) = input(&p.data)?;
                boxed(CK_DES_CBC_ENCRYPT_DATA_PARAMS {
                    iv: p.iv,
                    pData,
                    length,
                })?
            }
            Some(MechanismParameters::AesCbcEncryptData(p)) => {
                let (pData, length) = input(&p.data)?;
                boxed(CK_AES_CBC_ENCRYPT_DATA_PARAMS {
                    iv: p.iv,
                    pData,
                    length,
                })?
            }
            Some(MechanismParameters::AesGcm(p)) => {
                let (pIv, ulIvLen) = input(&p.iv)?;
                let (pAAD, ulAADLen) = input(&p.aad)?;
                boxed(CK_GCM_PARAMS {
                    pIv,
                    ulIvLen,
                    ulIvBits: p.iv_bits,
                    pAAD,
                    ulAADLen,
                    ulTagBits: p.tag_bits,
                })?
            }
            Some(MechanismParameters::Other(value)) => {
                Parameter::Value(NativeValue::new(value, encoding)?)
            }
        };
        Ok(Self {
            mechanism: mechanism.mechanism,
            parameter,
            arena,
            oaep_x_len,
            borrowed: PhantomData,
        })
    }

    /// The `CK_MECHANISM` to pass to the module. Its pointers stay valid as
    /// long as `self` is alive.
    #[allow(non_snake_case)]
    pub fn as_native(&mut self) -> CK_MECHANISM {
        let (pParameter, ulParameterLen) = match &mut self.parameter {
            Parameter::None => (ptr::null_mut(), 0),
            Parameter::Buffer { data, len } => (*data, *len),
            Parameter::Value(value) => (value.as_mut_ptr(), value.len()),
            Parameter::Struct { data, len } => ((&raw mut **data).cast::<c_void>(), *len),
        };
        CK_MECHANISM {
            mechanism: self.mechanism,
            pParameter,
            ulParameterLen,
        }
    }

    /// The native parameter struct, if it is a `T`.
    fn params<T: Any>(&self) -> Option<&T> {
        match &self.parameter {
            Parameter::Struct { data, .. } => data.downcast_ref::<T>(),
            _ => None,
        }
    }

    /// Read the parameter fields the module writes to, for the mechanisms
    /// that have some. `None` for every other mechanism or parameter shape.
    pub fn copy_back_data(&self) -> WResult<Option<CopyBack>> {
        let data = if is_pbe_with_iv(self.mechanism) {
            let Some(params) = self.params::<CK_PBE_PARAMS>() else {
                return Ok(None);
            };
            // SAFETY: `pInitVector` points to an arena buffer of at least
            // PBE_IV_LEN bytes.
            unsafe { bytes_from_raw(params.pInitVector, PBE_IV_LEN as CK_ULONG)? }
                .map(CopyBackData::InitVector)
        } else if self.mechanism == CKM_KEY_WRAP_SET_OAEP {
            let Some(params) = self.params::<CK_KEY_WRAP_SET_OAEP_PARAMS>() else {
                return Ok(None);
            };
            let len = params.ulXLen.min(self.oaep_x_len);
            // SAFETY: `pX` is null or an arena buffer of `oaep_x_len` bytes.
            let x = unsafe { bytes_from_raw(params.pX, len)? }.unwrap_or_default();
            Some(CopyBackData::KeyWrapSetOaep { bc: params.bBC, x })
        } else if is_master_key_derive(self.mechanism) {
            let Some(params) = self.params::<CK_SSL3_MASTER_KEY_DERIVE_PARAMS>() else {
                return Ok(None);
            };
            // SAFETY: `pVersion` is null or points to an arena version record.
            unsafe { params.pVersion.as_ref() }
                .map(|v| CopyBackData::Version(version_from_native(v)))
        } else if is_key_and_mac_derive(self.mechanism) {
            let Some(params) = self.params::<CK_SSL3_KEY_MAT_PARAMS>() else {
                return Ok(None);
            };
            // SAFETY: `pReturnedKeyMaterial` points to an arena record.
            let Some(out) = (unsafe { params.pReturnedKeyMaterial.as_ref() }) else {
                return Ok(None);
            };
            let iv_len = params.ulIVSizeInBits / 8;
            // SAFETY: both IV pointers are null or arena buffers of `iv_len` bytes.
            let (iv_client, iv_server) = unsafe {
                (
                    bytes_from_raw(out.pIVClient, iv_len)?.unwrap_or_default(),
                    bytes_from_raw(out.pIVServer, iv_len)?.unwrap_or_default(),
                )
            };
            Some(CopyBackData::KeyMaterial(Ssl3KeyMatOut {
                client_mac_secret: out.hClientMacSecret,
                server_mac_secret: out.hServerMacSecret,
                client_key: out.hClientKey,
                server_key: out.hServerKey,
                iv_client,
                iv_server,
            }))
        } else {
            None
        };
        if data.is_some() {
            trace!("copy-back data read for mechanism 0x{:X}", self.mechanism);
        }
        Ok(data.map(|data| CopyBack {
            mechanism: self.mechanism,
            data,
        }))
    }

    /// Whether the module returns derived keys through the parameter
    /// instead of a key handle.
    #[must_use]
    pub fn returns_key_material(&self) -> bool {
        is_key_and_mac_derive(self.mechanism)
    }

    #[cfg(test)]
    fn arena_buffers(&self) -> usize {
        self.arena.bytes.len() + self.arena.secrets.len()
    }
}

impl std::fmt::Debug for NativeMechanism<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeMechanism")
            .field("mechanism", &format_args!("0x{:X}", self.mechanism))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use cosmian_pkcs11_sys::{
        CK_BBOOL, CKD_SHA1_KDF, CKG_MGF1_SHA256, CKM_AES_CBC_ENCRYPT_DATA, CKM_AES_GCM,
        CKM_CONCATENATE_BASE_AND_KEY, CKM_DES_CBC_ENCRYPT_DATA, CKM_ECDH1_COFACTOR_DERIVE,
        CKM_ECDH1_DERIVE, CKM_ECMQV_DERIVE, CKM_EXTRACT_KEY_FROM_KEY, CKM_KEA_KEY_DERIVE,
        CKM_PBE_MD5_DES_CBC, CKM_PKCS5_PBKD2, CKM_RC2_CBC, CKM_RC2_ECB, CKM_RC2_MAC_GENERAL,
        CKM_RC5_CBC, CKM_RC5_ECB, CKM_RC5_MAC_GENERAL, CKM_RSA_PKCS_OAEP, CKM_RSA_PKCS_PSS,
        CKM_SHA_1_HMAC_GENERAL, CKM_SHA256, CKM_SKIPJACK_PRIVATE_WRAP, CKM_SKIPJACK_RELAYX,
        CKM_SSL3_KEY_AND_MAC_DERIVE, CKM_SSL3_MASTER_KEY_DERIVE, CKM_TLS_MASTER_KEY_DERIVE,
        CKM_X9_42_DH_DERIVE, CKM_X9_42_DH_HYBRID_DERIVE, CKM_X9_42_MQV_DERIVE,
        CKM_XOR_BASE_AND_DATA, CKZ_DATA_SPECIFIED,
    };

    use super::*;
    use crate::{
        WrapperError,
        attribute::Value,
        convert::Version,
        mechanism::{copy_back, params::*},
    };

    /// The native parameter struct of `m`, read back as a `T`.
    fn native_struct<T: Copy>(native: &mut NativeMechanism<'_>) -> T {
        let ck = native.as_native();
        assert_eq!(ck.ulParameterLen as usize, size_of::<T>());
        // SAFETY: the length matches and the struct is owned by `native`.
        unsafe { *ck.pParameter.cast::<T>() }
    }

    unsafe fn bytes(p: CK_BYTE_PTR, len: CK_ULONG) -> Vec<u8> {
        // SAFETY: guaranteed by the caller.
        unsafe { bytes_from_raw(p, len) }.unwrap().unwrap_or_default()
    }

    #[test]
    fn no_parameter_is_null() {
        let m = Mechanism::new(CKM_SHA256);
        let mut native = NativeMechanism::new(&m, CharEncoding::Utf8).unwrap();
        let ck = native.as_native();
        assert_eq!(ck.mechanism, CKM_SHA256);
        assert!(ck.pParameter.is_null());
        assert_eq!(ck.ulParameterLen, 0);
        assert!(native.copy_back_data().unwrap().is_none());
    }

    #[test]
    fn scalar_parameters() {
        let m = Mechanism::with_parameters(
            CKM_EXTRACT_KEY_FROM_KEY,
            MechanismParameters::Extract(17),
        );
        let mut native = NativeMechanism::new(&m, CharEncoding::Utf8).unwrap();
        assert_eq!(native_struct::<CK_ULONG>(&mut native), 17);

        for (mechanism, parameters, word) in [
            (
                CKM_CONCATENATE_BASE_AND_KEY,
                MechanismParameters::ObjectHandle(33),
                33,
            ),
            (CKM_RC2_ECB, MechanismParameters::Rc2(40), 40),
            (CKM_SHA_1_HMAC_GENERAL, MechanismParameters::MacGeneral(10), 10),
        ] {
            let m = Mechanism::with_parameters(mechanism, parameters);
            let mut native = NativeMechanism::new(&m, CharEncoding::Utf8).unwrap();
            assert_eq!(native_struct::<CK_ULONG>(&mut native), word);
            assert!(native.copy_back_data().unwrap().is_none());
        }

        let m = Mechanism::with_parameters(CKM_RC2_CBC, MechanismParameters::Long(-1));
        let mut native = NativeMechanism::new(&m, CharEncoding::Utf8).unwrap();
        assert_eq!(native_struct::<CK_ULONG>(&mut native), CK_ULONG::MAX);

        let m = Mechanism::with_parameters(
            CKM_TLS_MASTER_KEY_DERIVE,
            MechanismParameters::Version(Version::new(3, 1)),
        );
        let mut native = NativeMechanism::new(&m, CharEncoding::Utf8).unwrap();
        assert_eq!(
            native_struct::<CK_VERSION>(&mut native),
            CK_VERSION { major: 3, minor: 1 }
        );

        let data = vec![1_u8, 2, 3];
        let m = Mechanism::with_parameters(
            CKM_CONCATENATE_BASE_AND_KEY,
            MechanismParameters::Bytes(data.clone()),
        );
        let mut native = NativeMechanism::new(&m, CharEncoding::Utf8).unwrap();
        let ck = native.as_native();
        assert_eq!(ck.ulParameterLen, 3);
        // SAFETY: the buffer is borrowed from `m`.
        assert_eq!(unsafe { bytes(ck.pParameter.cast(), 3) }, data);
    }

    #[test]
    fn rsa_parameters() {
        let m = Mechanism::with_parameters(
            CKM_RSA_PKCS_OAEP,
            MechanismParameters::RsaPkcsOaep(RsaPkcsOaepParams {
                hash_alg: CKM_SHA256,
                mgf: CKG_MGF1_SHA256,
                source: 1,
                source_data: b"label".to_vec(),
            }),
        );
        let mut native = NativeMechanism::new(&m, CharEncoding::Utf8).unwrap();
        let p = native_struct::<CK_RSA_PKCS_OAEP_PARAMS>(&mut native);
        assert_eq!((p.hashAlg, p.mgf, p.ulSourceDataLen), (CKM_SHA256, CKG_MGF1_SHA256, 5));

        let m = Mechanism::with_parameters(
            CKM_RSA_PKCS_PSS,
            MechanismParameters::RsaPkcsPss(RsaPkcsPssParams {
                hash_alg: CKM_SHA256,
                mgf: CKG_MGF1_SHA256,
                salt_len: 32,
            }),
        );
        let mut native = NativeMechanism::new(&m, CharEncoding::Utf8).unwrap();
        assert_eq!(native_struct::<CK_RSA_PKCS_PSS_PARAMS>(&mut native).sLen, 32);
    }

    #[test]
    fn key_agreement_parameters() {
        let m = Mechanism::with_parameters(
            CKM_KEA_KEY_DERIVE,
            MechanismParameters::KeaDerive(KeaDeriveParams {
                is_sender: true,
                random_a: vec![1; 20],
                random_b: vec![2; 20],
                public_data: vec![3; 128],
            }),
        );
        let mut native = NativeMechanism::new(&m, CharEncoding::Utf8).unwrap();
        let p = native_struct::<CK_KEA_DERIVE_PARAMS>(&mut native);
        assert_eq!(p.isSender, 1 as CK_BBOOL);
        assert_eq!((p.ulRandomLen, p.ulPublicDataLen), (20, 128));

        let m = Mechanism::with_parameters(
            CKM_ECDH1_DERIVE,
            MechanismParameters::Ecdh1Derive(Ecdh1DeriveParams {
                kdf: CKD_SHA1_KDF,
                shared_data: vec![],
                public_data: vec![4; 65],
            }),
        );
        let mut native = NativeMechanism::new(&m, CharEncoding::Utf8).unwrap();
        let p = native_struct::<CK_ECDH1_DERIVE_PARAMS>(&mut native);
        assert_eq!(p.kdf, CKD_SHA1_KDF);
        assert!(p.pSharedData.is_null());
        assert_eq!(p.ulPublicDataLen, 65);

        let m = Mechanism::with_parameters(
            CKM_ECMQV_DERIVE,
            MechanismParameters::EcmqvDerive(EcmqvDeriveParams {
                kdf: CKD_SHA1_KDF,
                shared_data: vec![5; 4],
                public_data: vec![6; 65],
                private_data_len: 32,
                private_data: 11,
                public_data2: vec![7; 65],
                public_key: 12,
            }),
        );
        let mut native = NativeMechanism::new(&m, CharEncoding::Utf8).unwrap();
        let p = native_struct::<CK_ECMQV_DERIVE_PARAMS>(&mut native);
        assert_eq!((p.hPrivateData, p.publicKey, p.ulPublicDataLen2), (11, 12, 65));

        let m = Mechanism::with_parameters(
            CKM_X9_42_DH_HYBRID_DERIVE,
            MechanismParameters::X942Dh2Derive(X942Dh2DeriveParams {
                kdf: CKD_SHA1_KDF,
                other_info: vec![1; 8],
                public_data: vec![2; 128],
                private_data_len: 128,
                private_data: 21,
                public_data2: vec![3; 128],
            }),
        );
        let mut native = NativeMechanism::new(&m, CharEncoding::Utf8).unwrap();
        let p = native_struct::<CK_X9_42_DH2_DERIVE_PARAMS>(&mut native);
        assert_eq!((p.ulOtherInfoLen, p.hPrivateData), (8, 21));

        let m = Mechanism::with_parameters(
            CKM_ECDH1_COFACTOR_DERIVE,
            MechanismParameters::Ecdh2Derive(Ecdh2DeriveParams {
                kdf: CKD_SHA1_KDF,
                shared_data: vec![1; 4],
                public_data: vec![2; 65],
                private_data_len: 32,
                private_data: 31,
                public_data2: vec![3; 33],
            }),
        );
        let mut native = NativeMechanism::new(&m, CharEncoding::Utf8).unwrap();
        let p = native_struct::<CK_ECDH2_DERIVE_PARAMS>(&mut native);
        assert_eq!(
            (p.ulPrivateDataLen, p.hPrivateData, p.ulPublicDataLen2),
            (32, 31, 33)
        );
        // SAFETY: the buffer is borrowed from `m`.
        assert_eq!(unsafe { bytes(p.pPublicData2, p.ulPublicDataLen2) }, vec![3; 33]);

        let m = Mechanism::with_parameters(
            CKM_X9_42_DH_DERIVE,
            MechanismParameters::X942Dh1Derive(X942Dh1DeriveParams {
                kdf: CKD_SHA1_KDF,
                other_info: vec![],
                public_data: vec![4; 96],
            }),
        );
        let mut native = NativeMechanism::new(&m, CharEncoding::Utf8).unwrap();
        let p = native_struct::<CK_X9_42_DH1_DERIVE_PARAMS>(&mut native);
        assert!(p.pOtherInfo.is_null());
        assert_eq!((p.ulOtherInfoLen, p.ulPublicDataLen), (0, 96));

        let m = Mechanism::with_parameters(
            CKM_X9_42_MQV_DERIVE,
            MechanismParameters::X942MqvDerive(X942MqvDeriveParams {
                kdf: CKD_SHA1_KDF,
                other_info: vec![5; 8],
                public_data: vec![6; 128],
                private_data_len: 128,
                private_data: 41,
                public_data2: vec![7; 128],
                public_key: 42,
            }),
        );
        let mut native = NativeMechanism::new(&m, CharEncoding::Utf8).unwrap();
        let p = native_struct::<CK_X9_42_MQV_DERIVE_PARAMS>(&mut native);
        assert_eq!((p.hPrivateData, p.publicKey, p.ulOtherInfoLen), (41, 42, 8));
    }

    #[test]
    fn cipher_parameters() {
        let m = Mechanism::with_parameters(
            CKM_RC2_CBC,
            MechanismParameters::Rc2Cbc(Rc2CbcParams {
                effective_bits: 64,
                iv: [9; 8],
            }),
        );
        let mut native = NativeMechanism::new(&m, CharEncoding::Utf8).unwrap();
        let p = native_struct::<CK_RC2_CBC_PARAMS>(&mut native);
        assert_eq!((p.ulEffectiveBits, p.iv), (64, [9; 8]));

        let m = Mechanism::with_parameters(
            CKM_RC5_CBC,
            MechanismParameters::Rc5Cbc(Rc5CbcParams {
                word_size: 4,
                rounds: 12,
                iv: vec![1; 8],
            }),
        );
        let mut native = NativeMechanism::new(&m, CharEncoding::Utf8).unwrap();
        let p = native_struct::<CK_RC5_CBC_PARAMS>(&mut native);
        assert_eq!((p.ulRounds, p.ulIvLen), (12, 8));

        let m = Mechanism::with_parameters(
            CKM_RC2_MAC_GENERAL,
            MechanismParameters::Rc2MacGeneral(Rc2MacGeneralParams {
                effective_bits: 128,
                mac_length: 4,
            }),
        );
        let mut native = NativeMechanism::new(&m, CharEncoding::Utf8).unwrap();
        let p = native_struct::<CK_RC2_MAC_GENERAL_PARAMS>(&mut native);
        assert_eq!((p.ulEffectiveBits, p.ulMacLength), (128, 4));

        let m = Mechanism::with_parameters(
            CKM_RC5_ECB,
            MechanismParameters::Rc5(Rc5Params {
                word_size: 8,
                rounds: 16,
            }),
        );
        let mut native = NativeMechanism::new(&m, CharEncoding::Utf8).unwrap();
        let p = native_struct::<CK_RC5_PARAMS>(&mut native);
        assert_eq!((p.ulWordsize, p.ulRounds), (8, 16));

        let m = Mechanism::with_parameters(
            CKM_RC5_MAC_GENERAL,
            MechanismParameters::Rc5MacGeneral(Rc5MacGeneralParams {
                word_size: 4,
                rounds: 20,
                mac_length: 6,
            }),
        );
        let mut native = NativeMechanism::new(&m, CharEncoding::Utf8).unwrap();
        let p = native_struct::<CK_RC5_MAC_GENERAL_PARAMS>(&mut native);
        assert_eq!((p.ulWordsize, p.ulRounds, p.ulMacLength), (4, 20, 6));

        let m = Mechanism::with_parameters(
            CKM_AES_GCM,
            MechanismParameters::AesGcm(GcmParams {
                iv: vec![0; 12],
                iv_bits: 96,
                aad: b"header".to_vec(),
                tag_bits: 128,
            }),
        );
        let mut native = NativeMechanism::new(&m, CharEncoding::Utf8).unwrap();
        let p = native_struct::<CK_GCM_PARAMS>(&mut native);
        assert_eq!((p.ulIvLen, p.ulAADLen, p.ulTagBits), (12, 6, 128));

        let m = Mechanism::with_parameters(
            CKM_DES_CBC_ENCRYPT_DATA,
            MechanismParameters::DesCbcEncryptData(DesCbcEncryptDataParams {
                iv: [1; 8],
                data: vec![2; 16],
            }),
        );
        let mut native = NativeMechanism::new(&m, CharEncoding::Utf8).unwrap();
        assert_eq!(native_struct::<CK_DES_CBC_ENCRYPT_DATA_PARAMS>(&mut native).length, 16);

        let m = Mechanism::with_parameters(
            CKM_AES_CBC_ENCRYPT_DATA,
            MechanismParameters::AesCbcEncryptData(AesCbcEncryptDataParams {
                iv: [3; 16],
                data: vec![4; 32],
            }),
        );
        let mut native = NativeMechanism::new(&m, CharEncoding::Utf8).unwrap();
        let p = native_struct::<CK_AES_CBC_ENCRYPT_DATA_PARAMS>(&mut native);
        assert_eq!((p.iv, p.length), ([3; 16], 32));

        let m = Mechanism::with_parameters(
            CKM_XOR_BASE_AND_DATA,
            MechanismParameters::KeyDerivationStringData(vec![5; 10]),
        );
        let mut native = NativeMechanism::new(&m, CharEncoding::Utf8).unwrap();
        assert_eq!(native_struct::<CK_KEY_DERIVATION_STRING_DATA>(&mut native).ulLen, 10);
    }

    #[test]
    fn password_parameters() {
        let m = Mechanism::with_parameters(
            CKM_PBE_MD5_DES_CBC,
            MechanismParameters::Pbe(PbeParams {
                init_vector: vec![],
                password: "pässword".chars().collect(),
                salt: vec![1; 8],
                iteration: 1000,
            }),
        );
        let mut native = NativeMechanism::new(&m, CharEncoding::Utf8).unwrap();
        let p = native_struct::<CK_PBE_PARAMS>(&mut native);
        assert!(!p.pInitVector.is_null());
        assert_eq!((p.ulPasswordLen, p.ulIteration), (9, 1000));
        let mut single = NativeMechanism::new(&m, CharEncoding::SingleByte).unwrap();
        assert_eq!(native_struct::<CK_PBE_PARAMS>(&mut single).ulPasswordLen, 8);
        assert_eq!(single.arena_buffers(), 2);

        let m = Mechanism::with_parameters(
            CKM_PKCS5_PBKD2,
            MechanismParameters::Pkcs5Pbkd2(Pkcs5Pbkd2Params {
                salt_source: CKZ_DATA_SPECIFIED,
                salt_source_data: vec![1; 16],
                iterations: 4096,
                prf: 1,
                prf_data: vec![],
                password: "secret".chars().collect(),
            }),
        );
        let mut native = NativeMechanism::new(&m, CharEncoding::Utf8).unwrap();
        let p = native_struct::<CK_PKCS5_PBKD2_PARAMS>(&mut native);
        assert_eq!(p.iterations, 4096);
        assert!(p.pPrfData.is_null());
        // SAFETY: the length word is owned by `native`.
        assert_eq!(unsafe { *p.ulPasswordLen }, 6);

        let m = Mechanism::with_parameters(
            CKM_SKIPJACK_PRIVATE_WRAP,
            MechanismParameters::SkipjackPrivateWrap(SkipjackPrivateWrapParams {
                password: vec![1; 12],
                public_data: vec![2; 128],
                random_a: vec![3; 20],
                prime_p: vec![4; 128],
                base_g: vec![5; 128],
                subprime_q: vec![6; 20],
            }),
        );
        let mut native = NativeMechanism::new(&m, CharEncoding::Utf8).unwrap();
        let p = native_struct::<CK_SKIPJACK_PRIVATE_WRAP_PARAMS>(&mut native);
        assert_eq!((p.ulPAndGLen, p.ulQLen, p.ulRandomLen), (128, 20, 20));

        let m = Mechanism::with_parameters(
            CKM_SKIPJACK_RELAYX,
            MechanismParameters::SkipjackRelayx(SkipjackRelayxParams {
                old_wrapped_x: vec![1; 32],
                old_password: vec![2; 8],
                old_public_data: vec![3; 128],
                old_random_a: vec![4; 20],
                new_password: vec![5; 10],
                new_public_data: vec![6; 128],
                new_random_a: vec![7; 20],
            }),
        );
        let mut native = NativeMechanism::new(&m, CharEncoding::Utf8).unwrap();
        let p = native_struct::<CK_SKIPJACK_RELAYX_PARAMS>(&mut native);
        assert_eq!((p.ulOldWrappedXLen, p.ulNewPasswordLen), (32, 10));
    }

    #[test]
    fn key_material_buffers() {
        let m = Mechanism::with_parameters(
            CKM_SSL3_KEY_AND_MAC_DERIVE,
            MechanismParameters::Ssl3KeyMat(Ssl3KeyMatParams {
                mac_size_in_bits: 160,
                key_size_in_bits: 128,
                iv_size_in_bits: 64,
                is_export: false,
                random_info: Ssl3RandomData {
                    client_random: vec![1; 32],
                    server_random: vec![2; 32],
                },
                returned_key_material: Ssl3KeyMatOut::default(),
            }),
        );
        let mut native = NativeMechanism::new(&m, CharEncoding::Utf8).unwrap();
        assert!(native.returns_key_material());
        let p = native_struct::<CK_SSL3_KEY_MAT_PARAMS>(&mut native);
        assert_eq!(p.RandomInfo.ulClientRandomLen, 32);
        // SAFETY: the output record and its IV buffers are owned by `native`.
        unsafe {
            let out = &mut *p.pReturnedKeyMaterial;
            out.hClientKey = 41;
            out.hServerKey = 42;
            ptr::write_bytes(out.pIVClient, 0xAA, 8);
            ptr::write_bytes(out.pIVServer, 0xBB, 8);
        }
        let copy = native.copy_back_data().unwrap().unwrap();
        let CopyBackData::KeyMaterial(out) = copy.data else {
            panic!("unexpected copy-back data");
        };
        assert_eq!((out.client_key, out.server_key), (41, 42));
        assert_eq!(out.iv_client, vec![0xAA; 8]);
        assert_eq!(out.iv_server, vec![0xBB; 8]);
    }

    #[test]
    fn key_wrap_set_oaep_reads_back_x() {
        let mut m = Mechanism::with_parameters(
            CKM_KEY_WRAP_SET_OAEP,
            MechanismParameters::KeyWrapSetOaep(KeyWrapSetOaepParams {
                bc: 0,
                x: vec![0; 4],
            }),
        );
        let copy = {
            let mut native = NativeMechanism::new(&m, CharEncoding::Utf8).unwrap();
            let ck = native.as_native();
            assert_eq!(
                ck.ulParameterLen as usize,
                size_of::<CK_KEY_WRAP_SET_OAEP_PARAMS>()
            );
            // SAFETY: the struct and its `X` buffer of 4 bytes are owned by `native`.
            unsafe {
                let p = &mut *ck.pParameter.cast::<CK_KEY_WRAP_SET_OAEP_PARAMS>();
                assert_eq!(p.ulXLen, 4);
                p.bBC = 0x42;
                ptr::copy_nonoverlapping([1_u8, 2].as_ptr(), p.pX, 2);
                p.ulXLen = 2;
            }
            native.copy_back_data().unwrap().unwrap()
        };
        assert_eq!(
            copy.data,
            CopyBackData::KeyWrapSetOaep {
                bc: 0x42,
                x: vec![1, 2]
            }
        );
        assert!(copy_back(&copy, &mut m));
        assert_eq!(
            m.parameters,
            Some(MechanismParameters::KeyWrapSetOaep(KeyWrapSetOaepParams {
                bc: 0x42,
                x: vec![1, 2],
            }))
        );

        // a length past the buffer is clamped to its capacity
        let mut native = NativeMechanism::new(&m, CharEncoding::Utf8).unwrap();
        let ck = native.as_native();
        // SAFETY: the struct is owned by `native`.
        unsafe { (*ck.pParameter.cast::<CK_KEY_WRAP_SET_OAEP_PARAMS>()).ulXLen = 100 };
        let copy = native.copy_back_data().unwrap().unwrap();
        assert!(matches!(&copy.data, CopyBackData::KeyWrapSetOaep { x, .. } if *x == [1, 2]));
    }

    #[test]
    fn master_key_derive_reads_back_the_version() {
        let random_info = Ssl3RandomData {
            client_random: vec![1; 32],
            server_random: vec![2; 32],
        };
        let mut m = Mechanism::with_parameters(
            CKM_SSL3_MASTER_KEY_DERIVE,
            MechanismParameters::Ssl3MasterKeyDerive(Ssl3MasterKeyDeriveParams {
                random_info: random_info.clone(),
                version: Some(Version::default()),
            }),
        );
        let copy = {
            let mut native = NativeMechanism::new(&m, CharEncoding::Utf8).unwrap();
            let p = native_struct::<CK_SSL3_MASTER_KEY_DERIVE_PARAMS>(&mut native);
            assert_eq!(p.RandomInfo.ulServerRandomLen, 32);
            assert!(!p.pVersion.is_null());
            // SAFETY: the version record is owned by `native`.
            unsafe { *p.pVersion = CK_VERSION { major: 3, minor: 0 } };
            native.copy_back_data().unwrap().unwrap()
        };
        assert_eq!(copy.data, CopyBackData::Version(Version::new(3, 0)));
        assert!(copy_back(&copy, &mut m));
        assert_eq!(
            m.parameters,
            Some(MechanismParameters::Ssl3MasterKeyDerive(
                Ssl3MasterKeyDeriveParams {
                    random_info: random_info.clone(),
                    version: Some(Version::new(3, 0)),
                }
            ))
        );

        // without a version record there is nothing to read back
        let m = Mechanism::with_parameters(
            CKM_TLS_MASTER_KEY_DERIVE,
            MechanismParameters::Ssl3MasterKeyDerive(Ssl3MasterKeyDeriveParams {
                random_info,
                version: None,
            }),
        );
        let mut native = NativeMechanism::new(&m, CharEncoding::Utf8).unwrap();
        assert!(native_struct::<CK_SSL3_MASTER_KEY_DERIVE_PARAMS>(&mut native)
            .pVersion
            .is_null());
        assert!(native.copy_back_data().unwrap().is_none());
    }

    #[test]
    fn other_values() {
        let m = Mechanism::with_parameters(
            CKM_SHA256,
            MechanismParameters::Other(Value::Text("abc".to_owned())),
        );
        let mut native = NativeMechanism::new(&m, CharEncoding::Utf8).unwrap();
        assert_eq!(native.as_native().ulParameterLen, 3);

        for value in [Value::Float(1.5), Value::Template(vec![])] {
            let m = Mechanism::with_parameters(CKM_SHA256, MechanismParameters::Other(value));
            assert!(matches!(
                NativeMechanism::new(&m, CharEncoding::Utf8),
                Err(WrapperError::UnrecognizedValue(_))
            ));
        }
    }
}
