//! Parameter fields written by the module during a call.

use cosmian_pkcs11_sys::{
    CK_MECHANISM_TYPE, CKM_KEY_WRAP_SET_OAEP, CKM_PBE_MD2_DES_CBC, CKM_PBE_MD5_CAST_CBC,
    CKM_PBE_MD5_CAST3_CBC, CKM_PBE_MD5_CAST128_CBC, CKM_PBE_MD5_DES_CBC, CKM_PBE_SHA1_CAST128_CBC,
    CKM_SSL3_KEY_AND_MAC_DERIVE, CKM_SSL3_MASTER_KEY_DERIVE, CKM_TLS_KEY_AND_MAC_DERIVE,
    CKM_TLS_MASTER_KEY_DERIVE,
};
use tracing::{debug, trace};

use super::{Mechanism, MechanismParameters, params::Ssl3KeyMatOut};
use crate::{convert::Version, names::mechanism_label};

/// PBE mechanisms returning an 8-byte initialization vector.
pub(super) const fn is_pbe_with_iv(mechanism: CK_MECHANISM_TYPE) -> bool {
    matches!(
        mechanism,
        CKM_PBE_MD2_DES_CBC
            | CKM_PBE_MD5_DES_CBC
            | CKM_PBE_MD5_CAST_CBC
            | CKM_PBE_MD5_CAST3_CBC
            | CKM_PBE_MD5_CAST128_CBC
            | CKM_PBE_SHA1_CAST128_CBC
    )
}

pub(super) const fn is_master_key_derive(mechanism: CK_MECHANISM_TYPE) -> bool {
    matches!(
        mechanism,
        CKM_SSL3_MASTER_KEY_DERIVE | CKM_TLS_MASTER_KEY_DERIVE
    )
}

pub(super) const fn is_key_and_mac_derive(mechanism: CK_MECHANISM_TYPE) -> bool {
    matches!(
        mechanism,
        CKM_SSL3_KEY_AND_MAC_DERIVE | CKM_TLS_KEY_AND_MAC_DERIVE
    )
}

/// Output fields of a parameter struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyBackData {
    InitVector(Vec<u8>),
    KeyWrapSetOaep { bc: u8, x: Vec<u8> },
    Version(Version),
    KeyMaterial(Ssl3KeyMatOut),
}

/// Output fields read after a call made with `mechanism`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyBack {
    pub mechanism: CK_MECHANISM_TYPE,
    pub data: CopyBackData,
}

/// Write the output fields of a call back into the managed mechanism.
///
/// Nothing happens unless `mechanism` is the one the call was made with and
/// its parameters have the matching variant. Returns whether anything was
/// written.
pub fn copy_back(output: &CopyBack, mechanism: &mut Mechanism) -> bool {
    if output.mechanism != mechanism.mechanism {
        debug!(
            "copy-back skipped: call used {}, target is {}",
            mechanism_label(output.mechanism),
            mechanism_label(mechanism.mechanism)
        );
        return false;
    }
    let m = mechanism.mechanism;
    let written = match (&output.data, mechanism.parameters.as_mut()) {
        (CopyBackData::InitVector(iv), Some(MechanismParameters::Pbe(p))) if is_pbe_with_iv(m) => {
            p.init_vector.clone_from(iv);
            true
        }
        (CopyBackData::KeyWrapSetOaep { bc, x }, Some(MechanismParameters::KeyWrapSetOaep(p)))
            if m == CKM_KEY_WRAP_SET_OAEP =>
        {
            p.bc = *bc;
            p.x.clone_from(x);
            true
        }
        (CopyBackData::Version(v), Some(MechanismParameters::Ssl3MasterKeyDerive(p)))
            if is_master_key_derive(m) =>
        {
            p.version = Some(*v);
            true
        }
        (CopyBackData::KeyMaterial(out), Some(MechanismParameters::Ssl3KeyMat(p)))
            if is_key_and_mac_derive(m) =>
        {
            p.returned_key_material.clone_from(out);
            true
        }
        _ => false,
    };
    trace!("copy-back for {}: {written}", mechanism_label(m));
    written
}
