//! Mechanisms and their parameters.
//!
//! [`NativeMechanism`] marshals a [`Mechanism`] into a `CK_MECHANISM` and
//! owns every native struct and buffer the module is given. Parameters the
//! module writes to are read back with [`NativeMechanism::copy_back_data`]
//! and applied to the managed mechanism with [`copy_back`] once the native
//! value is released.

use std::fmt;

use cosmian_pkcs11_sys::{CK_MECHANISM_TYPE, CK_OBJECT_HANDLE, CK_ULONG};

use crate::{attribute::Value, convert::Version, names::mechanism_label};

mod copy_back;
mod native;
mod params;

pub use copy_back::{CopyBack, CopyBackData, copy_back};
pub use native::NativeMechanism;
pub use params::*;

/// Parameter of a mechanism, one variant per native parameter struct.
#[derive(Debug, Clone, PartialEq, strum_macros::IntoStaticStr)]
pub enum MechanismParameters {
    Bytes(Vec<u8>),
    Long(i64),
    ObjectHandle(CK_OBJECT_HANDLE),
    Version(Version),
    RsaPkcsOaep(RsaPkcsOaepParams),
    RsaPkcsPss(RsaPkcsPssParams),
    KeaDerive(KeaDeriveParams),
    /// Effective bits of `CKM_RC2_ECB` and `CKM_RC2_MAC`.
    Rc2(CK_ULONG),
    Rc2Cbc(Rc2CbcParams),
    Rc2MacGeneral(Rc2MacGeneralParams),
    Rc5(Rc5Params),
    Rc5Cbc(Rc5CbcParams),
    Rc5MacGeneral(Rc5MacGeneralParams),
    /// MAC length of the `*_MAC_GENERAL` mechanisms.
    MacGeneral(CK_ULONG),
    /// Bit index of `CKM_EXTRACT_KEY_FROM_KEY`.
    Extract(CK_ULONG),
    SkipjackPrivateWrap(SkipjackPrivateWrapParams),
    SkipjackRelayx(SkipjackRelayxParams),
    Pbe(PbeParams),
    Pkcs5Pbkd2(Pkcs5Pbkd2Params),
    KeyWrapSetOaep(KeyWrapSetOaepParams),
    KeyDerivationStringData(Vec<u8>),
    Ssl3MasterKeyDerive(Ssl3MasterKeyDeriveParams),
    Ssl3KeyMat(Ssl3KeyMatParams),
    Ecdh1Derive(Ecdh1DeriveParams),
    Ecdh2Derive(Ecdh2DeriveParams),
    EcmqvDerive(EcmqvDeriveParams),
    X942Dh1Derive(X942Dh1DeriveParams),
    X942Dh2Derive(X942Dh2DeriveParams),
    X942MqvDerive(X942MqvDeriveParams),
    DesCbcEncryptData(DesCbcEncryptDataParams),
    AesCbcEncryptData(AesCbcEncryptDataParams),
    AesGcm(GcmParams),
    /// Any other value, marshaled like an attribute value.
    Other(Value),
}

impl MechanismParameters {
    #[must_use]
    pub fn shape(&self) -> &'static str {
        self.into()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Mechanism {
    pub mechanism: CK_MECHANISM_TYPE,
    pub parameters: Option<MechanismParameters>,
}

impl Mechanism {
    #[must_use]
    pub const fn new(mechanism: CK_MECHANISM_TYPE) -> Self {
        Self {
            mechanism,
            parameters: None,
        }
    }

    #[must_use]
    pub const fn with_parameters(
        mechanism: CK_MECHANISM_TYPE,
        parameters: MechanismParameters,
    ) -> Self {
        Self {
            mechanism,
            parameters: Some(parameters),
        }
    }
}

impl fmt::Display for Mechanism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.parameters {
            Some(p) => write!(f, "{} ({})", mechanism_label(self.mechanism), p.shape()),
            None => f.write_str(&mechanism_label(self.mechanism)),
        }
    }
}
