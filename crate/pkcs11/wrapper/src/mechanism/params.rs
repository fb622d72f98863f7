//! Managed mechanism parameter records.
//!
//! Lengths of the native structs are derived from the buffers; empty buffers
//! are passed as null pointers.

use cosmian_pkcs11_sys::{
    CK_EC_KDF_TYPE, CK_MECHANISM_TYPE, CK_OBJECT_HANDLE, CK_PKCS5_PBKD2_PSEUDO_RANDOM_FUNCTION_TYPE,
    CK_PKCS5_PBKDF2_SALT_SOURCE_TYPE, CK_RSA_PKCS_MGF_TYPE, CK_RSA_PKCS_OAEP_SOURCE_TYPE, CK_ULONG,
    CK_X9_42_DH_KDF_TYPE,
};

use crate::convert::Version;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPkcsOaepParams {
    pub hash_alg: CK_MECHANISM_TYPE,
    pub mgf: CK_RSA_PKCS_MGF_TYPE,
    pub source: CK_RSA_PKCS_OAEP_SOURCE_TYPE,
    pub source_data: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RsaPkcsPssParams {
    pub hash_alg: CK_MECHANISM_TYPE,
    pub mgf: CK_RSA_PKCS_MGF_TYPE,
    pub salt_len: CK_ULONG,
}

/// `ulRandomLen` is the length of `random_a`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeaDeriveParams {
    pub is_sender: bool,
    pub random_a: Vec<u8>,
    pub random_b: Vec<u8>,
    pub public_data: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rc2CbcParams {
    pub effective_bits: CK_ULONG,
    pub iv: [u8; 8],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rc2MacGeneralParams {
    pub effective_bits: CK_ULONG,
    pub mac_length: CK_ULONG,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rc5Params {
    pub word_size: CK_ULONG,
    pub rounds: CK_ULONG,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rc5CbcParams {
    pub word_size: CK_ULONG,
    pub rounds: CK_ULONG,
    pub iv: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rc5MacGeneralParams {
    pub word_size: CK_ULONG,
    pub rounds: CK_ULONG,
    pub mac_length: CK_ULONG,
}

/// `ulPAndGLen` is the length of `prime_p`, `ulQLen` the length of
/// `subprime_q` and `ulRandomLen` the length of `random_a`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkipjackPrivateWrapParams {
    pub password: Vec<u8>,
    pub public_data: Vec<u8>,
    pub random_a: Vec<u8>,
    pub prime_p: Vec<u8>,
    pub base_g: Vec<u8>,
    pub subprime_q: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkipjackRelayxParams {
    pub old_wrapped_x: Vec<u8>,
    pub old_password: Vec<u8>,
    pub old_public_data: Vec<u8>,
    pub old_random_a: Vec<u8>,
    pub new_password: Vec<u8>,
    pub new_public_data: Vec<u8>,
    pub new_random_a: Vec<u8>,
}

/// Parameters of the `CKM_PBE_*` key generation mechanisms.
///
/// The module writes the generated 8-byte initialization vector back into
/// `init_vector` for the DES and CAST variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PbeParams {
    pub init_vector: Vec<u8>,
    pub password: Vec<char>,
    pub salt: Vec<u8>,
    pub iteration: CK_ULONG,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pkcs5Pbkd2Params {
    pub salt_source: CK_PKCS5_PBKDF2_SALT_SOURCE_TYPE,
    pub salt_source_data: Vec<u8>,
    pub iterations: CK_ULONG,
    pub prf: CK_PKCS5_PBKD2_PSEUDO_RANDOM_FUNCTION_TYPE,
    pub prf_data: Vec<u8>,
    pub password: Vec<char>,
}

/// `bc` and `x` are updated by `C_UnwrapKey`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyWrapSetOaepParams {
    pub bc: u8,
    pub x: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Ssl3RandomData {
    pub client_random: Vec<u8>,
    pub server_random: Vec<u8>,
}

/// `version` receives the client version when present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ssl3MasterKeyDeriveParams {
    pub random_info: Ssl3RandomData,
    pub version: Option<Version>,
}

/// Key material returned by the SSL3 and TLS key-and-MAC derivations.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Ssl3KeyMatOut {
    pub client_mac_secret: CK_OBJECT_HANDLE,
    pub server_mac_secret: CK_OBJECT_HANDLE,
    pub client_key: CK_OBJECT_HANDLE,
    pub server_key: CK_OBJECT_HANDLE,
    pub iv_client: Vec<u8>,
    pub iv_server: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ssl3KeyMatParams {
    pub mac_size_in_bits: CK_ULONG,
    pub key_size_in_bits: CK_ULONG,
    /// Both returned IVs are `iv_size_in_bits / 8` bytes long.
    pub iv_size_in_bits: CK_ULONG,
    pub is_export: bool,
    pub random_info: Ssl3RandomData,
    pub returned_key_material: Ssl3KeyMatOut,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ecdh1DeriveParams {
    pub kdf: CK_EC_KDF_TYPE,
    pub shared_data: Vec<u8>,
    pub public_data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ecdh2DeriveParams {
    pub kdf: CK_EC_KDF_TYPE,
    pub shared_data: Vec<u8>,
    pub public_data: Vec<u8>,
    pub private_data_len: CK_ULONG,
    pub private_data: CK_OBJECT_HANDLE,
    pub public_data2: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EcmqvDeriveParams {
    pub kdf: CK_EC_KDF_TYPE,
    pub shared_data: Vec<u8>,
    pub public_data: Vec<u8>,
    pub private_data_len: CK_ULONG,
    pub private_data: CK_OBJECT_HANDLE,
    pub public_data2: Vec<u8>,
    pub public_key: CK_OBJECT_HANDLE,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct X942Dh1DeriveParams {
    pub kdf: CK_X9_42_DH_KDF_TYPE,
    pub other_info: Vec<u8>,
    pub public_data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct X942Dh2DeriveParams {
    pub kdf: CK_X9_42_DH_KDF_TYPE,
    pub other_info: Vec<u8>,
    pub public_data: Vec<u8>,
    pub private_data_len: CK_ULONG,
    pub private_data: CK_OBJECT_HANDLE,
    pub public_data2: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct X942MqvDeriveParams {
    pub kdf: CK_X9_42_DH_KDF_TYPE,
    pub other_info: Vec<u8>,
    pub public_data: Vec<u8>,
    pub private_data_len: CK_ULONG,
    pub private_data: CK_OBJECT_HANDLE,
    pub public_data2: Vec<u8>,
    pub public_key: CK_OBJECT_HANDLE,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesCbcEncryptDataParams {
    pub iv: [u8; 8],
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AesCbcEncryptDataParams {
    pub iv: [u8; 16],
    pub data: Vec<u8>,
}

/// `ulIvLen` is the length of `iv`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GcmParams {
    pub iv: Vec<u8>,
    pub iv_bits: CK_ULONG,
    pub aad: Vec<u8>,
    pub tag_bits: CK_ULONG,
}
