//! Symbolic names of PKCS#11 status codes and mechanisms, for messages and logs.

use cosmian_pkcs11_sys::*;

macro_rules! name_table {
    ($fn_name:ident, $ty:ty, [$($constant:ident),* $(,)?]) => {
        /// Symbolic name of a known code, `None` otherwise.
        #[must_use]
        pub const fn $fn_name(code: $ty) -> Option<&'static str> {
            match code {
                $($constant => Some(stringify!($constant)),)*
                _ => None,
            }
        }
    };
}

name_table!(
    ckr_name,
    CK_RV,
    [
        CKR_OK,
        CKR_CANCEL,
        CKR_HOST_MEMORY,
        CKR_SLOT_ID_INVALID,
        CKR_GENERAL_ERROR,
        CKR_FUNCTION_FAILED,
        CKR_ARGUMENTS_BAD,
        CKR_NO_EVENT,
        CKR_NEED_TO_CREATE_THREADS,
        CKR_CANT_LOCK,
        CKR_ATTRIBUTE_READ_ONLY,
        CKR_ATTRIBUTE_SENSITIVE,
        CKR_ATTRIBUTE_TYPE_INVALID,
        CKR_ATTRIBUTE_VALUE_INVALID,
        CKR_ACTION_PROHIBITED,
        CKR_DATA_INVALID,
        CKR_DATA_LEN_RANGE,
        CKR_DEVICE_ERROR,
        CKR_DEVICE_MEMORY,
        CKR_DEVICE_REMOVED,
        CKR_ENCRYPTED_DATA_INVALID,
        CKR_ENCRYPTED_DATA_LEN_RANGE,
        CKR_FUNCTION_CANCELED,
        CKR_FUNCTION_NOT_PARALLEL,
        CKR_FUNCTION_NOT_SUPPORTED,
        CKR_KEY_HANDLE_INVALID,
        CKR_KEY_SIZE_RANGE,
        CKR_KEY_TYPE_INCONSISTENT,
        CKR_KEY_NOT_NEEDED,
        CKR_KEY_CHANGED,
        CKR_KEY_NEEDED,
        CKR_KEY_INDIGESTIBLE,
        CKR_KEY_FUNCTION_NOT_PERMITTED,
        CKR_KEY_NOT_WRAPPABLE,
        CKR_KEY_UNEXTRACTABLE,
        CKR_MECHANISM_INVALID,
        CKR_MECHANISM_PARAM_INVALID,
        CKR_OBJECT_HANDLE_INVALID,
        CKR_OPERATION_ACTIVE,
        CKR_OPERATION_NOT_INITIALIZED,
        CKR_PIN_INCORRECT,
        CKR_PIN_INVALID,
        CKR_PIN_LEN_RANGE,
        CKR_PIN_EXPIRED,
        CKR_PIN_LOCKED,
        CKR_SESSION_CLOSED,
        CKR_SESSION_COUNT,
        CKR_SESSION_HANDLE_INVALID,
        CKR_SESSION_PARALLEL_NOT_SUPPORTED,
        CKR_SESSION_READ_ONLY,
        CKR_SESSION_EXISTS,
        CKR_SESSION_READ_ONLY_EXISTS,
        CKR_SESSION_READ_WRITE_SO_EXISTS,
        CKR_SIGNATURE_INVALID,
        CKR_SIGNATURE_LEN_RANGE,
        CKR_TEMPLATE_INCOMPLETE,
        CKR_TEMPLATE_INCONSISTENT,
        CKR_TOKEN_NOT_PRESENT,
        CKR_TOKEN_NOT_RECOGNIZED,
        CKR_TOKEN_WRITE_PROTECTED,
        CKR_UNWRAPPING_KEY_HANDLE_INVALID,
        CKR_UNWRAPPING_KEY_SIZE_RANGE,
        CKR_UNWRAPPING_KEY_TYPE_INCONSISTENT,
        CKR_USER_ALREADY_LOGGED_IN,
        CKR_USER_NOT_LOGGED_IN,
        CKR_USER_PIN_NOT_INITIALIZED,
        CKR_USER_TYPE_INVALID,
        CKR_USER_ANOTHER_ALREADY_LOGGED_IN,
        CKR_USER_TOO_MANY_TYPES,
        CKR_WRAPPED_KEY_INVALID,
        CKR_WRAPPED_KEY_LEN_RANGE,
        CKR_WRAPPING_KEY_HANDLE_INVALID,
        CKR_WRAPPING_KEY_SIZE_RANGE,
        CKR_WRAPPING_KEY_TYPE_INCONSISTENT,
        CKR_RANDOM_SEED_NOT_SUPPORTED,
        CKR_RANDOM_NO_RNG,
        CKR_DOMAIN_PARAMS_INVALID,
        CKR_CURVE_NOT_SUPPORTED,
        CKR_BUFFER_TOO_SMALL,
        CKR_SAVED_STATE_INVALID,
        CKR_INFORMATION_SENSITIVE,
        CKR_STATE_UNSAVEABLE,
        CKR_CRYPTOKI_NOT_INITIALIZED,
        CKR_CRYPTOKI_ALREADY_INITIALIZED,
        CKR_MUTEX_BAD,
        CKR_MUTEX_NOT_LOCKED,
        CKR_NEW_PIN_MODE,
        CKR_NEXT_OTP,
        CKR_EXCEEDED_MAX_ITERATIONS,
        CKR_FIPS_SELF_TEST_FAILED,
        CKR_LIBRARY_LOAD_FAILED,
        CKR_PIN_TOO_WEAK,
        CKR_PUBLIC_KEY_INVALID,
        CKR_FUNCTION_REJECTED,
        CKR_VENDOR_DEFINED,
    ]
);

name_table!(
    ckm_name,
    CK_MECHANISM_TYPE,
    [
        CKM_RSA_PKCS_KEY_PAIR_GEN,
        CKM_RSA_PKCS,
        CKM_RSA_X_509,
        CKM_SHA1_RSA_PKCS,
        CKM_RSA_PKCS_OAEP,
        CKM_RSA_PKCS_PSS,
        CKM_SHA1_RSA_PKCS_PSS,
        CKM_DH_PKCS_KEY_PAIR_GEN,
        CKM_DH_PKCS_DERIVE,
        CKM_X9_42_DH_DERIVE,
        CKM_X9_42_DH_HYBRID_DERIVE,
        CKM_X9_42_MQV_DERIVE,
        CKM_SHA256_RSA_PKCS,
        CKM_SHA256_RSA_PKCS_PSS,
        CKM_RC2_KEY_GEN,
        CKM_RC2_ECB,
        CKM_RC2_CBC,
        CKM_RC2_MAC,
        CKM_RC2_MAC_GENERAL,
        CKM_RC2_CBC_PAD,
        CKM_RC4,
        CKM_DES_KEY_GEN,
        CKM_DES_ECB,
        CKM_DES_CBC,
        CKM_DES_MAC,
        CKM_DES_MAC_GENERAL,
        CKM_DES3_KEY_GEN,
        CKM_DES3_ECB,
        CKM_DES3_CBC,
        CKM_DES3_CBC_PAD,
        CKM_MD5,
        CKM_SHA_1,
        CKM_SHA_1_HMAC,
        CKM_SHA_1_HMAC_GENERAL,
        CKM_SHA256,
        CKM_SHA256_HMAC,
        CKM_SHA384,
        CKM_SHA512,
        CKM_RC5_KEY_GEN,
        CKM_RC5_ECB,
        CKM_RC5_CBC,
        CKM_RC5_MAC,
        CKM_RC5_MAC_GENERAL,
        CKM_RC5_CBC_PAD,
        CKM_GENERIC_SECRET_KEY_GEN,
        CKM_CONCATENATE_BASE_AND_KEY,
        CKM_CONCATENATE_BASE_AND_DATA,
        CKM_CONCATENATE_DATA_AND_BASE,
        CKM_XOR_BASE_AND_DATA,
        CKM_EXTRACT_KEY_FROM_KEY,
        CKM_SSL3_PRE_MASTER_KEY_GEN,
        CKM_SSL3_MASTER_KEY_DERIVE,
        CKM_SSL3_KEY_AND_MAC_DERIVE,
        CKM_SSL3_MASTER_KEY_DERIVE_DH,
        CKM_TLS_PRE_MASTER_KEY_GEN,
        CKM_TLS_MASTER_KEY_DERIVE,
        CKM_TLS_KEY_AND_MAC_DERIVE,
        CKM_TLS_MASTER_KEY_DERIVE_DH,
        CKM_SSL3_MD5_MAC,
        CKM_SSL3_SHA1_MAC,
        CKM_PBE_MD2_DES_CBC,
        CKM_PBE_MD5_DES_CBC,
        CKM_PBE_MD5_CAST_CBC,
        CKM_PBE_MD5_CAST3_CBC,
        CKM_PBE_MD5_CAST128_CBC,
        CKM_PBE_SHA1_CAST128_CBC,
        CKM_PBE_SHA1_RC4_128,
        CKM_PBE_SHA1_RC4_40,
        CKM_PBE_SHA1_DES3_EDE_CBC,
        CKM_PBE_SHA1_DES2_EDE_CBC,
        CKM_PBE_SHA1_RC2_128_CBC,
        CKM_PBE_SHA1_RC2_40_CBC,
        CKM_PKCS5_PBKD2,
        CKM_PBA_SHA1_WITH_SHA1_HMAC,
        CKM_KEY_WRAP_LYNKS,
        CKM_KEY_WRAP_SET_OAEP,
        CKM_SKIPJACK_KEY_GEN,
        CKM_SKIPJACK_CBC64,
        CKM_SKIPJACK_WRAP,
        CKM_SKIPJACK_PRIVATE_WRAP,
        CKM_SKIPJACK_RELAYX,
        CKM_KEA_KEY_PAIR_GEN,
        CKM_KEA_KEY_DERIVE,
        CKM_EC_KEY_PAIR_GEN,
        CKM_ECDSA,
        CKM_ECDSA_SHA1,
        CKM_ECDH1_DERIVE,
        CKM_ECDH1_COFACTOR_DERIVE,
        CKM_ECMQV_DERIVE,
        CKM_AES_KEY_GEN,
        CKM_AES_ECB,
        CKM_AES_CBC,
        CKM_AES_MAC,
        CKM_AES_MAC_GENERAL,
        CKM_AES_CBC_PAD,
        CKM_AES_GCM,
        CKM_DES_ECB_ENCRYPT_DATA,
        CKM_DES_CBC_ENCRYPT_DATA,
        CKM_DES3_ECB_ENCRYPT_DATA,
        CKM_DES3_CBC_ENCRYPT_DATA,
        CKM_AES_ECB_ENCRYPT_DATA,
        CKM_AES_CBC_ENCRYPT_DATA,
        CKM_VENDOR_DEFINED,
    ]
);

/// `CKR_*` name of a status code, or its hexadecimal value when unknown.
#[must_use]
pub fn rv_label(code: &CK_RV) -> String {
    ckr_name(*code).map_or_else(|| format!("0x{code:08X}"), ToOwned::to_owned)
}

/// `CKM_*` name of a mechanism, or its hexadecimal value when unknown.
#[must_use]
pub fn mechanism_label(mechanism: CK_MECHANISM_TYPE) -> String {
    ckm_name(mechanism).map_or_else(|| format!("0x{mechanism:08X}"), ToOwned::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_and_unknown_codes() {
        assert_eq!(ckr_name(CKR_BUFFER_TOO_SMALL), Some("CKR_BUFFER_TOO_SMALL"));
        assert_eq!(rv_label(&CKR_OK), "CKR_OK");
        assert_eq!(rv_label(&0x0999), "0x00000999");
        assert_eq!(mechanism_label(CKM_TLS_KEY_AND_MAC_DERIVE), "CKM_TLS_KEY_AND_MAC_DERIVE");
        assert_eq!(ckm_name(0x7FFF_FFFF), None);
    }
}
