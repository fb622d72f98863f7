// Copyright 2022 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::types::{
    CK_ATTRIBUTE_TYPE, CK_BBOOL, CK_EC_KDF_TYPE, CK_FLAGS, CK_KEY_TYPE, CK_MECHANISM_TYPE,
    CK_NOTIFICATION, CK_OBJECT_CLASS, CK_OBJECT_HANDLE, CK_PKCS5_PBKD2_PSEUDO_RANDOM_FUNCTION_TYPE,
    CK_PKCS5_PBKDF2_SALT_SOURCE_TYPE, CK_RSA_PKCS_MGF_TYPE, CK_RSA_PKCS_OAEP_SOURCE_TYPE, CK_RV,
    CK_STATE, CK_ULONG, CK_USER_TYPE, CK_X9_42_DH_KDF_TYPE,
};

pub const CK_TRUE: CK_BBOOL = 1;
pub const CK_FALSE: CK_BBOOL = 0;
pub const CK_UNAVAILABLE_INFORMATION: CK_ULONG = !0;
pub const CK_EFFECTIVELY_INFINITE: CK_ULONG = 0;
pub const CK_INVALID_HANDLE: CK_OBJECT_HANDLE = 0;

// Flags
pub const CKF_TOKEN_PRESENT: CK_FLAGS = 0x0000_0001;
pub const CKF_REMOVABLE_DEVICE: CK_FLAGS = 0x0000_0002;
pub const CKF_HW_SLOT: CK_FLAGS = 0x0000_0004;
pub const CKF_RNG: CK_FLAGS = 0x0000_0001;
pub const CKF_WRITE_PROTECTED: CK_FLAGS = 0x0000_0002;
pub const CKF_LOGIN_REQUIRED: CK_FLAGS = 0x0000_0004;
pub const CKF_USER_PIN_INITIALIZED: CK_FLAGS = 0x0000_0008;
pub const CKF_TOKEN_INITIALIZED: CK_FLAGS = 0x0000_0400;
pub const CKF_RW_SESSION: CK_FLAGS = 0x0000_0002;
pub const CKF_SERIAL_SESSION: CK_FLAGS = 0x0000_0004;
pub const CKF_LIBRARY_CANT_CREATE_OS_THREADS: CK_FLAGS = 0x0000_0001;
pub const CKF_OS_LOCKING_OK: CK_FLAGS = 0x0000_0002;
pub const CKF_DONT_BLOCK: CK_FLAGS = 0x0000_0001;
pub const CKF_HW: CK_FLAGS = 0x0000_0001;
pub const CKF_ENCRYPT: CK_FLAGS = 0x0000_0100;
pub const CKF_DECRYPT: CK_FLAGS = 0x0000_0200;
pub const CKF_DIGEST: CK_FLAGS = 0x0000_0400;
pub const CKF_SIGN: CK_FLAGS = 0x0000_0800;
pub const CKF_SIGN_RECOVER: CK_FLAGS = 0x0000_1000;
pub const CKF_VERIFY: CK_FLAGS = 0x0000_2000;
pub const CKF_VERIFY_RECOVER: CK_FLAGS = 0x0000_4000;
pub const CKF_GENERATE: CK_FLAGS = 0x0000_8000;
pub const CKF_GENERATE_KEY_PAIR: CK_FLAGS = 0x0001_0000;
pub const CKF_WRAP: CK_FLAGS = 0x0002_0000;
pub const CKF_UNWRAP: CK_FLAGS = 0x0004_0000;
pub const CKF_DERIVE: CK_FLAGS = 0x0008_0000;
pub const CKF_ARRAY_ATTRIBUTE: CK_FLAGS = 0x4000_0000;

// User types, session states, notifications
pub const CKU_SO: CK_USER_TYPE = 0;
pub const CKU_USER: CK_USER_TYPE = 1;
pub const CKU_CONTEXT_SPECIFIC: CK_USER_TYPE = 2;
pub const CKS_RO_PUBLIC_SESSION: CK_STATE = 0;
pub const CKS_RO_USER_FUNCTIONS: CK_STATE = 1;
pub const CKS_RW_PUBLIC_SESSION: CK_STATE = 2;
pub const CKS_RW_USER_FUNCTIONS: CK_STATE = 3;
pub const CKS_RW_SO_FUNCTIONS: CK_STATE = 4;
pub const CKN_SURRENDER: CK_NOTIFICATION = 0;
pub const CKN_OTP_CHANGED: CK_NOTIFICATION = 1;

// Object classes and key types
pub const CKO_DATA: CK_OBJECT_CLASS = 0;
pub const CKO_CERTIFICATE: CK_OBJECT_CLASS = 1;
pub const CKO_PUBLIC_KEY: CK_OBJECT_CLASS = 2;
pub const CKO_PRIVATE_KEY: CK_OBJECT_CLASS = 3;
pub const CKO_SECRET_KEY: CK_OBJECT_CLASS = 4;
pub const CKK_RSA: CK_KEY_TYPE = 0x00;
pub const CKK_DSA: CK_KEY_TYPE = 0x01;
pub const CKK_DH: CK_KEY_TYPE = 0x02;
pub const CKK_EC: CK_KEY_TYPE = 0x03;
pub const CKK_GENERIC_SECRET: CK_KEY_TYPE = 0x10;
pub const CKK_DES3: CK_KEY_TYPE = 0x15;
pub const CKK_AES: CK_KEY_TYPE = 0x1F;

// Attributes
pub const CKA_CLASS: CK_ATTRIBUTE_TYPE = 0x0000;
pub const CKA_TOKEN: CK_ATTRIBUTE_TYPE = 0x0001;
pub const CKA_PRIVATE: CK_ATTRIBUTE_TYPE = 0x0002;
pub const CKA_LABEL: CK_ATTRIBUTE_TYPE = 0x0003;
pub const CKA_APPLICATION: CK_ATTRIBUTE_TYPE = 0x0010;
pub const CKA_VALUE: CK_ATTRIBUTE_TYPE = 0x0011;
pub const CKA_OBJECT_ID: CK_ATTRIBUTE_TYPE = 0x0012;
pub const CKA_CERTIFICATE_TYPE: CK_ATTRIBUTE_TYPE = 0x0080;
pub const CKA_ISSUER: CK_ATTRIBUTE_TYPE = 0x0081;
pub const CKA_SERIAL_NUMBER: CK_ATTRIBUTE_TYPE = 0x0082;
pub const CKA_AC_ISSUER: CK_ATTRIBUTE_TYPE = 0x0083;
pub const CKA_OWNER: CK_ATTRIBUTE_TYPE = 0x0084;
pub const CKA_ATTR_TYPES: CK_ATTRIBUTE_TYPE = 0x0085;
pub const CKA_TRUSTED: CK_ATTRIBUTE_TYPE = 0x0086;
pub const CKA_CERTIFICATE_CATEGORY: CK_ATTRIBUTE_TYPE = 0x0087;
pub const CKA_JAVA_MIDP_SECURITY_DOMAIN: CK_ATTRIBUTE_TYPE = 0x0088;
pub const CKA_URL: CK_ATTRIBUTE_TYPE = 0x0089;
pub const CKA_HASH_OF_SUBJECT_PUBLIC_KEY: CK_ATTRIBUTE_TYPE = 0x008A;
pub const CKA_HASH_OF_ISSUER_PUBLIC_KEY: CK_ATTRIBUTE_TYPE = 0x008B;
pub const CKA_NAME_HASH_ALGORITHM: CK_ATTRIBUTE_TYPE = 0x008C;
pub const CKA_CHECK_VALUE: CK_ATTRIBUTE_TYPE = 0x0090;
pub const CKA_KEY_TYPE: CK_ATTRIBUTE_TYPE = 0x0100;
pub const CKA_SUBJECT: CK_ATTRIBUTE_TYPE = 0x0101;
pub const CKA_ID: CK_ATTRIBUTE_TYPE = 0x0102;
pub const CKA_SENSITIVE: CK_ATTRIBUTE_TYPE = 0x0103;
pub const CKA_ENCRYPT: CK_ATTRIBUTE_TYPE = 0x0104;
pub const CKA_DECRYPT: CK_ATTRIBUTE_TYPE = 0x0105;
pub const CKA_WRAP: CK_ATTRIBUTE_TYPE = 0x0106;
pub const CKA_UNWRAP: CK_ATTRIBUTE_TYPE = 0x0107;
pub const CKA_SIGN: CK_ATTRIBUTE_TYPE = 0x0108;
pub const CKA_SIGN_RECOVER: CK_ATTRIBUTE_TYPE = 0x0109;
pub const CKA_VERIFY: CK_ATTRIBUTE_TYPE = 0x010A;
pub const CKA_VERIFY_RECOVER: CK_ATTRIBUTE_TYPE = 0x010B;
pub const CKA_DERIVE: CK_ATTRIBUTE_TYPE = 0x010C;
pub const CKA_START_DATE: CK_ATTRIBUTE_TYPE = 0x0110;
pub const CKA_END_DATE: CK_ATTRIBUTE_TYPE = 0x0111;
pub const CKA_MODULUS: CK_ATTRIBUTE_TYPE = 0x0120;
pub const CKA_MODULUS_BITS: CK_ATTRIBUTE_TYPE = 0x0121;
pub const CKA_PUBLIC_EXPONENT: CK_ATTRIBUTE_TYPE = 0x0122;
pub const CKA_PRIVATE_EXPONENT: CK_ATTRIBUTE_TYPE = 0x0123;
pub const CKA_PRIME_1: CK_ATTRIBUTE_TYPE = 0x0124;
pub const CKA_PRIME_2: CK_ATTRIBUTE_TYPE = 0x0125;
pub const CKA_EXPONENT_1: CK_ATTRIBUTE_TYPE = 0x0126;
pub const CKA_EXPONENT_2: CK_ATTRIBUTE_TYPE = 0x0127;
pub const CKA_COEFFICIENT: CK_ATTRIBUTE_TYPE = 0x0128;
pub const CKA_PUBLIC_KEY_INFO: CK_ATTRIBUTE_TYPE = 0x0129;
pub const CKA_PRIME: CK_ATTRIBUTE_TYPE = 0x0130;
pub const CKA_SUBPRIME: CK_ATTRIBUTE_TYPE = 0x0131;
pub const CKA_BASE: CK_ATTRIBUTE_TYPE = 0x0132;
pub const CKA_PRIME_BITS: CK_ATTRIBUTE_TYPE = 0x0133;
pub const CKA_SUBPRIME_BITS: CK_ATTRIBUTE_TYPE = 0x0134;
pub const CKA_VALUE_BITS: CK_ATTRIBUTE_TYPE = 0x0160;
pub const CKA_VALUE_LEN: CK_ATTRIBUTE_TYPE = 0x0161;
pub const CKA_EXTRACTABLE: CK_ATTRIBUTE_TYPE = 0x0162;
pub const CKA_LOCAL: CK_ATTRIBUTE_TYPE = 0x0163;
pub const CKA_NEVER_EXTRACTABLE: CK_ATTRIBUTE_TYPE = 0x0164;
pub const CKA_ALWAYS_SENSITIVE: CK_ATTRIBUTE_TYPE = 0x0165;
pub const CKA_KEY_GEN_MECHANISM: CK_ATTRIBUTE_TYPE = 0x0166;
pub const CKA_MODIFIABLE: CK_ATTRIBUTE_TYPE = 0x0170;
pub const CKA_COPYABLE: CK_ATTRIBUTE_TYPE = 0x0171;
pub const CKA_DESTROYABLE: CK_ATTRIBUTE_TYPE = 0x0172;
pub const CKA_EC_PARAMS: CK_ATTRIBUTE_TYPE = 0x0180;
pub const CKA_EC_POINT: CK_ATTRIBUTE_TYPE = 0x0181;
pub const CKA_SECONDARY_AUTH: CK_ATTRIBUTE_TYPE = 0x0200;
pub const CKA_AUTH_PIN_FLAGS: CK_ATTRIBUTE_TYPE = 0x0201;
pub const CKA_ALWAYS_AUTHENTICATE: CK_ATTRIBUTE_TYPE = 0x0202;
pub const CKA_WRAP_WITH_TRUSTED: CK_ATTRIBUTE_TYPE = 0x0210;
pub const CKA_WRAP_TEMPLATE: CK_ATTRIBUTE_TYPE = CKF_ARRAY_ATTRIBUTE | 0x0211;
pub const CKA_UNWRAP_TEMPLATE: CK_ATTRIBUTE_TYPE = CKF_ARRAY_ATTRIBUTE | 0x0212;
pub const CKA_DERIVE_TEMPLATE: CK_ATTRIBUTE_TYPE = CKF_ARRAY_ATTRIBUTE | 0x0213;
pub const CKA_OTP_FORMAT: CK_ATTRIBUTE_TYPE = 0x0220;
pub const CKA_OTP_LENGTH: CK_ATTRIBUTE_TYPE = 0x0221;
pub const CKA_OTP_TIME_INTERVAL: CK_ATTRIBUTE_TYPE = 0x0222;
pub const CKA_OTP_USER_FRIENDLY_MODE: CK_ATTRIBUTE_TYPE = 0x0223;
pub const CKA_OTP_CHALLENGE_REQUIREMENT: CK_ATTRIBUTE_TYPE = 0x0224;
pub const CKA_OTP_TIME_REQUIREMENT: CK_ATTRIBUTE_TYPE = 0x0225;
pub const CKA_OTP_COUNTER_REQUIREMENT: CK_ATTRIBUTE_TYPE = 0x0226;
pub const CKA_OTP_PIN_REQUIREMENT: CK_ATTRIBUTE_TYPE = 0x0227;
pub const CKA_OTP_USER_IDENTIFIER: CK_ATTRIBUTE_TYPE = 0x022A;
pub const CKA_OTP_SERVICE_IDENTIFIER: CK_ATTRIBUTE_TYPE = 0x022B;
pub const CKA_OTP_SERVICE_LOGO_TYPE: CK_ATTRIBUTE_TYPE = 0x022D;
pub const CKA_HW_FEATURE_TYPE: CK_ATTRIBUTE_TYPE = 0x0300;
pub const CKA_RESET_ON_INIT: CK_ATTRIBUTE_TYPE = 0x0301;
pub const CKA_HAS_RESET: CK_ATTRIBUTE_TYPE = 0x0302;
pub const CKA_PIXEL_X: CK_ATTRIBUTE_TYPE = 0x0400;
pub const CKA_PIXEL_Y: CK_ATTRIBUTE_TYPE = 0x0401;
pub const CKA_RESOLUTION: CK_ATTRIBUTE_TYPE = 0x0402;
pub const CKA_CHAR_ROWS: CK_ATTRIBUTE_TYPE = 0x0403;
pub const CKA_CHAR_COLUMNS: CK_ATTRIBUTE_TYPE = 0x0404;
pub const CKA_COLOR: CK_ATTRIBUTE_TYPE = 0x0405;
pub const CKA_BITS_PER_PIXEL: CK_ATTRIBUTE_TYPE = 0x0406;
pub const CKA_CHAR_SETS: CK_ATTRIBUTE_TYPE = 0x0480;
pub const CKA_ENCODING_METHODS: CK_ATTRIBUTE_TYPE = 0x0481;
pub const CKA_MIME_TYPES: CK_ATTRIBUTE_TYPE = 0x0482;
pub const CKA_MECHANISM_TYPE: CK_ATTRIBUTE_TYPE = 0x0500;
pub const CKA_REQUIRED_CMS_ATTRIBUTES: CK_ATTRIBUTE_TYPE = 0x0501;
pub const CKA_DEFAULT_CMS_ATTRIBUTES: CK_ATTRIBUTE_TYPE = 0x0502;
pub const CKA_SUPPORTED_CMS_ATTRIBUTES: CK_ATTRIBUTE_TYPE = 0x0503;
pub const CKA_ALLOWED_MECHANISMS: CK_ATTRIBUTE_TYPE = CKF_ARRAY_ATTRIBUTE | 0x0600;
pub const CKA_VENDOR_DEFINED: CK_ATTRIBUTE_TYPE = 0x8000_0000;

// Mechanisms
pub const CKM_RSA_PKCS_KEY_PAIR_GEN: CK_MECHANISM_TYPE = 0x0000;
pub const CKM_RSA_PKCS: CK_MECHANISM_TYPE = 0x0001;
pub const CKM_RSA_X_509: CK_MECHANISM_TYPE = 0x0003;
pub const CKM_SHA1_RSA_PKCS: CK_MECHANISM_TYPE = 0x0006;
pub const CKM_RSA_PKCS_OAEP: CK_MECHANISM_TYPE = 0x0009;
pub const CKM_RSA_PKCS_PSS: CK_MECHANISM_TYPE = 0x000D;
pub const CKM_SHA1_RSA_PKCS_PSS: CK_MECHANISM_TYPE = 0x000E;
pub const CKM_DH_PKCS_KEY_PAIR_GEN: CK_MECHANISM_TYPE = 0x0020;
pub const CKM_DH_PKCS_DERIVE: CK_MECHANISM_TYPE = 0x0021;
pub const CKM_X9_42_DH_DERIVE: CK_MECHANISM_TYPE = 0x0031;
pub const CKM_X9_42_DH_HYBRID_DERIVE: CK_MECHANISM_TYPE = 0x0032;
pub const CKM_X9_42_MQV_DERIVE: CK_MECHANISM_TYPE = 0x0033;
pub const CKM_SHA256_RSA_PKCS: CK_MECHANISM_TYPE = 0x0040;
pub const CKM_SHA256_RSA_PKCS_PSS: CK_MECHANISM_TYPE = 0x0043;
pub const CKM_RC2_KEY_GEN: CK_MECHANISM_TYPE = 0x0100;
pub const CKM_RC2_ECB: CK_MECHANISM_TYPE = 0x0101;
pub const CKM_RC2_CBC: CK_MECHANISM_TYPE = 0x0102;
pub const CKM_RC2_MAC: CK_MECHANISM_TYPE = 0x0103;
pub const CKM_RC2_MAC_GENERAL: CK_MECHANISM_TYPE = 0x0104;
pub const CKM_RC2_CBC_PAD: CK_MECHANISM_TYPE = 0x0105;
pub const CKM_RC4: CK_MECHANISM_TYPE = 0x0111;
pub const CKM_DES_KEY_GEN: CK_MECHANISM_TYPE = 0x0120;
pub const CKM_DES_ECB: CK_MECHANISM_TYPE = 0x0121;
pub const CKM_DES_CBC: CK_MECHANISM_TYPE = 0x0122;
pub const CKM_DES_MAC: CK_MECHANISM_TYPE = 0x0123;
pub const CKM_DES_MAC_GENERAL: CK_MECHANISM_TYPE = 0x0124;
pub const CKM_DES3_KEY_GEN: CK_MECHANISM_TYPE = 0x0131;
pub const CKM_DES3_ECB: CK_MECHANISM_TYPE = 0x0132;
pub const CKM_DES3_CBC: CK_MECHANISM_TYPE = 0x0133;
pub const CKM_DES3_CBC_PAD: CK_MECHANISM_TYPE = 0x0136;
pub const CKM_MD5: CK_MECHANISM_TYPE = 0x0210;
pub const CKM_SHA_1: CK_MECHANISM_TYPE = 0x0220;
pub const CKM_SHA_1_HMAC: CK_MECHANISM_TYPE = 0x0221;
pub const CKM_SHA_1_HMAC_GENERAL: CK_MECHANISM_TYPE = 0x0222;
pub const CKM_SHA256: CK_MECHANISM_TYPE = 0x0250;
pub const CKM_SHA256_HMAC: CK_MECHANISM_TYPE = 0x0251;
pub const CKM_SHA384: CK_MECHANISM_TYPE = 0x0260;
pub const CKM_SHA512: CK_MECHANISM_TYPE = 0x0270;
pub const CKM_RC5_KEY_GEN: CK_MECHANISM_TYPE = 0x0330;
pub const CKM_RC5_ECB: CK_MECHANISM_TYPE = 0x0331;
pub const CKM_RC5_CBC: CK_MECHANISM_TYPE = 0x0332;
pub const CKM_RC5_MAC: CK_MECHANISM_TYPE = 0x0333;
pub const CKM_RC5_MAC_GENERAL: CK_MECHANISM_TYPE = 0x0334;
pub const CKM_RC5_CBC_PAD: CK_MECHANISM_TYPE = 0x0335;
pub const CKM_GENERIC_SECRET_KEY_GEN: CK_MECHANISM_TYPE = 0x0350;
pub const CKM_CONCATENATE_BASE_AND_KEY: CK_MECHANISM_TYPE = 0x0360;
pub const CKM_CONCATENATE_BASE_AND_DATA: CK_MECHANISM_TYPE = 0x0362;
pub const CKM_CONCATENATE_DATA_AND_BASE: CK_MECHANISM_TYPE = 0x0363;
pub const CKM_XOR_BASE_AND_DATA: CK_MECHANISM_TYPE = 0x0364;
pub const CKM_EXTRACT_KEY_FROM_KEY: CK_MECHANISM_TYPE = 0x0365;
pub const CKM_SSL3_PRE_MASTER_KEY_GEN: CK_MECHANISM_TYPE = 0x0370;
pub const CKM_SSL3_MASTER_KEY_DERIVE: CK_MECHANISM_TYPE = 0x0371;
pub const CKM_SSL3_KEY_AND_MAC_DERIVE: CK_MECHANISM_TYPE = 0x0372;
pub const CKM_SSL3_MASTER_KEY_DERIVE_DH: CK_MECHANISM_TYPE = 0x0373;
pub const CKM_TLS_PRE_MASTER_KEY_GEN: CK_MECHANISM_TYPE = 0x0374;
pub const CKM_TLS_MASTER_KEY_DERIVE: CK_MECHANISM_TYPE = 0x0375;
pub const CKM_TLS_KEY_AND_MAC_DERIVE: CK_MECHANISM_TYPE = 0x0376;
pub const CKM_TLS_MASTER_KEY_DERIVE_DH: CK_MECHANISM_TYPE = 0x0377;
pub const CKM_SSL3_MD5_MAC: CK_MECHANISM_TYPE = 0x0380;
pub const CKM_SSL3_SHA1_MAC: CK_MECHANISM_TYPE = 0x0381;
pub const CKM_PBE_MD2_DES_CBC: CK_MECHANISM_TYPE = 0x03A0;
pub const CKM_PBE_MD5_DES_CBC: CK_MECHANISM_TYPE = 0x03A1;
pub const CKM_PBE_MD5_CAST_CBC: CK_MECHANISM_TYPE = 0x03A2;
pub const CKM_PBE_MD5_CAST3_CBC: CK_MECHANISM_TYPE = 0x03A3;
pub const CKM_PBE_MD5_CAST128_CBC: CK_MECHANISM_TYPE = 0x03A4;
pub const CKM_PBE_SHA1_CAST128_CBC: CK_MECHANISM_TYPE = 0x03A5;
pub const CKM_PBE_SHA1_RC4_128: CK_MECHANISM_TYPE = 0x03A6;
pub const CKM_PBE_SHA1_RC4_40: CK_MECHANISM_TYPE = 0x03A7;
pub const CKM_PBE_SHA1_DES3_EDE_CBC: CK_MECHANISM_TYPE = 0x03A8;
pub const CKM_PBE_SHA1_DES2_EDE_CBC: CK_MECHANISM_TYPE = 0x03A9;
pub const CKM_PBE_SHA1_RC2_128_CBC: CK_MECHANISM_TYPE = 0x03AA;
pub const CKM_PBE_SHA1_RC2_40_CBC: CK_MECHANISM_TYPE = 0x03AB;
pub const CKM_PKCS5_PBKD2: CK_MECHANISM_TYPE = 0x03B0;
pub const CKM_PBA_SHA1_WITH_SHA1_HMAC: CK_MECHANISM_TYPE = 0x03C0;
pub const CKM_KEY_WRAP_LYNKS: CK_MECHANISM_TYPE = 0x0400;
pub const CKM_KEY_WRAP_SET_OAEP: CK_MECHANISM_TYPE = 0x0401;
pub const CKM_SKIPJACK_KEY_GEN: CK_MECHANISM_TYPE = 0x1000;
pub const CKM_SKIPJACK_CBC64: CK_MECHANISM_TYPE = 0x1004;
pub const CKM_SKIPJACK_WRAP: CK_MECHANISM_TYPE = 0x1008;
pub const CKM_SKIPJACK_PRIVATE_WRAP: CK_MECHANISM_TYPE = 0x1009;
pub const CKM_SKIPJACK_RELAYX: CK_MECHANISM_TYPE = 0x100A;
pub const CKM_KEA_KEY_PAIR_GEN: CK_MECHANISM_TYPE = 0x1010;
pub const CKM_KEA_KEY_DERIVE: CK_MECHANISM_TYPE = 0x1011;
pub const CKM_EC_KEY_PAIR_GEN: CK_MECHANISM_TYPE = 0x1040;
pub const CKM_ECDSA: CK_MECHANISM_TYPE = 0x1041;
pub const CKM_ECDSA_SHA1: CK_MECHANISM_TYPE = 0x1042;
pub const CKM_ECDH1_DERIVE: CK_MECHANISM_TYPE = 0x1050;
pub const CKM_ECDH1_COFACTOR_DERIVE: CK_MECHANISM_TYPE = 0x1051;
pub const CKM_ECMQV_DERIVE: CK_MECHANISM_TYPE = 0x1052;
pub const CKM_AES_KEY_GEN: CK_MECHANISM_TYPE = 0x1080;
pub const CKM_AES_ECB: CK_MECHANISM_TYPE = 0x1081;
pub const CKM_AES_CBC: CK_MECHANISM_TYPE = 0x1082;
pub const CKM_AES_MAC: CK_MECHANISM_TYPE = 0x1083;
pub const CKM_AES_MAC_GENERAL: CK_MECHANISM_TYPE = 0x1084;
pub const CKM_AES_CBC_PAD: CK_MECHANISM_TYPE = 0x1085;
pub const CKM_AES_GCM: CK_MECHANISM_TYPE = 0x1087;
pub const CKM_DES_ECB_ENCRYPT_DATA: CK_MECHANISM_TYPE = 0x1100;
pub const CKM_DES_CBC_ENCRYPT_DATA: CK_MECHANISM_TYPE = 0x1101;
pub const CKM_DES3_ECB_ENCRYPT_DATA: CK_MECHANISM_TYPE = 0x1102;
pub const CKM_DES3_CBC_ENCRYPT_DATA: CK_MECHANISM_TYPE = 0x1103;
pub const CKM_AES_ECB_ENCRYPT_DATA: CK_MECHANISM_TYPE = 0x1104;
pub const CKM_AES_CBC_ENCRYPT_DATA: CK_MECHANISM_TYPE = 0x1105;
pub const CKM_VENDOR_DEFINED: CK_MECHANISM_TYPE = 0x8000_0000;

// Mechanism parameter enumerations
pub const CKG_MGF1_SHA1: CK_RSA_PKCS_MGF_TYPE = 0x0001;
pub const CKG_MGF1_SHA256: CK_RSA_PKCS_MGF_TYPE = 0x0002;
pub const CKG_MGF1_SHA384: CK_RSA_PKCS_MGF_TYPE = 0x0003;
pub const CKG_MGF1_SHA512: CK_RSA_PKCS_MGF_TYPE = 0x0004;
pub const CKG_MGF1_SHA224: CK_RSA_PKCS_MGF_TYPE = 0x0005;
pub const CKZ_DATA_SPECIFIED: CK_RSA_PKCS_OAEP_SOURCE_TYPE = 0x0001;
pub const CKZ_SALT_SPECIFIED: CK_PKCS5_PBKDF2_SALT_SOURCE_TYPE = 0x0001;
pub const CKP_PKCS5_PBKD2_HMAC_SHA1: CK_PKCS5_PBKD2_PSEUDO_RANDOM_FUNCTION_TYPE = 0x0001;
pub const CKD_NULL: CK_EC_KDF_TYPE = 0x0001;
pub const CKD_SHA1_KDF: CK_EC_KDF_TYPE = 0x0002;
pub const CKD_SHA1_KDF_ASN1: CK_X9_42_DH_KDF_TYPE = 0x0003;
pub const CKD_SHA1_KDF_CONCATENATE: CK_X9_42_DH_KDF_TYPE = 0x0004;

// Return values
pub const CKR_OK: CK_RV = 0x0000;
pub const CKR_CANCEL: CK_RV = 0x0001;
pub const CKR_HOST_MEMORY: CK_RV = 0x0002;
pub const CKR_SLOT_ID_INVALID: CK_RV = 0x0003;
pub const CKR_GENERAL_ERROR: CK_RV = 0x0005;
pub const CKR_FUNCTION_FAILED: CK_RV = 0x0006;
pub const CKR_ARGUMENTS_BAD: CK_RV = 0x0007;
pub const CKR_NO_EVENT: CK_RV = 0x0008;
pub const CKR_NEED_TO_CREATE_THREADS: CK_RV = 0x0009;
pub const CKR_CANT_LOCK: CK_RV = 0x000A;
pub const CKR_ATTRIBUTE_READ_ONLY: CK_RV = 0x0010;
pub const CKR_ATTRIBUTE_SENSITIVE: CK_RV = 0x0011;
pub const CKR_ATTRIBUTE_TYPE_INVALID: CK_RV = 0x0012;
pub const CKR_ATTRIBUTE_VALUE_INVALID: CK_RV = 0x0013;
pub const CKR_ACTION_PROHIBITED: CK_RV = 0x001B;
pub const CKR_DATA_INVALID: CK_RV = 0x0020;
pub const CKR_DATA_LEN_RANGE: CK_RV = 0x0021;
pub const CKR_DEVICE_ERROR: CK_RV = 0x0030;
pub const CKR_DEVICE_MEMORY: CK_RV = 0x0031;
pub const CKR_DEVICE_REMOVED: CK_RV = 0x0032;
pub const CKR_ENCRYPTED_DATA_INVALID: CK_RV = 0x0040;
pub const CKR_ENCRYPTED_DATA_LEN_RANGE: CK_RV = 0x0041;
pub const CKR_FUNCTION_CANCELED: CK_RV = 0x0050;
pub const CKR_FUNCTION_NOT_PARALLEL: CK_RV = 0x0051;
pub const CKR_FUNCTION_NOT_SUPPORTED: CK_RV = 0x0054;
pub const CKR_KEY_HANDLE_INVALID: CK_RV = 0x0060;
pub const CKR_KEY_SIZE_RANGE: CK_RV = 0x0062;
pub const CKR_KEY_TYPE_INCONSISTENT: CK_RV = 0x0063;
pub const CKR_KEY_NOT_NEEDED: CK_RV = 0x0064;
pub const CKR_KEY_CHANGED: CK_RV = 0x0065;
pub const CKR_KEY_NEEDED: CK_RV = 0x0066;
pub const CKR_KEY_INDIGESTIBLE: CK_RV = 0x0067;
pub const CKR_KEY_FUNCTION_NOT_PERMITTED: CK_RV = 0x0068;
pub const CKR_KEY_NOT_WRAPPABLE: CK_RV = 0x0069;
pub const CKR_KEY_UNEXTRACTABLE: CK_RV = 0x006A;
pub const CKR_MECHANISM_INVALID: CK_RV = 0x0070;
pub const CKR_MECHANISM_PARAM_INVALID: CK_RV = 0x0071;
pub const CKR_OBJECT_HANDLE_INVALID: CK_RV = 0x0082;
pub const CKR_OPERATION_ACTIVE: CK_RV = 0x0090;
pub const CKR_OPERATION_NOT_INITIALIZED: CK_RV = 0x0091;
pub const CKR_PIN_INCORRECT: CK_RV = 0x00A0;
pub const CKR_PIN_INVALID: CK_RV = 0x00A1;
pub const CKR_PIN_LEN_RANGE: CK_RV = 0x00A2;
pub const CKR_PIN_EXPIRED: CK_RV = 0x00A3;
pub const CKR_PIN_LOCKED: CK_RV = 0x00A4;
pub const CKR_SESSION_CLOSED: CK_RV = 0x00B0;
pub const CKR_SESSION_COUNT: CK_RV = 0x00B1;
pub const CKR_SESSION_HANDLE_INVALID: CK_RV = 0x00B3;
pub const CKR_SESSION_PARALLEL_NOT_SUPPORTED: CK_RV = 0x00B4;
pub const CKR_SESSION_READ_ONLY: CK_RV = 0x00B5;
pub const CKR_SESSION_EXISTS: CK_RV = 0x00B6;
pub const CKR_SESSION_READ_ONLY_EXISTS: CK_RV = 0x00B7;
pub const CKR_SESSION_READ_WRITE_SO_EXISTS: CK_RV = 0x00B8;
pub const CKR_SIGNATURE_INVALID: CK_RV = 0x00C0;
pub const CKR_SIGNATURE_LEN_RANGE: CK_RV = 0x00C1;
pub const CKR_TEMPLATE_INCOMPLETE: CK_RV = 0x00D0;
pub const CKR_TEMPLATE_INCONSISTENT: CK_RV = 0x00D1;
pub const CKR_TOKEN_NOT_PRESENT: CK_RV = 0x00E0;
pub const CKR_TOKEN_NOT_RECOGNIZED: CK_RV = 0x00E1;
pub const CKR_TOKEN_WRITE_PROTECTED: CK_RV = 0x00E2;
pub const CKR_UNWRAPPING_KEY_HANDLE_INVALID: CK_RV = 0x00F0;
pub const CKR_UNWRAPPING_KEY_SIZE_RANGE: CK_RV = 0x00F1;
pub const CKR_UNWRAPPING_KEY_TYPE_INCONSISTENT: CK_RV = 0x00F2;
pub const CKR_USER_ALREADY_LOGGED_IN: CK_RV = 0x0100;
pub const CKR_USER_NOT_LOGGED_IN: CK_RV = 0x0101;
pub const CKR_USER_PIN_NOT_INITIALIZED: CK_RV = 0x0102;
pub const CKR_USER_TYPE_INVALID: CK_RV = 0x0103;
pub const CKR_USER_ANOTHER_ALREADY_LOGGED_IN: CK_RV = 0x0104;
pub const CKR_USER_TOO_MANY_TYPES: CK_RV = 0x0105;
pub const CKR_WRAPPED_KEY_INVALID: CK_RV = 0x0110;
pub const CKR_WRAPPED_KEY_LEN_RANGE: CK_RV = 0x0112;
pub const CKR_WRAPPING_KEY_HANDLE_INVALID: CK_RV = 0x0113;
pub const CKR_WRAPPING_KEY_SIZE_RANGE: CK_RV = 0x0114;
pub const CKR_WRAPPING_KEY_TYPE_INCONSISTENT: CK_RV = 0x0115;
pub const CKR_RANDOM_SEED_NOT_SUPPORTED: CK_RV = 0x0120;
pub const CKR_RANDOM_NO_RNG: CK_RV = 0x0121;
pub const CKR_DOMAIN_PARAMS_INVALID: CK_RV = 0x0130;
pub const CKR_CURVE_NOT_SUPPORTED: CK_RV = 0x0140;
pub const CKR_BUFFER_TOO_SMALL: CK_RV = 0x0150;
pub const CKR_SAVED_STATE_INVALID: CK_RV = 0x0160;
pub const CKR_INFORMATION_SENSITIVE: CK_RV = 0x0170;
pub const CKR_STATE_UNSAVEABLE: CK_RV = 0x0180;
pub const CKR_CRYPTOKI_NOT_INITIALIZED: CK_RV = 0x0190;
pub const CKR_CRYPTOKI_ALREADY_INITIALIZED: CK_RV = 0x0191;
pub const CKR_MUTEX_BAD: CK_RV = 0x01A0;
pub const CKR_MUTEX_NOT_LOCKED: CK_RV = 0x01A1;
pub const CKR_NEW_PIN_MODE: CK_RV = 0x01B0;
pub const CKR_NEXT_OTP: CK_RV = 0x01B1;
pub const CKR_EXCEEDED_MAX_ITERATIONS: CK_RV = 0x01B5;
pub const CKR_FIPS_SELF_TEST_FAILED: CK_RV = 0x01B6;
pub const CKR_LIBRARY_LOAD_FAILED: CK_RV = 0x01B7;
pub const CKR_PIN_TOO_WEAK: CK_RV = 0x01B8;
pub const CKR_PUBLIC_KEY_INVALID: CK_RV = 0x01B9;
pub const CKR_FUNCTION_REJECTED: CK_RV = 0x0200;
pub const CKR_VENDOR_DEFINED: CK_RV = 0x8000_0000;
