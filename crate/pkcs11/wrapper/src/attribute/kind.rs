use cosmian_pkcs11_sys::*;

/// Native shape of an attribute value, decided by its type alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum AttributeKind {
    /// A single `CK_ULONG` (classes, key types, sizes, mechanism types).
    Ulong,
    /// A one-byte `CK_BBOOL`.
    Bool,
    /// RFC 2279 text, decoded with the caller's encoding.
    Text,
    /// An 8-byte `CK_DATE`.
    Date,
    /// An array of `CK_MECHANISM_TYPE`.
    MechanismArray,
    /// An array of nested `CK_ATTRIBUTE`.
    TemplateArray,
    /// Anything else: an opaque byte buffer.
    Bytes,
}

impl AttributeKind {
    #[must_use]
    pub const fn of(attribute_type: CK_ATTRIBUTE_TYPE) -> Self {
        match attribute_type {
            CKA_CLASS
            | CKA_CERTIFICATE_TYPE
            | CKA_CERTIFICATE_CATEGORY
            | CKA_JAVA_MIDP_SECURITY_DOMAIN
            | CKA_NAME_HASH_ALGORITHM
            | CKA_KEY_TYPE
            | CKA_MODULUS_BITS
            | CKA_PRIME_BITS
            | CKA_SUBPRIME_BITS
            | CKA_VALUE_BITS
            | CKA_VALUE_LEN
            | CKA_KEY_GEN_MECHANISM
            | CKA_AUTH_PIN_FLAGS
            | CKA_OTP_FORMAT
            | CKA_OTP_LENGTH
            | CKA_OTP_TIME_INTERVAL
            | CKA_OTP_CHALLENGE_REQUIREMENT
            | CKA_OTP_TIME_REQUIREMENT
            | CKA_OTP_COUNTER_REQUIREMENT
            | CKA_OTP_PIN_REQUIREMENT
            | CKA_OTP_SERVICE_LOGO_TYPE
            | CKA_HW_FEATURE_TYPE
            | CKA_PIXEL_X
            | CKA_PIXEL_Y
            | CKA_RESOLUTION
            | CKA_CHAR_ROWS
            | CKA_CHAR_COLUMNS
            | CKA_BITS_PER_PIXEL
            | CKA_MECHANISM_TYPE => Self::Ulong,
            CKA_TOKEN
            | CKA_PRIVATE
            | CKA_TRUSTED
            | CKA_SENSITIVE
            | CKA_ENCRYPT
            | CKA_DECRYPT
            | CKA_WRAP
            | CKA_UNWRAP
            | CKA_SIGN
            | CKA_SIGN_RECOVER
            | CKA_VERIFY
            | CKA_VERIFY_RECOVER
            | CKA_DERIVE
            | CKA_EXTRACTABLE
            | CKA_LOCAL
            | CKA_NEVER_EXTRACTABLE
            | CKA_ALWAYS_SENSITIVE
            | CKA_MODIFIABLE
            | CKA_COPYABLE
            | CKA_DESTROYABLE
            | CKA_SECONDARY_AUTH
            | CKA_ALWAYS_AUTHENTICATE
            | CKA_WRAP_WITH_TRUSTED
            | CKA_OTP_USER_FRIENDLY_MODE
            | CKA_RESET_ON_INIT
            | CKA_HAS_RESET
            | CKA_COLOR => Self::Bool,
            CKA_LABEL
            | CKA_APPLICATION
            | CKA_URL
            | CKA_OTP_USER_IDENTIFIER
            | CKA_OTP_SERVICE_IDENTIFIER
            | CKA_CHAR_SETS
            | CKA_ENCODING_METHODS
            | CKA_MIME_TYPES => Self::Text,
            CKA_START_DATE | CKA_END_DATE => Self::Date,
            CKA_ALLOWED_MECHANISMS => Self::MechanismArray,
            CKA_WRAP_TEMPLATE | CKA_UNWRAP_TEMPLATE | CKA_DERIVE_TEMPLATE => Self::TemplateArray,
            _ => Self::Bytes,
        }
    }
}
