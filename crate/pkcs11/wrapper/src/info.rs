//! Managed copies of the PKCS#11 information records.

use std::fmt;

use cosmian_pkcs11_sys::{
    CK_FLAGS, CK_INFO, CK_MECHANISM_INFO, CK_SESSION_INFO, CK_SLOT_ID, CK_SLOT_INFO, CK_STATE,
    CK_TOKEN_INFO, CK_ULONG, CKF_RW_SESSION, CKF_TOKEN_PRESENT,
};

use crate::{
    WResult,
    convert::{CharEncoding, Version, padded_text_from_native},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Info {
    pub cryptoki_version: Version,
    pub manufacturer_id: String,
    pub flags: CK_FLAGS,
    pub library_description: String,
    pub library_version: Version,
}

impl Info {
    pub fn from_native(info: &CK_INFO, encoding: CharEncoding) -> WResult<Self> {
        Ok(Self {
            cryptoki_version: info.cryptokiVersion.into(),
            manufacturer_id: padded_text_from_native(&info.manufacturerID, encoding)?,
            flags: info.flags,
            library_description: padded_text_from_native(&info.libraryDescription, encoding)?,
            library_version: info.libraryVersion.into(),
        })
    }
}

impl fmt::Display for Info {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} by {} (Cryptoki {}, flags 0x{:X})",
            self.library_description,
            self.library_version,
            self.manufacturer_id,
            self.cryptoki_version,
            self.flags
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotInfo {
    pub slot_description: String,
    pub manufacturer_id: String,
    pub flags: CK_FLAGS,
    pub hardware_version: Version,
    pub firmware_version: Version,
}

impl SlotInfo {
    pub fn from_native(info: &CK_SLOT_INFO, encoding: CharEncoding) -> WResult<Self> {
        Ok(Self {
            slot_description: padded_text_from_native(&info.slotDescription, encoding)?,
            manufacturer_id: padded_text_from_native(&info.manufacturerID, encoding)?,
            flags: info.flags,
            hardware_version: info.hardwareVersion.into(),
            firmware_version: info.firmwareVersion.into(),
        })
    }

    #[must_use]
    pub const fn token_present(&self) -> bool {
        self.flags & CKF_TOKEN_PRESENT != 0
    }
}

impl fmt::Display for SlotInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, hw {}, fw {}, flags 0x{:X})",
            self.slot_description,
            self.manufacturer_id,
            self.hardware_version,
            self.firmware_version,
            self.flags
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    pub label: String,
    pub manufacturer_id: String,
    pub model: String,
    pub serial_number: String,
    pub flags: CK_FLAGS,
    pub max_session_count: CK_ULONG,
    pub session_count: CK_ULONG,
    pub max_rw_session_count: CK_ULONG,
    pub rw_session_count: CK_ULONG,
    pub max_pin_len: CK_ULONG,
    pub min_pin_len: CK_ULONG,
    pub total_public_memory: CK_ULONG,
    pub free_public_memory: CK_ULONG,
    pub total_private_memory: CK_ULONG,
    pub free_private_memory: CK_ULONG,
    pub hardware_version: Version,
    pub firmware_version: Version,
    /// `YYYYMMDDhhmmssxx`, empty for tokens without a clock.
    pub utc_time: String,
}

impl TokenInfo {
    pub fn from_native(info: &CK_TOKEN_INFO, encoding: CharEncoding) -> WResult<Self> {
        Ok(Self {
            label: padded_text_from_native(&info.label, encoding)?,
            manufacturer_id: padded_text_from_native(&info.manufacturerID, encoding)?,
            model: padded_text_from_native(&info.model, encoding)?,
            serial_number: padded_text_from_native(&info.serialNumber, encoding)?,
            flags: info.flags,
            max_session_count: info.ulMaxSessionCount,
            session_count: info.ulSessionCount,
            max_rw_session_count: info.ulMaxRwSessionCount,
            rw_session_count: info.ulRwSessionCount,
            max_pin_len: info.ulMaxPinLen,
            min_pin_len: info.ulMinPinLen,
            total_public_memory: info.ulTotalPublicMemory,
            free_public_memory: info.ulFreePublicMemory,
            total_private_memory: info.ulTotalPrivateMemory,
            free_private_memory: info.ulFreePrivateMemory,
            hardware_version: info.hardwareVersion.into(),
            firmware_version: info.firmwareVersion.into(),
            utc_time: padded_text_from_native(&info.utcTime, encoding)?,
        })
    }
}

impl fmt::Display for TokenInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} {}, serial {}, flags 0x{:X})",
            self.label, self.manufacturer_id, self.model, self.serial_number, self.flags
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionInfo {
    pub slot_id: CK_SLOT_ID,
    pub state: CK_STATE,
    pub flags: CK_FLAGS,
    pub device_error: CK_ULONG,
}

impl SessionInfo {
    #[must_use]
    pub fn is_read_write(&self) -> bool {
        self.flags & CKF_RW_SESSION != 0
    }
}

impl From<&CK_SESSION_INFO> for SessionInfo {
    fn from(info: &CK_SESSION_INFO) -> Self {
        Self {
            slot_id: info.slotID,
            state: info.state,
            flags: info.flags,
            device_error: info.ulDeviceError,
        }
    }
}

impl fmt::Display for SessionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "slot {} state {} flags 0x{:X}",
            self.slot_id, self.state, self.flags
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MechanismInfo {
    pub min_key_size: CK_ULONG,
    pub max_key_size: CK_ULONG,
    pub flags: CK_FLAGS,
}

impl From<&CK_MECHANISM_INFO> for MechanismInfo {
    fn from(info: &CK_MECHANISM_INFO) -> Self {
        Self {
            min_key_size: info.ulMinKeySize,
            max_key_size: info.ulMaxKeySize,
            flags: info.flags,
        }
    }
}

impl fmt::Display for MechanismInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "key size {}..{} flags 0x{:X}",
            self.min_key_size, self.max_key_size, self.flags
        )
    }
}

#[cfg(test)]
mod tests {
    use cosmian_pkcs11_sys::{CK_VERSION, CKF_HW_SLOT, CKF_REMOVABLE_DEVICE};

    use super::*;

    fn padded<const N: usize>(text: &str) -> [u8; N] {
        let mut out = [b' '; N];
        out[..text.len()].copy_from_slice(text.as_bytes());
        out
    }

    #[test]
    fn padding_is_trimmed() {
        let native = CK_SLOT_INFO {
            slotDescription: padded("Soft slot"),
            manufacturerID: padded("Example"),
            flags: CKF_TOKEN_PRESENT | CKF_HW_SLOT,
            hardwareVersion: CK_VERSION { major: 1, minor: 2 },
            ..Default::default()
        };
        let info = SlotInfo::from_native(&native, CharEncoding::Utf8).unwrap();
        assert_eq!(info.slot_description, "Soft slot");
        assert_eq!(info.manufacturer_id, "Example");
        assert!(info.token_present());
        assert_eq!(info.hardware_version, Version::new(1, 2));
        assert_eq!(info.to_string(), "Soft slot (Example, hw 1.2, fw 0.0, flags 0x5)");

        let removable = SlotInfo::from_native(
            &CK_SLOT_INFO {
                flags: CKF_REMOVABLE_DEVICE,
                ..Default::default()
            },
            CharEncoding::SingleByte,
        )
        .unwrap();
        assert!(!removable.token_present());
        assert!(removable.slot_description.is_empty());
    }

    #[test]
    fn token_info() {
        let native = CK_TOKEN_INFO {
            label: padded("token"),
            serialNumber: padded("0001"),
            ulMaxPinLen: 64,
            ulMinPinLen: 4,
            ..Default::default()
        };
        let info = TokenInfo::from_native(&native, CharEncoding::Utf8).unwrap();
        assert_eq!(info.label, "token");
        assert_eq!(info.serial_number, "0001");
        assert_eq!((info.min_pin_len, info.max_pin_len), (4, 64));
        assert!(info.utc_time.is_empty());
    }
}
