//! The entry points of a PKCS#11 module, one method per native function.
//!
//! Every method follows the same steps: resolve the connection of the
//! [`ModuleHandle`] ([`WrapperError::Disconnected`] when there is none),
//! resolve the function table entry ([`WrapperError::FunctionNotSupported`]),
//! marshal the arguments into native memory owned by the method, call the
//! module, map a failure status to [`WrapperError::Pkcs11`] and convert the
//! outputs. Native memory is released when the method returns.

use std::{fmt, path::Path, ptr, sync::Arc};

use cosmian_pkcs11_sys::{
    CK_BYTE_PTR, CK_C_INITIALIZE_ARGS, CK_FLAGS, CK_INFO, CK_INVALID_HANDLE, CK_MECHANISM_INFO,
    CK_MECHANISM_TYPE, CK_NOTIFY, CK_OBJECT_HANDLE, CK_RV, CK_SESSION_HANDLE, CK_SESSION_INFO,
    CK_SLOT_ID, CK_SLOT_INFO, CK_TOKEN_INFO, CK_ULONG, CK_ULONG_PTR, CK_USER_TYPE, CK_VOID_PTR,
};
use tracing::{debug, trace};
use zeroize::Zeroizing;

use crate::{
    WResult, WrapperError,
    attribute::{
        Attribute, AttributeReader, NativeTemplate, read_bytes_two_pass, read_bytes_with_guess,
        read_ulongs_two_pass,
    },
    convert::{
        CharEncoding, alloc_bytes, alloc_ulongs, bool_to_native, buffer_ptr_len, str_to_native,
    },
    info::{Info, MechanismInfo, SessionInfo, SlotInfo, TokenInfo},
    init_args::{InitializeArgs, install_handler},
    mechanism::{Mechanism, NativeMechanism, copy_back},
    native_call::{check_rv, entry, native_call},
    registry::{
        connection::{ConnectionRegistry, DynamicLoader, ModuleData, ModuleLoader},
        notify::{
            ApplicationData, ManagedRuntime, NotificationRegistry, Notify, Registration,
            ThreadRuntime, notify_trampoline,
        },
    },
};

/// Size of the first output buffer handed to `C_Sign`.
const SIGN_GUESS_LEN: usize = 512;

/// Width of the blank-padded label of `C_InitToken`.
const TOKEN_LABEL_LEN: usize = 32;

type CryptDataFn = unsafe extern "C" fn(
    CK_SESSION_HANDLE,
    CK_BYTE_PTR,
    CK_ULONG,
    CK_BYTE_PTR,
    CK_ULONG_PTR,
) -> CK_RV;

type CryptFinalFn = unsafe extern "C" fn(CK_SESSION_HANDLE, CK_BYTE_PTR, CK_ULONG_PTR) -> CK_RV;

/// A connection: the module name and the notification callbacks of the
/// sessions opened through it.
///
/// Session handles are only unique within a module, so every connection
/// owns its registry and hands its address to the module as `pApplication`.
#[derive(Debug)]
struct ModuleId {
    name: String,
    notifications: Arc<NotificationRegistry>,
}

/// Identifies a connected module. Handles compare by identity: connecting
/// the same library twice yields two distinct handles.
#[derive(Debug, Clone)]
pub struct ModuleHandle(Arc<ModuleId>);

impl ModuleHandle {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// The notification callbacks of the sessions opened on this module.
    #[must_use]
    pub fn notifications(&self) -> &NotificationRegistry {
        &self.0.notifications
    }
}

impl PartialEq for ModuleHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for ModuleHandle {}

impl fmt::Display for ModuleHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.name)
    }
}

/// An encoded PIN; `None` for the protected authentication path.
fn secret(pin: Option<&str>, encoding: CharEncoding) -> WResult<Option<Zeroizing<Vec<u8>>>> {
    pin.map(|pin| Ok(Zeroizing::new(str_to_native(pin, encoding)?.into_owned())))
        .transpose()
}

fn secret_ptr(pin: &Option<Zeroizing<Vec<u8>>>) -> WResult<(CK_BYTE_PTR, CK_ULONG)> {
    buffer_ptr_len(pin.as_ref().map(|pin| pin.as_slice()))
}

fn transform(
    function: &'static str,
    f: CryptDataFn,
    session: CK_SESSION_HANDLE,
    data: &[u8],
) -> WResult<Vec<u8>> {
    let (data, data_len) = buffer_ptr_len(Some(data))?;
    read_bytes_two_pass(function, |out, out_len| {
        // SAFETY: `data` outlives the call and `out` holds `*out_len` bytes.
        unsafe { f(session, data, data_len, out, out_len) }
    })
}

fn finish(function: &'static str, f: CryptFinalFn, session: CK_SESSION_HANDLE) -> WResult<Vec<u8>> {
    read_bytes_two_pass(function, |out, out_len| {
        // SAFETY: `out` holds `*out_len` bytes.
        unsafe { f(session, out, out_len) }
    })
}

/// Connected modules.
///
/// When a session is opened with a callback, the module is handed the
/// address of the notification registry of its connection: a
/// [`ModuleHandle`] must outlive the sessions opened through it.
pub struct Pkcs11 {
    connections: ConnectionRegistry<ModuleId>,
    loader: Box<dyn ModuleLoader>,
    runtime: Arc<dyn ManagedRuntime>,
}

impl Default for Pkcs11 {
    fn default() -> Self {
        Self::new(Box::new(DynamicLoader), Arc::new(ThreadRuntime))
    }
}

impl fmt::Debug for Pkcs11 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pkcs11")
            .field("connections", &self.connections.len().unwrap_or_default())
            .finish_non_exhaustive()
    }
}

impl Pkcs11 {
    #[must_use]
    pub fn new(loader: Box<dyn ModuleLoader>, runtime: Arc<dyn ManagedRuntime>) -> Self {
        Self {
            connections: ConnectionRegistry::new(),
            loader,
            runtime,
        }
    }

    fn module(&self, handle: &ModuleHandle) -> WResult<Arc<ModuleData>> {
        self.connections
            .get(&handle.0)?
            .ok_or(WrapperError::Disconnected)
    }

    // ---------------------------------------------------------------------
    // connections

    /// Load the module at `path` and resolve its function table.
    pub fn connect(&self, path: impl AsRef<Path>) -> WResult<ModuleHandle> {
        let module = self.loader.load(path.as_ref())?;
        self.connect_module(module)
    }

    /// Register an already loaded module.
    pub fn connect_module(&self, module: ModuleData) -> WResult<ModuleHandle> {
        let handle = ModuleHandle(Arc::new(ModuleId {
            name: module.name().to_owned(),
            notifications: Arc::new(NotificationRegistry::new(self.runtime.clone())),
        }));
        debug!("connected PKCS#11 module {handle}");
        self.connections.put(handle.0.clone(), Arc::new(module))?;
        Ok(handle)
    }

    /// Forget the module; the library is unloaded once no call uses it.
    pub fn disconnect(&self, handle: &ModuleHandle) -> WResult<()> {
        self.connections
            .remove(&handle.0)?
            .ok_or(WrapperError::Disconnected)?;
        debug!("disconnected PKCS#11 module {handle}");
        Ok(())
    }

    /// Forget every module, at process teardown.
    pub fn disconnect_all(&self) -> WResult<()> {
        let removed = self.connections.remove_all()?;
        debug!("disconnected {} PKCS#11 module(s)", removed.len());
        Ok(())
    }

    pub fn is_connected(&self, handle: &ModuleHandle) -> WResult<bool> {
        Ok(self.connections.get(&handle.0)?.is_some())
    }

    // ---------------------------------------------------------------------
    // general purpose

    /// `C_Initialize`. A mutex handler in `args` becomes the target of the
    /// module's locking callbacks until [`Self::finalize`].
    pub fn initialize(&self, handle: &ModuleHandle, args: Option<&InitializeArgs>) -> WResult<()> {
        let module = self.module(handle)?;
        let f = entry!(module, C_Initialize)?;
        let previous = match args.and_then(|a| a.mutex_handler.clone()) {
            Some(handler) => Some(install_handler(Some(handler), self.runtime.clone())?),
            None => None,
        };
        let mut native: Option<CK_C_INITIALIZE_ARGS> = args.map(InitializeArgs::to_native);
        let p_init_args: CK_VOID_PTR = native
            .as_mut()
            .map_or(ptr::null_mut(), |a| (&raw mut *a).cast());
        // SAFETY: `native` outlives the call.
        let rv = unsafe { f(p_init_args) };
        let result = check_rv("C_Initialize", rv);
        if result.is_err() {
            if let Some(previous) = previous {
                install_handler(previous, self.runtime.clone())?;
            }
        }
        result
    }

    pub fn finalize(&self, handle: &ModuleHandle) -> WResult<()> {
        let module = self.module(handle)?;
        native_call!(module, C_Finalize, ptr::null_mut())?;
        install_handler(None, self.runtime.clone())?;
        Ok(())
    }

    pub fn get_info(&self, handle: &ModuleHandle, encoding: CharEncoding) -> WResult<Info> {
        let module = self.module(handle)?;
        let mut info = CK_INFO::default();
        native_call!(module, C_GetInfo, &raw mut info)?;
        Info::from_native(&info, encoding)
    }

    // ---------------------------------------------------------------------
    // slots and tokens

    pub fn get_slot_list(
        &self,
        handle: &ModuleHandle,
        token_present: bool,
    ) -> WResult<Vec<CK_SLOT_ID>> {
        let module = self.module(handle)?;
        let f = entry!(module, C_GetSlotList)?;
        let token_present = bool_to_native(token_present);
        read_ulongs_two_pass("C_GetSlotList", |slots, count| {
            // SAFETY: `slots` is null or holds `*count` words.
            unsafe { f(token_present, slots, count) }
        })
    }

    pub fn get_slot_info(
        &self,
        handle: &ModuleHandle,
        slot: CK_SLOT_ID,
        encoding: CharEncoding,
    ) -> WResult<SlotInfo> {
        let module = self.module(handle)?;
        let mut info = CK_SLOT_INFO::default();
        native_call!(module, C_GetSlotInfo, slot, &raw mut info)?;
        SlotInfo::from_native(&info, encoding)
    }

    pub fn get_token_info(
        &self,
        handle: &ModuleHandle,
        slot: CK_SLOT_ID,
        encoding: CharEncoding,
    ) -> WResult<TokenInfo> {
        let module = self.module(handle)?;
        let mut info = CK_TOKEN_INFO::default();
        native_call!(module, C_GetTokenInfo, slot, &raw mut info)?;
        TokenInfo::from_native(&info, encoding)
    }

    pub fn get_mechanism_list(
        &self,
        handle: &ModuleHandle,
        slot: CK_SLOT_ID,
    ) -> WResult<Vec<CK_MECHANISM_TYPE>> {
        let module = self.module(handle)?;
        let f = entry!(module, C_GetMechanismList)?;
        read_ulongs_two_pass("C_GetMechanismList", |mechanisms, count| {
            // SAFETY: `mechanisms` is null or holds `*count` words.
            unsafe { f(slot, mechanisms, count) }
        })
    }

    pub fn get_mechanism_info(
        &self,
        handle: &ModuleHandle,
        slot: CK_SLOT_ID,
        mechanism: CK_MECHANISM_TYPE,
    ) -> WResult<MechanismInfo> {
        let module = self.module(handle)?;
        let mut info = CK_MECHANISM_INFO::default();
        native_call!(module, C_GetMechanismInfo, slot, mechanism, &raw mut info)?;
        Ok(MechanismInfo::from(&info))
    }

    /// `C_InitToken`. The label is blank padded (or truncated) to 32 bytes.
    pub fn init_token(
        &self,
        handle: &ModuleHandle,
        slot: CK_SLOT_ID,
        so_pin: Option<&str>,
        label: &str,
        encoding: CharEncoding,
    ) -> WResult<()> {
        let module = self.module(handle)?;
        let pin = secret(so_pin, encoding)?;
        let (pin_ptr, pin_len) = secret_ptr(&pin)?;
        let mut padded = [b' '; TOKEN_LABEL_LEN];
        let label = str_to_native(label, encoding)?;
        let n = label.len().min(TOKEN_LABEL_LEN);
        padded[..n].copy_from_slice(&label[..n]);
        native_call!(module, C_InitToken, slot, pin_ptr, pin_len, padded.as_mut_ptr())
    }

    pub fn init_pin(
        &self,
        handle: &ModuleHandle,
        session: CK_SESSION_HANDLE,
        pin: Option<&str>,
        encoding: CharEncoding,
    ) -> WResult<()> {
        let module = self.module(handle)?;
        let pin = secret(pin, encoding)?;
        let (pin_ptr, pin_len) = secret_ptr(&pin)?;
        native_call!(module, C_InitPIN, session, pin_ptr, pin_len)
    }

    pub fn set_pin(
        &self,
        handle: &ModuleHandle,
        session: CK_SESSION_HANDLE,
        old_pin: Option<&str>,
        new_pin: Option<&str>,
        encoding: CharEncoding,
    ) -> WResult<()> {
        let module = self.module(handle)?;
        let old_pin = secret(old_pin, encoding)?;
        let new_pin = secret(new_pin, encoding)?;
        let (old_ptr, old_len) = secret_ptr(&old_pin)?;
        let (new_ptr, new_len) = secret_ptr(&new_pin)?;
        native_call!(module, C_SetPIN, session, old_ptr, old_len, new_ptr, new_len)
    }

    // ---------------------------------------------------------------------
    // sessions

    /// `C_OpenSession`. With a callback, notifications of the new session
    /// are delivered to it together with `application`.
    pub fn open_session(
        &self,
        handle: &ModuleHandle,
        slot: CK_SLOT_ID,
        flags: CK_FLAGS,
        application: Option<ApplicationData>,
        callback: Option<Arc<dyn Notify>>,
    ) -> WResult<CK_SESSION_HANDLE> {
        let module = self.module(handle)?;
        let registration = callback.map(|c| Registration::new(c, application));
        let mut p_application: CK_VOID_PTR = ptr::null_mut();
        let mut notify: CK_NOTIFY = None;
        if registration.is_some() {
            p_application = handle.0.notifications.as_application_ptr();
            notify = Some(notify_trampoline);
        }
        let mut session: CK_SESSION_HANDLE = CK_INVALID_HANDLE;
        native_call!(
            module,
            C_OpenSession,
            slot,
            flags,
            p_application,
            notify,
            &raw mut session
        )?;
        trace!("opened session {session} on slot {slot}");
        handle.notifications().put(session, registration)?;
        Ok(session)
    }

    /// `C_CloseSession`. The notification callback of the session is
    /// released whatever the outcome.
    pub fn close_session(&self, handle: &ModuleHandle, session: CK_SESSION_HANDLE) -> WResult<()> {
        let module = self.module(handle)?;
        let result = native_call!(module, C_CloseSession, session);
        handle.notifications().remove(session)?;
        trace!("closed session {session}");
        result
    }

    /// `C_CloseAllSessions`. Every notification callback registered on this
    /// module is released.
    pub fn close_all_sessions(&self, handle: &ModuleHandle, slot: CK_SLOT_ID) -> WResult<()> {
        let module = self.module(handle)?;
        let result = native_call!(module, C_CloseAllSessions, slot);
        while let Some((session, _)) = handle.notifications().remove_first()? {
            trace!("released notification callback of session {session}");
        }
        result
    }

    pub fn get_session_info(
        &self,
        handle: &ModuleHandle,
        session: CK_SESSION_HANDLE,
    ) -> WResult<SessionInfo> {
        let module = self.module(handle)?;
        let mut info = CK_SESSION_INFO::default();
        native_call!(module, C_GetSessionInfo, session, &raw mut info)?;
        Ok(SessionInfo::from(&info))
    }

    pub fn get_operation_state(
        &self,
        handle: &ModuleHandle,
        session: CK_SESSION_HANDLE,
    ) -> WResult<Vec<u8>> {
        let module = self.module(handle)?;
        let f = entry!(module, C_GetOperationState)?;
        read_bytes_two_pass("C_GetOperationState", |out, out_len| {
            // SAFETY: `out` is null or holds `*out_len` bytes.
            unsafe { f(session, out, out_len) }
        })
    }

    pub fn set_operation_state(
        &self,
        handle: &ModuleHandle,
        session: CK_SESSION_HANDLE,
        state: &[u8],
        encryption_key: CK_OBJECT_HANDLE,
        authentication_key: CK_OBJECT_HANDLE,
    ) -> WResult<()> {
        let module = self.module(handle)?;
        let (state, state_len) = buffer_ptr_len(Some(state))?;
        native_call!(
            module,
            C_SetOperationState,
            session,
            state,
            state_len,
            encryption_key,
            authentication_key
        )
    }

    pub fn login(
        &self,
        handle: &ModuleHandle,
        session: CK_SESSION_HANDLE,
        user_type: CK_USER_TYPE,
        pin: Option<&str>,
        encoding: CharEncoding,
    ) -> WResult<()> {
        let module = self.module(handle)?;
        let pin = secret(pin, encoding)?;
        let (pin_ptr, pin_len) = secret_ptr(&pin)?;
        native_call!(module, C_Login, session, user_type, pin_ptr, pin_len)
    }

    pub fn logout(&self, handle: &ModuleHandle, session: CK_SESSION_HANDLE) -> WResult<()> {
        let module = self.module(handle)?;
        native_call!(module, C_Logout, session)
    }

    // ---------------------------------------------------------------------
    // objects

    pub fn create_object(
        &self,
        handle: &ModuleHandle,
        session: CK_SESSION_HANDLE,
        template: &[Attribute],
        encoding: CharEncoding,
    ) -> WResult<CK_OBJECT_HANDLE> {
        let module = self.module(handle)?;
        let mut template = NativeTemplate::new(template, encoding)?;
        let count = template.count()?;
        let mut object: CK_OBJECT_HANDLE = CK_INVALID_HANDLE;
        native_call!(
            module,
            C_CreateObject,
            session,
            template.as_mut_ptr(),
            count,
            &raw mut object
        )?;
        Ok(object)
    }

    pub fn copy_object(
        &self,
        handle: &ModuleHandle,
        session: CK_SESSION_HANDLE,
        object: CK_OBJECT_HANDLE,
        template: &[Attribute],
        encoding: CharEncoding,
    ) -> WResult<CK_OBJECT_HANDLE> {
        let module = self.module(handle)?;
        let mut template = NativeTemplate::new(template, encoding)?;
        let count = template.count()?;
        let mut new_object: CK_OBJECT_HANDLE = CK_INVALID_HANDLE;
        native_call!(
            module,
            C_CopyObject,
            session,
            object,
            template.as_mut_ptr(),
            count,
            &raw mut new_object
        )?;
        Ok(new_object)
    }

    pub fn destroy_object(
        &self,
        handle: &ModuleHandle,
        session: CK_SESSION_HANDLE,
        object: CK_OBJECT_HANDLE,
    ) -> WResult<()> {
        let module = self.module(handle)?;
        native_call!(module, C_DestroyObject, session, object)
    }

    pub fn get_object_size(
        &self,
        handle: &ModuleHandle,
        session: CK_SESSION_HANDLE,
        object: CK_OBJECT_HANDLE,
    ) -> WResult<CK_ULONG> {
        let module = self.module(handle)?;
        let mut size: CK_ULONG = 0;
        native_call!(module, C_GetObjectSize, session, object, &raw mut size)?;
        Ok(size)
    }

    /// `C_GetAttributeValue` with the size query, fill and nested template
    /// protocol of [`AttributeReader`].
    ///
    /// Attributes the module cannot reveal are set to absent; the first one
    /// is reported as [`WrapperError::AttributeUnavailable`] after every
    /// other attribute has been filled.
    pub fn get_attribute_value(
        &self,
        handle: &ModuleHandle,
        session: CK_SESSION_HANDLE,
        object: CK_OBJECT_HANDLE,
        template: &mut [Attribute],
        encoding: CharEncoding,
    ) -> WResult<()> {
        let module = self.module(handle)?;
        let f = entry!(module, C_GetAttributeValue)?;
        AttributeReader::new(encoding).read(template, |attributes, count| {
            // SAFETY: `attributes` holds `count` entries whose value pointers
            // are null or sized by their length.
            unsafe { f(session, object, attributes, count) }
        })
    }

    pub fn set_attribute_value(
        &self,
        handle: &ModuleHandle,
        session: CK_SESSION_HANDLE,
        object: CK_OBJECT_HANDLE,
        template: &[Attribute],
        encoding: CharEncoding,
    ) -> WResult<()> {
        let module = self.module(handle)?;
        let mut template = NativeTemplate::new(template, encoding)?;
        let count = template.count()?;
        native_call!(
            module,
            C_SetAttributeValue,
            session,
            object,
            template.as_mut_ptr(),
            count
        )
    }

    pub fn find_objects_init(
        &self,
        handle: &ModuleHandle,
        session: CK_SESSION_HANDLE,
        template: &[Attribute],
        encoding: CharEncoding,
    ) -> WResult<()> {
        let module = self.module(handle)?;
        let mut template = NativeTemplate::new(template, encoding)?;
        let count = template.count()?;
        native_call!(module, C_FindObjectsInit, session, template.as_mut_ptr(), count)
    }

    /// At most `max_objects` handles of the active search.
    pub fn find_objects(
        &self,
        handle: &ModuleHandle,
        session: CK_SESSION_HANDLE,
        max_objects: usize,
    ) -> WResult<Vec<CK_OBJECT_HANDLE>> {
        let module = self.module(handle)?;
        let mut objects = alloc_ulongs(max_objects)?;
        let mut count: CK_ULONG = 0;
        native_call!(
            module,
            C_FindObjects,
            session,
            objects.as_mut_ptr(),
            CK_ULONG::try_from(max_objects)?,
            &raw mut count
        )?;
        objects.truncate(usize::try_from(count)?.min(max_objects));
        Ok(objects)
    }

    pub fn find_objects_final(
        &self,
        handle: &ModuleHandle,
        session: CK_SESSION_HANDLE,
    ) -> WResult<()> {
        let module = self.module(handle)?;
        native_call!(module, C_FindObjectsFinal, session)
    }

    // ---------------------------------------------------------------------
    // encryption and decryption

    pub fn encrypt_init(
        &self,
        handle: &ModuleHandle,
        session: CK_SESSION_HANDLE,
        mechanism: &Mechanism,
        key: CK_OBJECT_HANDLE,
    ) -> WResult<()> {
        let module = self.module(handle)?;
        let mut native = NativeMechanism::new(mechanism, CharEncoding::Utf8)?;
        let mut mechanism = native.as_native();
        native_call!(module, C_EncryptInit, session, &raw mut mechanism, key)
    }

    pub fn encrypt(
        &self,
        handle: &ModuleHandle,
        session: CK_SESSION_HANDLE,
        data: &[u8],
    ) -> WResult<Vec<u8>> {
        let module = self.module(handle)?;
        transform("C_Encrypt", entry!(module, C_Encrypt)?, session, data)
    }

    pub fn encrypt_update(
        &self,
        handle: &ModuleHandle,
        session: CK_SESSION_HANDLE,
        part: &[u8],
    ) -> WResult<Vec<u8>> {
        let module = self.module(handle)?;
        transform(
            "C_EncryptUpdate",
            entry!(module, C_EncryptUpdate)?,
            session,
            part,
        )
    }

    pub fn encrypt_final(
        &self,
        handle: &ModuleHandle,
        session: CK_SESSION_HANDLE,
    ) -> WResult<Vec<u8>> {
        let module = self.module(handle)?;
        finish("C_EncryptFinal", entry!(module, C_EncryptFinal)?, session)
    }

    pub fn decrypt_init(
        &self,
        handle: &ModuleHandle,
        session: CK_SESSION_HANDLE,
        mechanism: &Mechanism,
        key: CK_OBJECT_HANDLE,
    ) -> WResult<()> {
        let module = self.module(handle)?;
        let mut native = NativeMechanism::new(mechanism, CharEncoding::Utf8)?;
        let mut mechanism = native.as_native();
        native_call!(module, C_DecryptInit, session, &raw mut mechanism, key)
    }

    pub fn decrypt(
        &self,
        handle: &ModuleHandle,
        session: CK_SESSION_HANDLE,
        encrypted_data: &[u8],
    ) -> WResult<Zeroizing<Vec<u8>>> {
        let module = self.module(handle)?;
        transform(
            "C_Decrypt",
            entry!(module, C_Decrypt)?,
            session,
            encrypted_data,
        )
        .map(Zeroizing::new)
    }

    pub fn decrypt_update(
        &self,
        handle: &ModuleHandle,
        session: CK_SESSION_HANDLE,
        encrypted_part: &[u8],
    ) -> WResult<Zeroizing<Vec<u8>>> {
        let module = self.module(handle)?;
        transform(
            "C_DecryptUpdate",
            entry!(module, C_DecryptUpdate)?,
            session,
            encrypted_part,
        )
        .map(Zeroizing::new)
    }

    pub fn decrypt_final(
        &self,
        handle: &ModuleHandle,
        session: CK_SESSION_HANDLE,
    ) -> WResult<Zeroizing<Vec<u8>>> {
        let module = self.module(handle)?;
        finish("C_DecryptFinal", entry!(module, C_DecryptFinal)?, session).map(Zeroizing::new)
    }

    // ---------------------------------------------------------------------
    // message digesting

    pub fn digest_init(
        &self,
        handle: &ModuleHandle,
        session: CK_SESSION_HANDLE,
        mechanism: &Mechanism,
    ) -> WResult<()> {
        let module = self.module(handle)?;
        let mut native = NativeMechanism::new(mechanism, CharEncoding::Utf8)?;
        let mut mechanism = native.as_native();
        native_call!(module, C_DigestInit, session, &raw mut mechanism)
    }

    pub fn digest(
        &self,
        handle: &ModuleHandle,
        session: CK_SESSION_HANDLE,
        data: &[u8],
    ) -> WResult<Vec<u8>> {
        let module = self.module(handle)?;
        transform("C_Digest", entry!(module, C_Digest)?, session, data)
    }

    pub fn digest_update(
        &self,
        handle: &ModuleHandle,
        session: CK_SESSION_HANDLE,
        part: &[u8],
    ) -> WResult<()> {
        let module = self.module(handle)?;
        let (part, part_len) = buffer_ptr_len(Some(part))?;
        native_call!(module, C_DigestUpdate, session, part, part_len)
    }

    pub fn digest_key(
        &self,
        handle: &ModuleHandle,
        session: CK_SESSION_HANDLE,
        key: CK_OBJECT_HANDLE,
    ) -> WResult<()> {
        let module = self.module(handle)?;
        native_call!(module, C_DigestKey, session, key)
    }

    pub fn digest_final(
        &self,
        handle: &ModuleHandle,
        session: CK_SESSION_HANDLE,
    ) -> WResult<Vec<u8>> {
        let module = self.module(handle)?;
        finish("C_DigestFinal", entry!(module, C_DigestFinal)?, session)
    }

    // ---------------------------------------------------------------------
    // signing and MACing

    pub fn sign_init(
        &self,
        handle: &ModuleHandle,
        session: CK_SESSION_HANDLE,
        mechanism: &Mechanism,
        key: CK_OBJECT_HANDLE,
    ) -> WResult<()> {
        let module = self.module(handle)?;
        let mut native = NativeMechanism::new(mechanism, CharEncoding::Utf8)?;
        let mut mechanism = native.as_native();
        native_call!(module, C_SignInit, session, &raw mut mechanism, key)
    }

    /// `C_Sign`.
    ///
    /// Some tokens fail the null-buffer size query of `C_Sign`, so the first
    /// call is made with a 512-byte buffer. Only when the module answers
    /// `CKR_BUFFER_TOO_SMALL` is the call repeated with the reported size,
    /// or with the size query and fill protocol when no size was reported.
    pub fn sign(
        &self,
        handle: &ModuleHandle,
        session: CK_SESSION_HANDLE,
        data: &[u8],
    ) -> WResult<Vec<u8>> {
        let module = self.module(handle)?;
        let f = entry!(module, C_Sign)?;
        let (data, data_len) = buffer_ptr_len(Some(data))?;
        read_bytes_with_guess("C_Sign", SIGN_GUESS_LEN, |out, out_len| {
            // SAFETY: `data` outlives the call and `out` is null or holds
            // `*out_len` bytes.
            unsafe { f(session, data, data_len, out, out_len) }
        })
    }

    pub fn sign_update(
        &self,
        handle: &ModuleHandle,
        session: CK_SESSION_HANDLE,
        part: &[u8],
    ) -> WResult<()> {
        let module = self.module(handle)?;
        let (part, part_len) = buffer_ptr_len(Some(part))?;
        native_call!(module, C_SignUpdate, session, part, part_len)
    }

    pub fn sign_final(
        &self,
        handle: &ModuleHandle,
        session: CK_SESSION_HANDLE,
    ) -> WResult<Vec<u8>> {
        let module = self.module(handle)?;
        finish("C_SignFinal", entry!(module, C_SignFinal)?, session)
    }

    pub fn sign_recover_init(
        &self,
        handle: &ModuleHandle,
        session: CK_SESSION_HANDLE,
        mechanism: &Mechanism,
        key: CK_OBJECT_HANDLE,
    ) -> WResult<()> {
        let module = self.module(handle)?;
        let mut native = NativeMechanism::new(mechanism, CharEncoding::Utf8)?;
        let mut mechanism = native.as_native();
        native_call!(module, C_SignRecoverInit, session, &raw mut mechanism, key)
    }

    pub fn sign_recover(
        &self,
        handle: &ModuleHandle,
        session: CK_SESSION_HANDLE,
        data: &[u8],
    ) -> WResult<Vec<u8>> {
        let module = self.module(handle)?;
        transform(
            "C_SignRecover",
            entry!(module, C_SignRecover)?,
            session,
            data,
        )
    }

    // ---------------------------------------------------------------------
    // verification

    pub fn verify_init(
        &self,
        handle: &ModuleHandle,
        session: CK_SESSION_HANDLE,
        mechanism: &Mechanism,
        key: CK_OBJECT_HANDLE,
    ) -> WResult<()> {
        let module = self.module(handle)?;
        let mut native = NativeMechanism::new(mechanism, CharEncoding::Utf8)?;
        let mut mechanism = native.as_native();
        native_call!(module, C_VerifyInit, session, &raw mut mechanism, key)
    }

    /// `C_Verify`. An invalid signature is the `CKR_SIGNATURE_INVALID`
    /// [`WrapperError::Pkcs11`] error.
    pub fn verify(
        &self,
        handle: &ModuleHandle,
        session: CK_SESSION_HANDLE,
        data: &[u8],
        signature: &[u8],
    ) -> WResult<()> {
        let module = self.module(handle)?;
        let (data, data_len) = buffer_ptr_len(Some(data))?;
        let (signature, signature_len) = buffer_ptr_len(Some(signature))?;
        native_call!(
            module,
            C_Verify,
            session,
            data,
            data_len,
            signature,
            signature_len
        )
    }

    pub fn verify_update(
        &self,
        handle: &ModuleHandle,
        session: CK_SESSION_HANDLE,
        part: &[u8],
    ) -> WResult<()> {
        let module = self.module(handle)?;
        let (part, part_len) = buffer_ptr_len(Some(part))?;
        native_call!(module, C_VerifyUpdate, session, part, part_len)
    }

    pub fn verify_final(
        &self,
        handle: &ModuleHandle,
        session: CK_SESSION_HANDLE,
        signature: &[u8],
    ) -> WResult<()> {
        let module = self.module(handle)?;
        let (signature, signature_len) = buffer_ptr_len(Some(signature))?;
        native_call!(module, C_VerifyFinal, session, signature, signature_len)
    }

    pub fn verify_recover_init(
        &self,
        handle: &ModuleHandle,
        session: CK_SESSION_HANDLE,
        mechanism: &Mechanism,
        key: CK_OBJECT_HANDLE,
    ) -> WResult<()> {
        let module = self.module(handle)?;
        let mut native = NativeMechanism::new(mechanism, CharEncoding::Utf8)?;
        let mut mechanism = native.as_native();
        native_call!(module, C_VerifyRecoverInit, session, &raw mut mechanism, key)
    }

    pub fn verify_recover(
        &self,
        handle: &ModuleHandle,
        session: CK_SESSION_HANDLE,
        signature: &[u8],
    ) -> WResult<Vec<u8>> {
        let module = self.module(handle)?;
        transform(
            "C_VerifyRecover",
            entry!(module, C_VerifyRecover)?,
            session,
            signature,
        )
    }

    // ---------------------------------------------------------------------
    // dual-function operations

    pub fn digest_encrypt_update(
        &self,
        handle: &ModuleHandle,
        session: CK_SESSION_HANDLE,
        part: &[u8],
    ) -> WResult<Vec<u8>> {
        let module = self.module(handle)?;
        transform(
            "C_DigestEncryptUpdate",
            entry!(module, C_DigestEncryptUpdate)?,
            session,
            part,
        )
    }

    pub fn decrypt_digest_update(
        &self,
        handle: &ModuleHandle,
        session: CK_SESSION_HANDLE,
        encrypted_part: &[u8],
    ) -> WResult<Zeroizing<Vec<u8>>> {
        let module = self.module(handle)?;
        transform(
            "C_DecryptDigestUpdate",
            entry!(module, C_DecryptDigestUpdate)?,
            session,
            encrypted_part,
        )
        .map(Zeroizing::new)
    }

    pub fn sign_encrypt_update(
        &self,
        handle: &ModuleHandle,
        session: CK_SESSION_HANDLE,
        part: &[u8],
    ) -> WResult<Vec<u8>> {
        let module = self.module(handle)?;
        transform(
            "C_SignEncryptUpdate",
            entry!(module, C_SignEncryptUpdate)?,
            session,
            part,
        )
    }

    pub fn decrypt_verify_update(
        &self,
        handle: &ModuleHandle,
        session: CK_SESSION_HANDLE,
        encrypted_part: &[u8],
    ) -> WResult<Zeroizing<Vec<u8>>> {
        let module = self.module(handle)?;
        transform(
            "C_DecryptVerifyUpdate",
            entry!(module, C_DecryptVerifyUpdate)?,
            session,
            encrypted_part,
        )
        .map(Zeroizing::new)
    }

    // ---------------------------------------------------------------------
    // key management

    /// `C_GenerateKey`. The initialization vector generated by the PBE
    /// mechanisms is written back into `mechanism`.
    pub fn generate_key(
        &self,
        handle: &ModuleHandle,
        session: CK_SESSION_HANDLE,
        mechanism: &mut Mechanism,
        template: &[Attribute],
        encoding: CharEncoding,
    ) -> WResult<CK_OBJECT_HANDLE> {
        let module = self.module(handle)?;
        let mut template = NativeTemplate::new(template, encoding)?;
        let count = template.count()?;
        let (key, output) = {
            let mut native = NativeMechanism::new(mechanism, encoding)?;
            let mut ck_mechanism = native.as_native();
            let mut key: CK_OBJECT_HANDLE = CK_INVALID_HANDLE;
            native_call!(
                module,
                C_GenerateKey,
                session,
                &raw mut ck_mechanism,
                template.as_mut_ptr(),
                count,
                &raw mut key
            )?;
            (key, native.copy_back_data()?)
        };
        if let Some(output) = output {
            copy_back(&output, mechanism);
        }
        Ok(key)
    }

    /// `C_GenerateKeyPair`, returning the public then the private key.
    pub fn generate_key_pair(
        &self,
        handle: &ModuleHandle,
        session: CK_SESSION_HANDLE,
        mechanism: &Mechanism,
        public_key_template: &[Attribute],
        private_key_template: &[Attribute],
        encoding: CharEncoding,
    ) -> WResult<(CK_OBJECT_HANDLE, CK_OBJECT_HANDLE)> {
        let module = self.module(handle)?;
        let mut native = NativeMechanism::new(mechanism, encoding)?;
        let mut ck_mechanism = native.as_native();
        let mut public_template = NativeTemplate::new(public_key_template, encoding)?;
        let mut private_template = NativeTemplate::new(private_key_template, encoding)?;
        let (public_count, private_count) = (public_template.count()?, private_template.count()?);
        let mut public_key: CK_OBJECT_HANDLE = CK_INVALID_HANDLE;
        let mut private_key: CK_OBJECT_HANDLE = CK_INVALID_HANDLE;
        native_call!(
            module,
            C_GenerateKeyPair,
            session,
            &raw mut ck_mechanism,
            public_template.as_mut_ptr(),
            public_count,
            private_template.as_mut_ptr(),
            private_count,
            &raw mut public_key,
            &raw mut private_key
        )?;
        Ok((public_key, private_key))
    }

    pub fn wrap_key(
        &self,
        handle: &ModuleHandle,
        session: CK_SESSION_HANDLE,
        mechanism: &Mechanism,
        wrapping_key: CK_OBJECT_HANDLE,
        key: CK_OBJECT_HANDLE,
    ) -> WResult<Vec<u8>> {
        let module = self.module(handle)?;
        let f = entry!(module, C_WrapKey)?;
        let mut native = NativeMechanism::new(mechanism, CharEncoding::Utf8)?;
        let mut ck_mechanism = native.as_native();
        read_bytes_two_pass("C_WrapKey", |out, out_len| {
            // SAFETY: `ck_mechanism` points into `native`, alive for the
            // whole negotiation, and `out` is null or holds `*out_len` bytes.
            unsafe { f(session, &raw mut ck_mechanism, wrapping_key, key, out, out_len) }
        })
    }

    /// `C_UnwrapKey`. The block contents and `X` of `CKM_KEY_WRAP_SET_OAEP`
    /// are written back into `mechanism`.
    #[allow(clippy::too_many_arguments)]
    pub fn unwrap_key(
        &self,
        handle: &ModuleHandle,
        session: CK_SESSION_HANDLE,
        mechanism: &mut Mechanism,
        unwrapping_key: CK_OBJECT_HANDLE,
        wrapped_key: &[u8],
        template: &[Attribute],
        encoding: CharEncoding,
    ) -> WResult<CK_OBJECT_HANDLE> {
        let module = self.module(handle)?;
        let (wrapped, wrapped_len) = buffer_ptr_len(Some(wrapped_key))?;
        let mut template = NativeTemplate::new(template, encoding)?;
        let count = template.count()?;
        let (key, output) = {
            let mut native = NativeMechanism::new(mechanism, encoding)?;
            let mut ck_mechanism = native.as_native();
            let mut key: CK_OBJECT_HANDLE = CK_INVALID_HANDLE;
            native_call!(
                module,
                C_UnwrapKey,
                session,
                &raw mut ck_mechanism,
                unwrapping_key,
                wrapped,
                wrapped_len,
                template.as_mut_ptr(),
                count,
                &raw mut key
            )?;
            (key, native.copy_back_data()?)
        };
        if let Some(output) = output {
            copy_back(&output, mechanism);
        }
        Ok(key)
    }

    /// `C_DeriveKey`.
    ///
    /// The SSL3 and TLS key-and-MAC derivations return their keys through
    /// the mechanism parameter, written back into `mechanism`; they are
    /// called without a key handle pointer and return `None`.
    pub fn derive_key(
        &self,
        handle: &ModuleHandle,
        session: CK_SESSION_HANDLE,
        mechanism: &mut Mechanism,
        base_key: CK_OBJECT_HANDLE,
        template: &[Attribute],
        encoding: CharEncoding,
    ) -> WResult<Option<CK_OBJECT_HANDLE>> {
        let module = self.module(handle)?;
        let mut template = NativeTemplate::new(template, encoding)?;
        let count = template.count()?;
        let (key, output) = {
            let mut native = NativeMechanism::new(mechanism, encoding)?;
            let mut ck_mechanism = native.as_native();
            let mut key: CK_OBJECT_HANDLE = CK_INVALID_HANDLE;
            let returns_key_material = native.returns_key_material();
            let p_key = if returns_key_material {
                ptr::null_mut()
            } else {
                &raw mut key
            };
            native_call!(
                module,
                C_DeriveKey,
                session,
                &raw mut ck_mechanism,
                base_key,
                template.as_mut_ptr(),
                count,
                p_key
            )?;
            (
                (!returns_key_material).then_some(key),
                native.copy_back_data()?,
            )
        };
        if let Some(output) = output {
            copy_back(&output, mechanism);
        }
        Ok(key)
    }

    // ---------------------------------------------------------------------
    // random number generation

    pub fn seed_random(
        &self,
        handle: &ModuleHandle,
        session: CK_SESSION_HANDLE,
        seed: &[u8],
    ) -> WResult<()> {
        let module = self.module(handle)?;
        let (seed, seed_len) = buffer_ptr_len(Some(seed))?;
        native_call!(module, C_SeedRandom, session, seed, seed_len)
    }

    pub fn generate_random(
        &self,
        handle: &ModuleHandle,
        session: CK_SESSION_HANDLE,
        len: usize,
    ) -> WResult<Vec<u8>> {
        let module = self.module(handle)?;
        let mut random = alloc_bytes(len)?;
        native_call!(
            module,
            C_GenerateRandom,
            session,
            random.as_mut_ptr(),
            CK_ULONG::try_from(len)?
        )?;
        Ok(random)
    }

    // ---------------------------------------------------------------------
    // parallel function management and slot events

    pub fn get_function_status(
        &self,
        handle: &ModuleHandle,
        session: CK_SESSION_HANDLE,
    ) -> WResult<()> {
        let module = self.module(handle)?;
        native_call!(module, C_GetFunctionStatus, session)
    }

    pub fn cancel_function(
        &self,
        handle: &ModuleHandle,
        session: CK_SESSION_HANDLE,
    ) -> WResult<()> {
        let module = self.module(handle)?;
        native_call!(module, C_CancelFunction, session)
    }

    /// `C_WaitForSlotEvent`; with `CKF_DONT_BLOCK` and no pending event the
    /// result is the `CKR_NO_EVENT` [`WrapperError::Pkcs11`] error.
    pub fn wait_for_slot_event(&self, handle: &ModuleHandle, flags: CK_FLAGS) -> WResult<CK_SLOT_ID> {
        let module = self.module(handle)?;
        let mut slot: CK_SLOT_ID = 0;
        native_call!(
            module,
            C_WaitForSlotEvent,
            flags,
            &raw mut slot,
            ptr::null_mut()
        )?;
        Ok(slot)
    }
}
