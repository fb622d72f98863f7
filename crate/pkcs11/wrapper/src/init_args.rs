//! `C_Initialize` arguments and the application-supplied locking callbacks.
//!
//! The `CK_C_INITIALIZE_ARGS` mutex callbacks carry no context pointer, so the
//! active [`MutexHandler`] lives in a process-wide slot, set by `initialize`
//! and cleared by `finalize`.

use std::{
    fmt, ptr,
    sync::{Arc, Condvar, Mutex, RwLock},
};

use cosmian_pkcs11_sys::{
    CK_C_INITIALIZE_ARGS, CK_FLAGS, CK_RV, CK_VOID_PTR, CK_VOID_PTR_PTR, CKR_ARGUMENTS_BAD,
    CKR_GENERAL_ERROR, CKR_MUTEX_BAD, CKR_MUTEX_NOT_LOCKED, CKR_OK,
};
use tracing::{error, trace};

use crate::{
    WResult, WrapperError,
    registry::notify::{AttachGuard, ManagedRuntime},
    wrapper_ensure, wrapper_error,
};

/// A lock created by a [`MutexHandler`] on behalf of the module.
pub trait ManagedMutex: Send + Sync {
    fn lock(&self) -> WResult<()>;
    fn unlock(&self) -> WResult<()>;
}

/// Application-supplied locking, handed to the module through `C_Initialize`.
pub trait MutexHandler: Send + Sync {
    fn create_mutex(&self) -> WResult<Box<dyn ManagedMutex>>;

    fn destroy_mutex(&self, mutex: Box<dyn ManagedMutex>) -> WResult<()> {
        drop(mutex);
        Ok(())
    }

    fn lock_mutex(&self, mutex: &dyn ManagedMutex) -> WResult<()> {
        mutex.lock()
    }

    fn unlock_mutex(&self, mutex: &dyn ManagedMutex) -> WResult<()> {
        mutex.unlock()
    }
}

/// A non-reentrant lock that may be released by another thread, as PKCS#11
/// modules expect.
#[derive(Debug, Default)]
struct CondvarMutex {
    locked: Mutex<bool>,
    released: Condvar,
}

impl ManagedMutex for CondvarMutex {
    fn lock(&self) -> WResult<()> {
        let mut locked = self
            .locked
            .lock()
            .map_err(|e| wrapper_error!("mutex state poisoned: {e}"))?;
        while *locked {
            locked = self
                .released
                .wait(locked)
                .map_err(|e| wrapper_error!("mutex state poisoned: {e}"))?;
        }
        *locked = true;
        Ok(())
    }

    fn unlock(&self) -> WResult<()> {
        let mut locked = self
            .locked
            .lock()
            .map_err(|e| wrapper_error!("mutex state poisoned: {e}"))?;
        wrapper_ensure!(
            *locked,
            WrapperError::pkcs11("UnlockMutex", CKR_MUTEX_NOT_LOCKED)
        );
        *locked = false;
        self.released.notify_one();
        Ok(())
    }
}

/// Creates condition-variable based locks.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMutexHandler;

impl MutexHandler for DefaultMutexHandler {
    fn create_mutex(&self) -> WResult<Box<dyn ManagedMutex>> {
        Ok(Box::new(CondvarMutex::default()))
    }
}

/// Arguments of `C_Initialize`.
#[derive(Clone, Default)]
pub struct InitializeArgs {
    /// `CKF_LIBRARY_CANT_CREATE_OS_THREADS`, `CKF_OS_LOCKING_OK`.
    pub flags: CK_FLAGS,
    pub mutex_handler: Option<Arc<dyn MutexHandler>>,
}

impl InitializeArgs {
    #[must_use]
    pub const fn new(flags: CK_FLAGS) -> Self {
        Self {
            flags,
            mutex_handler: None,
        }
    }

    #[must_use]
    pub fn with_mutex_handler(mut self, handler: Arc<dyn MutexHandler>) -> Self {
        self.mutex_handler = Some(handler);
        self
    }

    /// The native structure; the mutex callbacks are set only with a handler.
    #[must_use]
    pub fn to_native(&self) -> CK_C_INITIALIZE_ARGS {
        let mut args = CK_C_INITIALIZE_ARGS {
            flags: self.flags,
            pReserved: ptr::null_mut(),
            ..Default::default()
        };
        if self.mutex_handler.is_some() {
            args.CreateMutex = Some(create_mutex_trampoline);
            args.DestroyMutex = Some(destroy_mutex_trampoline);
            args.LockMutex = Some(lock_mutex_trampoline);
            args.UnlockMutex = Some(unlock_mutex_trampoline);
        }
        args
    }
}

impl fmt::Debug for InitializeArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InitializeArgs")
            .field("flags", &format_args!("0x{:X}", self.flags))
            .field("mutex_handler", &self.mutex_handler.is_some())
            .finish()
    }
}

type ActiveHandler = (Arc<dyn MutexHandler>, Arc<dyn ManagedRuntime>);

static ACTIVE_HANDLER: RwLock<Option<ActiveHandler>> = RwLock::new(None);

/// Make `handler` the target of the mutex callbacks, returning the previous one.
pub(crate) fn install_handler(
    handler: Option<Arc<dyn MutexHandler>>,
    runtime: Arc<dyn ManagedRuntime>,
) -> WResult<Option<Arc<dyn MutexHandler>>> {
    let mut slot = ACTIVE_HANDLER
        .write()
        .map_err(|e| wrapper_error!("mutex handler slot poisoned: {e}"))?;
    let previous = slot.take().map(|(h, _)| h);
    *slot = handler.map(|h| (h, runtime));
    Ok(previous)
}

fn active_handler() -> Option<ActiveHandler> {
    ACTIVE_HANDLER.read().ok().and_then(|slot| slot.clone())
}

/// Run `f` attached to the runtime of the active handler and map the result
/// to a status code. Panics never cross into native code.
fn with_handler<F>(name: &str, f: F) -> CK_RV
where
    F: FnOnce(&dyn MutexHandler) -> WResult<()>,
{
    let Some((handler, runtime)) = active_handler() else {
        error!("{name}: no mutex handler installed");
        return CKR_GENERAL_ERROR;
    };
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let _guard = AttachGuard::attach(runtime.as_ref())?;
        f(handler.as_ref())
    }));
    match result {
        Ok(Ok(())) => CKR_OK,
        Ok(Err(e)) => {
            trace!("{name}: {e}");
            e.code()
        }
        Err(_) => {
            error!("{name}: mutex handler panicked");
            CKR_GENERAL_ERROR
        }
    }
}

/// The managed mutex behind a native mutex pointer.
///
/// # Safety
///
/// `mutex` must have been returned by [`create_mutex_trampoline`] and not
/// destroyed yet.
unsafe fn managed<'a>(mutex: CK_VOID_PTR) -> &'a dyn ManagedMutex {
    // SAFETY: guaranteed by the caller.
    unsafe { &**mutex.cast::<Box<dyn ManagedMutex>>() }
}

unsafe extern "C" fn create_mutex_trampoline(mutex: CK_VOID_PTR_PTR) -> CK_RV {
    if mutex.is_null() {
        return CKR_ARGUMENTS_BAD;
    }
    with_handler("CreateMutex", |handler| {
        let created = Box::into_raw(Box::new(handler.create_mutex()?));
        // SAFETY: `mutex` is a valid out pointer supplied by the module.
        unsafe { *mutex = created.cast() };
        Ok(())
    })
}

unsafe extern "C" fn destroy_mutex_trampoline(mutex: CK_VOID_PTR) -> CK_RV {
    if mutex.is_null() {
        return CKR_MUTEX_BAD;
    }
    // SAFETY: the module passes back a pointer made by `create_mutex_trampoline`.
    let owned = unsafe { Box::from_raw(mutex.cast::<Box<dyn ManagedMutex>>()) };
    match active_handler() {
        Some(_) => with_handler("DestroyMutex", move |handler| handler.destroy_mutex(*owned)),
        None => CKR_OK,
    }
}

unsafe extern "C" fn lock_mutex_trampoline(mutex: CK_VOID_PTR) -> CK_RV {
    if mutex.is_null() {
        return CKR_MUTEX_BAD;
    }
    // SAFETY: the module passes back a pointer made by `create_mutex_trampoline`.
    let mutex = unsafe { managed(mutex) };
    match active_handler() {
        Some(_) => with_handler("LockMutex", |handler| handler.lock_mutex(mutex)),
        None => mutex.lock().map_or_else(|e| e.code(), |()| CKR_OK),
    }
}

unsafe extern "C" fn unlock_mutex_trampoline(mutex: CK_VOID_PTR) -> CK_RV {
    if mutex.is_null() {
        return CKR_MUTEX_BAD;
    }
    // SAFETY: the module passes back a pointer made by `create_mutex_trampoline`.
    let mutex = unsafe { managed(mutex) };
    match active_handler() {
        Some(_) => with_handler("UnlockMutex", |handler| handler.unlock_mutex(mutex)),
        None => mutex.unlock().map_or_else(|e| e.code(), |()| CKR_OK),
    }
}
