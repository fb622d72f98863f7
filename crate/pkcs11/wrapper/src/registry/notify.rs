//! Session notification callbacks.
//!
//! The module is given the address of a [`NotificationRegistry`] as the
//! `pApplication` argument of `C_OpenSession` and [`notify_trampoline`] as the
//! `Notify` callback. The registry keeps the managed callback of each session
//! alive until the session is closed.

use std::{
    any::Any,
    cell::Cell,
    fmt,
    panic::{self, AssertUnwindSafe},
    sync::{Arc, Mutex, MutexGuard},
};

use cosmian_pkcs11_sys::{
    CK_NOTIFICATION, CK_RV, CK_SESSION_HANDLE, CK_VOID_PTR, CKR_GENERAL_ERROR, CKR_OK,
};
use tracing::{error, trace, warn};

use crate::{WResult, wrapper_error};

/// Opaque application data handed back to a notification callback.
pub type ApplicationData = Arc<dyn Any + Send + Sync>;

/// A managed notification callback.
pub trait Notify: Send + Sync {
    fn notify(
        &self,
        session: CK_SESSION_HANDLE,
        event: CK_NOTIFICATION,
        application: Option<&(dyn Any + Send + Sync)>,
    ) -> WResult<()>;
}

impl<F> Notify for F
where
    F: Fn(CK_SESSION_HANDLE, CK_NOTIFICATION, Option<&(dyn Any + Send + Sync)>) -> WResult<()>
        + Send
        + Sync,
{
    fn notify(
        &self,
        session: CK_SESSION_HANDLE,
        event: CK_NOTIFICATION,
        application: Option<&(dyn Any + Send + Sync)>,
    ) -> WResult<()> {
        self(session, event, application)
    }
}

/// Attaches native threads to the managed runtime before a callback runs.
pub trait ManagedRuntime: Send + Sync {
    /// Whether the current thread is already attached.
    fn is_attached(&self) -> bool;
    fn attach(&self) -> WResult<()>;
    fn detach(&self);
}

thread_local! {
    static ATTACHED: Cell<bool> = const { Cell::new(false) };
}

/// A runtime tracking attachment in thread-local state.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRuntime;

impl ManagedRuntime for ThreadRuntime {
    fn is_attached(&self) -> bool {
        ATTACHED.with(Cell::get)
    }

    fn attach(&self) -> WResult<()> {
        ATTACHED.with(|a| a.set(true));
        Ok(())
    }

    fn detach(&self) {
        ATTACHED.with(|a| a.set(false));
    }
}

/// Keeps the current thread attached for its lifetime.
///
/// Detaches on drop only if this guard did the attaching, so nested callbacks
/// on an attached thread leave it attached.
pub struct AttachGuard<'a> {
    runtime: &'a dyn ManagedRuntime,
    attached: bool,
}

impl<'a> AttachGuard<'a> {
    pub fn attach(runtime: &'a dyn ManagedRuntime) -> WResult<Self> {
        let attached = if runtime.is_attached() {
            false
        } else {
            runtime.attach()?;
            true
        };
        Ok(Self { runtime, attached })
    }

    #[must_use]
    pub const fn attached_here(&self) -> bool {
        self.attached
    }
}

impl Drop for AttachGuard<'_> {
    fn drop(&mut self) {
        if self.attached {
            self.runtime.detach();
        }
    }
}

/// The callback of a session and its application data.
#[derive(Clone)]
pub struct Registration {
    pub callback: Arc<dyn Notify>,
    pub application: Option<ApplicationData>,
}

impl Registration {
    pub fn new(callback: Arc<dyn Notify>, application: Option<ApplicationData>) -> Self {
        Self {
            callback,
            application,
        }
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("application", &self.application.is_some())
            .finish_non_exhaustive()
    }
}

/// Registrations keyed by session handle, guarded by one mutex.
pub struct NotificationRegistry {
    entries: Mutex<Vec<(CK_SESSION_HANDLE, Arc<Registration>)>>,
    runtime: Arc<dyn ManagedRuntime>,
}

impl fmt::Debug for NotificationRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationRegistry").finish_non_exhaustive()
    }
}

impl NotificationRegistry {
    pub fn new(runtime: Arc<dyn ManagedRuntime>) -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            runtime,
        }
    }

    fn entries(&self) -> WResult<MutexGuard<'_, Vec<(CK_SESSION_HANDLE, Arc<Registration>)>>> {
        self.entries
            .lock()
            .map_err(|e| wrapper_error!("notification registry lock poisoned: {e}"))
    }

    /// Register the callback of a session; nothing happens without one.
    pub fn put(&self, session: CK_SESSION_HANDLE, registration: Option<Registration>) -> WResult<()> {
        if let Some(registration) = registration {
            self.entries()?.push((session, Arc::new(registration)));
        }
        Ok(())
    }

    pub fn get(&self, session: CK_SESSION_HANDLE) -> WResult<Option<Arc<Registration>>> {
        Ok(self
            .entries()?
            .iter()
            .find(|(s, _)| *s == session)
            .map(|(_, r)| r.clone()))
    }

    pub fn remove(&self, session: CK_SESSION_HANDLE) -> WResult<Option<Arc<Registration>>> {
        let mut entries = self.entries()?;
        Ok(entries
            .iter()
            .position(|(s, _)| *s == session)
            .map(|i| entries.remove(i).1))
    }

    /// Remove the oldest registration, used to drain the registry.
    pub fn remove_first(&self) -> WResult<Option<(CK_SESSION_HANDLE, Arc<Registration>)>> {
        let mut entries = self.entries()?;
        Ok(if entries.is_empty() {
            None
        } else {
            Some(entries.remove(0))
        })
    }

    pub fn len(&self) -> WResult<usize> {
        Ok(self.entries()?.len())
    }

    pub fn is_empty(&self) -> WResult<bool> {
        Ok(self.entries()?.is_empty())
    }

    /// The opaque address passed as `pApplication` to `C_OpenSession`.
    #[must_use]
    pub fn as_application_ptr(self: &Arc<Self>) -> CK_VOID_PTR {
        Arc::as_ptr(self).cast_mut().cast()
    }

    #[must_use]
    pub fn runtime(&self) -> &dyn ManagedRuntime {
        self.runtime.as_ref()
    }

    /// Run the callback registered for `session`, if any.
    ///
    /// The lock is released before the callback runs.
    pub fn dispatch(&self, session: CK_SESSION_HANDLE, event: CK_NOTIFICATION) -> WResult<()> {
        let guard = AttachGuard::attach(self.runtime.as_ref())?;
        trace!(
            "notification 0x{event:X} for session {session}, attached here: {}",
            guard.attached_here()
        );
        let Some(registration) = self.get(session)? else {
            trace!("no notification callback for session {session}");
            return Ok(());
        };
        registration
            .callback
            .notify(session, event, registration.application.as_deref())
    }
}

/// `CK_NOTIFY` callback handed to `C_OpenSession`.
///
/// Errors are reported to the module as their status code; panics never
/// cross into native code.
///
/// # Safety
///
/// `application` must be null or the address returned by
/// [`NotificationRegistry::as_application_ptr`] of a registry that is still
/// alive.
pub unsafe extern "C" fn notify_trampoline(
    session: CK_SESSION_HANDLE,
    event: CK_NOTIFICATION,
    application: CK_VOID_PTR,
) -> CK_RV {
    if application.is_null() {
        return CKR_OK;
    }
    // SAFETY: guaranteed by the caller.
    let registry = unsafe { &*application.cast::<NotificationRegistry>() };
    match panic::catch_unwind(AssertUnwindSafe(|| registry.dispatch(session, event))) {
        Ok(Ok(())) => CKR_OK,
        Ok(Err(e)) => {
            warn!("notification callback of session {session} failed: {e}");
            e.code()
        }
        Err(_) => {
            error!("notification callback of session {session} panicked");
            CKR_GENERAL_ERROR
        }
    }
}
