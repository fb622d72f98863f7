//! Connected modules, keyed by the identity of their handle.

use std::{
    fmt,
    path::Path,
    sync::{Arc, Mutex, MutexGuard},
};

use cosmian_pkcs11_sys::{CK_C_GetFunctionList, CK_FUNCTION_LIST, CK_FUNCTION_LIST_PTR};
use libloading::Library;
use tracing::{debug, trace};

use crate::{WResult, WrapperError, native_call::check_rv, wrapper_error};

/// The function table of a module, as returned by `C_GetFunctionList`.
struct FunctionList(CK_FUNCTION_LIST_PTR);

// SAFETY: the table is read-only after `C_GetFunctionList` and PKCS#11
// modules are called from any thread once initialized.
unsafe impl Send for FunctionList {}
unsafe impl Sync for FunctionList {}

/// A connected module: its function table and the library that provides it.
///
/// Dropping the last reference unloads the library.
pub struct ModuleData {
    functions: FunctionList,
    library: Option<Library>,
    name: String,
}

impl ModuleData {
    /// Wrap a function table.
    ///
    /// # Safety
    ///
    /// `functions` must be null or point to a `CK_FUNCTION_LIST` that stays
    /// valid as long as `library` is loaded (or forever when `library` is `None`).
    pub unsafe fn new(
        name: impl Into<String>,
        functions: CK_FUNCTION_LIST_PTR,
        library: Option<Library>,
    ) -> Self {
        Self {
            functions: FunctionList(functions),
            library,
            name: name.into(),
        }
    }

    /// The function table, or [`WrapperError::FunctionNotSupported`] naming
    /// `function` if the module returned none.
    pub fn function_list(&self, function: &'static str) -> WResult<&CK_FUNCTION_LIST> {
        // SAFETY: validity is guaranteed by the constructor contract.
        let functions = unsafe { self.functions.0.as_ref() };
        functions.ok_or(WrapperError::FunctionNotSupported(function))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn is_dynamic(&self) -> bool {
        self.library.is_some()
    }
}

impl fmt::Debug for ModuleData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleData")
            .field("name", &self.name)
            .field("functions", &self.functions.0)
            .field("dynamic", &self.library.is_some())
            .finish()
    }
}

impl Drop for ModuleData {
    fn drop(&mut self) {
        if self.library.is_some() {
            debug!("unloading PKCS#11 module {}", self.name);
        }
    }
}

/// Loads a module and resolves its function table.
pub trait ModuleLoader: Send + Sync {
    fn load(&self, path: &Path) -> WResult<ModuleData>;
}

/// Loads shared libraries with `libloading` and calls `C_GetFunctionList`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DynamicLoader;

impl ModuleLoader for DynamicLoader {
    fn load(&self, path: &Path) -> WResult<ModuleData> {
        debug!("loading PKCS#11 module {}", path.display());
        // SAFETY: loading a PKCS#11 module runs its initializers, which is
        // what the caller asked for.
        let library = unsafe { Library::new(path) }
            .map_err(|e| WrapperError::Io(format!("{}: {e}", path.display())))?;
        let get_function_list: CK_C_GetFunctionList = {
            // SAFETY: `C_GetFunctionList` has this signature in every module.
            let symbol = unsafe { library.get(b"C_GetFunctionList") }
                .map_err(|e| WrapperError::Io(format!("{}: {e}", path.display())))?;
            Some(*symbol)
        };
        let get_function_list =
            get_function_list.ok_or(WrapperError::FunctionNotSupported("C_GetFunctionList"))?;
        let mut functions: CK_FUNCTION_LIST_PTR = std::ptr::null_mut();
        // SAFETY: `functions` is a valid out pointer.
        let rv = unsafe { get_function_list(&raw mut functions) };
        check_rv("C_GetFunctionList", rv)?;
        // SAFETY: the table belongs to `library`, moved into the result.
        Ok(unsafe { ModuleData::new(path.display().to_string(), functions, Some(library)) })
    }
}

/// Connections keyed by handle identity (`Arc::ptr_eq`), guarded by one mutex.
pub struct ConnectionRegistry<K> {
    entries: Mutex<Vec<(Arc<K>, Arc<ModuleData>)>>,
}

impl<K> Default for ConnectionRegistry<K> {
    fn default() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }
}

impl<K> fmt::Debug for ConnectionRegistry<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionRegistry").finish_non_exhaustive()
    }
}

impl<K> ConnectionRegistry<K> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> WResult<MutexGuard<'_, Vec<(Arc<K>, Arc<ModuleData>)>>> {
        self.entries
            .lock()
            .map_err(|e| wrapper_error!("connection registry lock poisoned: {e}"))
    }

    /// Insert, or replace the data of an already registered key.
    pub fn put(&self, key: Arc<K>, data: Arc<ModuleData>) -> WResult<()> {
        let mut entries = self.entries()?;
        if let Some(entry) = entries.iter_mut().find(|(k, _)| Arc::ptr_eq(k, &key)) {
            trace!("replacing connection to {}", entry.1.name());
            entry.1 = data;
        } else {
            entries.push((key, data));
        }
        Ok(())
    }

    pub fn get(&self, key: &Arc<K>) -> WResult<Option<Arc<ModuleData>>> {
        Ok(self
            .entries()?
            .iter()
            .find(|(k, _)| Arc::ptr_eq(k, key))
            .map(|(_, data)| data.clone()))
    }

    /// Remove a key and return its data.
    pub fn remove(&self, key: &Arc<K>) -> WResult<Option<Arc<ModuleData>>> {
        let mut entries = self.entries()?;
        Ok(entries
            .iter()
            .position(|(k, _)| Arc::ptr_eq(k, key))
            .map(|i| entries.swap_remove(i).1))
    }

    /// Remove every connection.
    pub fn remove_all(&self) -> WResult<Vec<Arc<ModuleData>>> {
        Ok(self.entries()?.drain(..).map(|(_, data)| data).collect())
    }

    pub fn len(&self) -> WResult<usize> {
        Ok(self.entries()?.len())
    }

    pub fn is_empty(&self) -> WResult<bool> {
        Ok(self.entries()?.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use std::{ptr, thread};

    use super::*;

    fn data(name: &str) -> Arc<ModuleData> {
        // SAFETY: a null table is never dereferenced.
        Arc::new(unsafe { ModuleData::new(name, ptr::null_mut(), None) })
    }

    #[test]
    fn keys_are_compared_by_identity() {
        let registry = ConnectionRegistry::<String>::new();
        let a = Arc::new("module".to_owned());
        let b = Arc::new("module".to_owned());
        registry.put(a.clone(), data("a")).unwrap();
        assert!(registry.get(&b).unwrap().is_none());
        assert_eq!(registry.get(&a).unwrap().unwrap().name(), "a");

        registry.put(a.clone(), data("a2")).unwrap();
        assert_eq!(registry.len().unwrap(), 1);
        assert_eq!(registry.get(&a).unwrap().unwrap().name(), "a2");

        assert_eq!(registry.remove(&a).unwrap().unwrap().name(), "a2");
        assert!(registry.get(&a).unwrap().is_none());
        assert!(registry.remove(&a).unwrap().is_none());
    }

    #[test]
    fn null_function_list_is_not_supported() {
        let module = data("null");
        assert!(matches!(
            module.function_list("C_Initialize"),
            Err(WrapperError::FunctionNotSupported("C_Initialize"))
        ));
        assert!(!module.is_dynamic());
    }

    #[test]
    fn concurrent_access() {
        let registry = Arc::new(ConnectionRegistry::<usize>::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let registry = registry.clone();
                thread::spawn(move || {
                    let key = Arc::new(i);
                    for _ in 0..100 {
                        registry.put(key.clone(), data("m")).unwrap();
                        assert!(registry.get(&key).unwrap().is_some());
                        assert!(registry.remove(&key).unwrap().is_some());
                        assert!(registry.get(&key).unwrap().is_none());
                    }
                    registry.put(key, data("m")).unwrap();
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(registry.remove_all().unwrap().len(), 8);
        assert!(registry.is_empty().unwrap());
    }

    #[test]
    fn loader_errors_are_io() {
        let err = DynamicLoader
            .load(Path::new("/nonexistent/libpkcs11-module.so"))
            .unwrap_err();
        assert!(matches!(err, WrapperError::Io(ref m) if m.contains("/nonexistent")));
    }
}
