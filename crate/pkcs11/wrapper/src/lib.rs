//! Marshaling layer between Rust values and a dynamically loaded PKCS#11 module.
//!
//! A [`Pkcs11`] value owns the registry of connected modules and the registry of
//! session notification callbacks. Every entry point resolves the module's
//! function table, marshals its arguments into native memory owned for the
//! duration of the call, invokes the native function and converts the results
//! back.

#![deny(unsafe_op_in_unsafe_fn)]

pub mod attribute;
pub mod convert;
mod error;
pub mod info;
pub mod init_args;
pub mod logging;
pub mod mechanism;
mod native_call;
pub mod names;
mod pkcs11;
pub mod registry;

#[cfg(test)]
mod tests;

pub use attribute::{Attribute, Value};
pub use convert::{CharEncoding, Date, Version};
pub use error::{WrapperError, result::WResult};
pub use init_args::{DefaultMutexHandler, InitializeArgs, ManagedMutex, MutexHandler};
pub use mechanism::{Mechanism, MechanismParameters};
pub use pkcs11::{ModuleHandle, Pkcs11};
pub use registry::{
    connection::{DynamicLoader, ModuleLoader},
    notify::{ManagedRuntime, Notify, ThreadRuntime},
};
