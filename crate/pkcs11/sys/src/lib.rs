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

//! Declarations of the PKCS#11 v2.40 C interface.
//!
//! The layout follows the Unix packing of `pkcs11.h`: natural alignment and
//! `CK_ULONG` as the platform `unsigned long`.

#![allow(non_camel_case_types, non_snake_case, clippy::upper_case_acronyms)]

mod constants;
mod functions;
mod params;
mod types;

pub use constants::*;
pub use functions::*;
pub use params::*;
pub use types::*;
