// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authentication extension-point traits.
//!
//! Hosts consume [`AuthenticationFilter`]; implementers write an
//! [`AuthenticationHook`] and get the filter through a blanket impl.

pub mod filter;
pub mod hook;

pub use filter::{AuthenticationFilter, HookFuture};
pub use hook::AuthenticationHook;
