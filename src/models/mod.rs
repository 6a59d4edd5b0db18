// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod account;
pub mod credential;
pub mod quota;

pub use account::{Account, AccountDraft, AccountGroup, AccountGroups, AccountType};
pub use credential::Credential;
pub use quota::{ProgressFill, ProgressTier};
