// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Quota urgency: low-quota flag and progress-bar fill tiers.
//!
//! The low flag is computed from `remain_gb`, while the progress fill is
//! computed from `total_gb - used_gb`. The two can disagree when the API's
//! numbers drift; neither is reconciled against the other.

use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Percent left at or below which an account is flagged low.
pub const LOW_QUOTA_PERCENT: f64 = 10.0;

/// Percentage of quota left, or 0 when there is no total.
pub fn percent_left(remain_gb: f64, total_gb: f64) -> f64 {
    if total_gb > 0.0 {
        (remain_gb / total_gb) * 100.0
    } else {
        0.0
    }
}

/// Low-quota flag: only meaningful when the account has a total.
pub fn is_low(remain_gb: f64, total_gb: f64) -> bool {
    total_gb > 0.0 && percent_left(remain_gb, total_gb) <= LOW_QUOTA_PERCENT
}

/// Severity of the progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
pub enum ProgressTier {
    /// No total to measure against; neutral, empty bar.
    Empty,
    Critical,
    Warning,
    Caution,
    Normal,
}

impl ProgressTier {
    fn for_percentage(percentage: f64) -> Self {
        if percentage <= 10.0 {
            ProgressTier::Critical
        } else if percentage <= 25.0 {
            ProgressTier::Warning
        } else if percentage <= 50.0 {
            ProgressTier::Caution
        } else {
            ProgressTier::Normal
        }
    }
}

/// Progress bar fill in percent (0..=100) and its tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
pub struct ProgressFill {
    pub percentage: f64,
    pub tier: ProgressTier,
}

/// Fill for `used_gb` out of `total_gb`.
pub fn progress_fill(used_gb: f64, total_gb: f64) -> ProgressFill {
    if total_gb == 0.0 || total_gb.is_nan() {
        return ProgressFill {
            percentage: 0.0,
            tier: ProgressTier::Empty,
        };
    }

    let percentage = (((total_gb - used_gb) / total_gb) * 100.0).clamp(0.0, 100.0);
    ProgressFill {
        percentage,
        tier: ProgressTier::for_percentage(percentage),
    }
}
