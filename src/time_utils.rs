// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for epoch-second timestamps.

use chrono::{DateTime, SecondsFormat, Utc};

/// Current wall-clock time as whole epoch seconds.
pub fn now_epoch_secs() -> i64 {
    Utc::now().timestamp()
}

/// Format epoch seconds as RFC3339 with a `Z` suffix, for logs.
pub fn format_epoch_rfc3339(secs: i64) -> String {
    DateTime::from_timestamp(secs, 0)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_else(|| secs.to_string())
}
