// aqi-runner: AQI Training Pipeline Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Core modules for process and environment management.
//!
//! ```text
//!          core
//!           |
//!     +-----+------+
//!     v            v
//!    env        process
//!     |            |
//!    Env        Builder
//!   (COW map)   Output, argv only
//! ```

pub mod env;
pub mod process;
