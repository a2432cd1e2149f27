// aqi-runner: AQI Training Pipeline Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Utility modules.
//!
//! ```text
//! encoding
//!   decode_text()  BOM sniffing, UTF-8/UTF-16 --> UTF-8
//! fs
//!   walk:  parallel_walk(), find_files(), WalkOptions
//! ```

pub mod encoding;
pub mod fs;
