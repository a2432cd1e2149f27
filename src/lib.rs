// aqi-runner: AQI Training Pipeline Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |        train / pipeline / list
//!                +----------+----------+
//!                           v
//!      ,-------------------------------------------,
//!      |  envfile  KEY=VALUE --> Env               |
//!      |  config   TOML + AQI_* + --set, layered   |
//!      '--------------------+----------------------'
//!                           |
//!                           v
//!                         step
//!          registry --> runner (halt on failure)
//!                           |
//!                 +---------+---------+
//!                 v                   v
//!               steps               tools
//!     script/train/artifacts   python, training args
//!
//!   +-----------------------------------------+
//!   |  core   process, env                    |
//!   +-----------------------------------------+
//!   |  foundation   error, logging, utility   |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod core;
pub mod envfile;
pub mod error;
pub mod logging;
pub mod step;
pub mod utility;
