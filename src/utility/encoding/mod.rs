// aqi-runner: AQI Training Pipeline Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Text decoding for files written by editors and shells.
//!
//! ```text
//! bytes --(BOM sniff)--> UTF-8 | UTF-16LE | UTF-16BE --> String
//!       --(no BOM)-----> UTF-8 (lossy)
//! ```
//!
//! Uses `encoding_rs`. Invalid sequences → U+FFFD. Windows `PowerShell` 5
//! writes UTF-16LE with a BOM by default, which is why the sniffing matters.

use encoding_rs::UTF_8;

/// Encoding detected while decoding a text file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    /// UTF-8 without a byte order mark.
    #[default]
    Utf8,
    /// UTF-8 with a byte order mark.
    Utf8Bom,
    /// UTF-16 little endian (BOM `FF FE`).
    Utf16Le,
    /// UTF-16 big endian (BOM `FE FF`).
    Utf16Be,
}

impl Encoding {
    /// Returns the display name of the encoding.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Utf8Bom => "utf-8 (bom)",
            Self::Utf16Le => "utf-16le",
            Self::Utf16Be => "utf-16be",
        }
    }
}

impl std::fmt::Display for Encoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of decoding a byte buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    text: String,
    encoding: Encoding,
    had_errors: bool,
}

impl DecodedText {
    /// Returns the decoded text, without any BOM.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Consumes self and returns the decoded text.
    #[must_use]
    pub fn into_text(self) -> String {
        self.text
    }

    /// Returns the encoding that was detected.
    #[must_use]
    pub const fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Returns whether invalid sequences were replaced with U+FFFD.
    #[must_use]
    pub const fn had_errors(&self) -> bool {
        self.had_errors
    }
}

/// Decodes bytes to UTF-8, honoring a leading byte order mark.
///
/// # Example
/// ```
/// use aqi_runner::utility::encoding::{decode_text, Encoding};
///
/// let decoded = decode_text(b"\xFF\xFEA\x00=\x001\x00");
/// assert_eq!(decoded.text(), "A=1");
/// assert_eq!(decoded.encoding(), Encoding::Utf16Le);
/// ```
#[must_use]
pub fn decode_text(bytes: &[u8]) -> DecodedText {
    match encoding_rs::Encoding::for_bom(bytes) {
        Some((encoding, bom_len)) => {
            let (text, had_errors) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
            let detected = if encoding == encoding_rs::UTF_16LE {
                Encoding::Utf16Le
            } else if encoding == encoding_rs::UTF_16BE {
                Encoding::Utf16Be
            } else {
                Encoding::Utf8Bom
            };
            DecodedText {
                text: text.into_owned(),
                encoding: detected,
                had_errors,
            }
        }
        None => {
            let (text, had_errors) = UTF_8.decode_without_bom_handling(bytes);
            DecodedText {
                text: text.into_owned(),
                encoding: Encoding::Utf8,
                had_errors,
            }
        }
    }
}
