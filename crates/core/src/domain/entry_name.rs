use std::fmt;

use super::DomainError;

/// A single directory member name: no separators, never `.` or `..`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryName(String);

impl EntryName {
    const RESERVED_DEVICE_NAMES: [&'static str; 22] = [
        "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7",
        "COM8", "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
    ];

    /// Validates a name exactly as given; surrounding whitespace is kept.
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();

        if value.trim().is_empty() {
            return Err(DomainError::EmptyName);
        }

        if value.contains(['/', '\\']) {
            return Err(DomainError::NameContainsSeparator(value));
        }

        if value == "." || value == ".." || value.contains('\0') {
            return Err(DomainError::ReservedName(value));
        }

        Ok(Self(value))
    }

    /// Stricter check for names that arrive with uploaded files: device
    /// names such as `CON` or `lpt1.txt` are refused on every platform.
    pub fn for_upload(value: impl Into<String>) -> Result<Self, DomainError> {
        let name = Self::new(value)?;

        let stem = name.0.split('.').next().unwrap_or_default();
        if Self::RESERVED_DEVICE_NAMES
            .iter()
            .any(|reserved| reserved.eq_ignore_ascii_case(stem.trim_end()))
        {
            return Err(DomainError::ReservedName(name.0));
        }

        Ok(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
