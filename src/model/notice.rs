//! Validation notices - rejections and advisories surfaced to the user

use serde::{Deserialize, Serialize};

/// What a notice is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    /// Part type does not fit the targeted mount node
    SlotMismatch,
    /// CPU socket differs from the installed motherboard's socket
    SocketMismatch,
    /// A part of an exclusive type is already installed
    DuplicateCategory,
    /// Total draw exceeds the installed PSU's rated maximum
    PowerOverload,
    /// The part catalog could not be read
    CatalogUnavailable,
    /// A build document could not be written
    SaveFailed,
}

impl std::fmt::Display for NoticeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoticeKind::SlotMismatch => write!(f, "slot_mismatch"),
            NoticeKind::SocketMismatch => write!(f, "socket_mismatch"),
            NoticeKind::DuplicateCategory => write!(f, "duplicate_category"),
            NoticeKind::PowerOverload => write!(f, "power_overload"),
            NoticeKind::CatalogUnavailable => write!(f, "catalog_unavailable"),
            NoticeKind::SaveFailed => write!(f, "save_failed"),
        }
    }
}

/// Notice severity
///
/// Severity is a display attribute, not a blocking attribute: whether a
/// notice blocks an install is decided by the validation sequence, not by
/// its severity (a `duplicate_category` warning blocks, a `power_overload`
/// critical does not).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "warning" => Ok(Severity::Warning),
            "error" => Ok(Severity::Error),
            "critical" => Ok(Severity::Critical),
            _ => Err(format!("Unknown severity: {}", s)),
        }
    }
}

/// A rejection or advisory produced by a build operation.
///
/// Notices are plain data, never panics: a rejected install returns one
/// notice and leaves the build untouched. Pending notices live on the
/// session until explicitly cleared or until the next removal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub severity: Severity,
}

impl Notice {
    pub fn new(kind: NoticeKind, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            severity,
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.kind, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_kind_wire_format() {
        let json = serde_json::to_string(&NoticeKind::SlotMismatch).unwrap();
        assert_eq!(json, "\"slot_mismatch\"");
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Warning < Severity::Error);
        assert!(Severity::Error < Severity::Critical);
    }

    #[test]
    fn test_severity_parse() {
        assert_eq!("CRITICAL".parse::<Severity>().unwrap(), Severity::Critical);
        assert!("fatal".parse::<Severity>().is_err());
    }
}
