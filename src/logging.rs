//! Structured audit logging for key and signature operations
//!
//! The cryptographic primitives themselves are silent; callers that need
//! an audit trail (wallet tooling, services) wrap them and emit entries
//! through [`AuditLogger`]. Entries render as JSON for log pipelines or
//! as plain text for terminals.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Severity of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Detailed diagnostics.
    Debug,
    /// Normal operational events.
    Info,
    /// Unusual but non-fatal conditions.
    Warning,
    /// Operation failures.
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warning => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

/// The operation an entry refers to.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Key-pair generation or conversion.
    KeyGeneration,
    /// Schnorr signing.
    Signing,
    /// Schnorr verification.
    Verification,
    /// Account-address derivation.
    AddressDerivation,
    /// Wallet file export.
    WalletExport,
    /// Wallet file import.
    WalletImport,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::KeyGeneration => write!(f, "KEYGEN"),
            Operation::Signing => write!(f, "SIGN"),
            Operation::Verification => write!(f, "VERIFY"),
            Operation::AddressDerivation => write!(f, "ADDRESS"),
            Operation::WalletExport => write!(f, "WALLET_EXPORT"),
            Operation::WalletImport => write!(f, "WALLET_IMPORT"),
        }
    }
}

/// One structured log entry.
#[derive(Debug)]
pub struct LogEntry {
    timestamp: SystemTime,
    level: LogLevel,
    operation: Operation,
    message: String,
    account: Option<String>,
    success: Option<bool>,
}

impl LogEntry {
    /// Create an entry at the given level for an operation.
    pub fn new(level: LogLevel, operation: Operation, message: String) -> Self {
        Self {
            timestamp: SystemTime::now(),
            level,
            operation,
            message,
            account: None,
            success: None,
        }
    }

    /// Attach the account address the entry concerns.
    ///
    /// Addresses are public; never attach key material here.
    pub fn with_account(mut self, account: String) -> Self {
        self.account = Some(account);
        self
    }

    /// Attach an outcome flag.
    pub fn with_success(mut self, success: bool) -> Self {
        self.success = Some(success);
        self
    }

    fn unix_seconds(&self) -> u64 {
        self.timestamp
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }

    /// Render as a single-line JSON object.
    pub fn to_json(&self) -> String {
        let mut json = format!(
            "{{\"timestamp\":{},\"level\":\"{}\",\"operation\":\"{}\",\"message\":\"{}\"",
            self.unix_seconds(),
            self.level,
            self.operation,
            self.message
        );
        if let Some(ref account) = self.account {
            json.push_str(&format!(",\"account\":\"{account}\""));
        }
        if let Some(success) = self.success {
            json.push_str(&format!(",\"success\":{success}"));
        }
        json.push('}');
        json
    }

    /// Render as human-readable text.
    pub fn to_text(&self) -> String {
        let mut text = format!(
            "[{}] {} {} - {}",
            self.unix_seconds(),
            self.level,
            self.operation,
            self.message
        );
        if let Some(ref account) = self.account {
            text.push_str(&format!(" | account={account}"));
        }
        if let Some(success) = self.success {
            text.push_str(&format!(" | success={success}"));
        }
        text
    }
}

/// Threshold logger writing JSON entries to stderr.
pub struct AuditLogger {
    min_level: LogLevel,
}

impl AuditLogger {
    /// Create a logger that drops entries below `min_level`.
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }

    /// Emit an entry if it clears the threshold.
    pub fn log(&self, entry: LogEntry) {
        if entry.level >= self.min_level {
            eprintln!("{}", entry.to_json());
        }
    }

    /// Log at info level.
    pub fn info(&self, operation: Operation, message: String) {
        self.log(LogEntry::new(LogLevel::Info, operation, message));
    }

    /// Log at error level.
    pub fn error(&self, operation: Operation, message: String) {
        self.log(LogEntry::new(LogLevel::Error, operation, message));
    }
}

impl Default for AuditLogger {
    fn default() -> Self {
        Self::new(LogLevel::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_rendering() {
        let entry = LogEntry::new(
            LogLevel::Info,
            Operation::Signing,
            "signature issued".to_string(),
        )
        .with_account("Ѻ.test".to_string())
        .with_success(true);

        let json = entry.to_json();
        assert!(json.contains("\"level\":\"INFO\""));
        assert!(json.contains("\"operation\":\"SIGN\""));
        assert!(json.contains("\"account\":\"Ѻ.test\""));
        assert!(json.contains("\"success\":true"));
    }

    #[test]
    fn test_text_rendering() {
        let entry = LogEntry::new(
            LogLevel::Error,
            Operation::WalletImport,
            "public key mismatch".to_string(),
        )
        .with_success(false);

        let text = entry.to_text();
        assert!(text.contains("ERROR"));
        assert!(text.contains("WALLET_IMPORT"));
        assert!(text.contains("success=false"));
    }

    #[test]
    fn test_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Warning < LogLevel::Error);
    }
}
