use std::fmt;

use serde::Serialize;

/// A single field-level disagreement between the parsed source and the
/// database. Never fatal on its own; the verifier collects every one it
/// finds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mismatch {
    /// Table-ish entity name: `mobile`, `object`, `room`, `exit`, ...
    pub entity: &'static str,
    /// Record key, usually the vnum; child rows append their position.
    pub key: String,
    pub field: String,
    pub expected: String,
    pub actual: String,
}

impl Mismatch {
    pub fn new(
        entity: &'static str,
        key: impl Into<String>,
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Mismatch {
            entity,
            key: key.into(),
            field: field.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} field {}: expected {:?}, actual {:?}",
            self.entity, self.key, self.field, self.expected, self.actual
        )
    }
}

/// Verification outcome for one area file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifyReport {
    pub file_name: String,
    pub mismatches: Vec<Mismatch>,
}

impl VerifyReport {
    pub fn passed(&self) -> bool {
        self.mismatches.is_empty()
    }
}

impl fmt::Display for VerifyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.passed() {
            write!(f, "PASS  {}", self.file_name)
        } else {
            writeln!(f, "FAIL  {} ({} mismatches)", self.file_name, self.mismatches.len())?;
            for mismatch in &self.mismatches {
                writeln!(f, "      {mismatch}")?;
            }
            Ok(())
        }
    }
}
