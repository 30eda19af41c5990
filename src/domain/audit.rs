//! Audit trail entries

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

/// Kind of action an audit entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditCategory {
    Create,
    Edit,
    Update,
    Print,
}

impl AuditCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "Create",
            Self::Edit => "Edit",
            Self::Update => "Update",
            Self::Print => "Print",
        }
    }
}

impl fmt::Display for AuditCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuditCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Create" => Ok(Self::Create),
            "Edit" => Ok(Self::Edit),
            "Update" => Ok(Self::Update),
            "Print" => Ok(Self::Print),
            other => Err(format!("unknown audit category '{}'", other)),
        }
    }
}

/// One append-only audit row: who did what, for which company.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditEntry {
    pub actor: String,
    pub company: String,
    pub category: AuditCategory,
    pub message: String,
    pub recorded_at: DateTime<Utc>,
}

impl AuditEntry {
    pub fn new(
        actor: impl Into<String>,
        company: impl Into<String>,
        category: AuditCategory,
        message: impl Into<String>,
    ) -> Self {
        Self {
            actor: actor.into(),
            company: company.into(),
            category,
            message: message.into(),
            recorded_at: Utc::now(),
        }
    }
}
