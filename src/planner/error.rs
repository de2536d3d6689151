use std::fmt;

use thiserror::Error;

use crate::models::PlanErrorEntry;

pub type PlanResult<T> = Result<T, PlanError>;

/// Reasons an allocation pass is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("unknown switch model: {0}")]
    UnknownTopology(String),

    /// Bad manual override, range, factor, or missing field
    #[error("{type_name}: {reason}")]
    InputValidation { type_name: String, reason: String },

    #[error("{type_name}: {reason}")]
    Capacity { type_name: String, reason: String },

    #[error("{type_name}: slice {slice} has {free} free ports but its share is {share} (short by {})", .share - .free)]
    SliceShortfall {
        type_name: String,
        slice: usize,
        free: usize,
        share: usize,
    },

    #[error("port {port} claimed by both {first} and {second}")]
    OverlapConflict {
        port: u16,
        first: String,
        second: String,
    },
}

impl PlanError {
    pub fn invalid(type_name: &str, reason: impl Into<String>) -> Self {
        Self::InputValidation {
            type_name: type_name.to_string(),
            reason: reason.into(),
        }
    }

    pub fn capacity(type_name: &str, reason: impl Into<String>) -> Self {
        Self::Capacity {
            type_name: type_name.to_string(),
            reason: reason.into(),
        }
    }

    /// Stable category name used in API responses
    pub fn kind(&self) -> &'static str {
        match self {
            PlanError::UnknownTopology(_) | PlanError::InputValidation { .. } => "input_validation",
            PlanError::Capacity { .. } | PlanError::SliceShortfall { .. } => "capacity",
            PlanError::OverlapConflict { .. } => "overlap_conflict",
        }
    }
}

/// ErrorSet batches every error found in one rejected pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorSet(Vec<PlanError>);

impl ErrorSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, err: PlanError) {
        self.0.push(err);
    }

    pub fn extend(&mut self, errs: impl IntoIterator<Item = PlanError>) {
        self.0.extend(errs);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn errors(&self) -> &[PlanError] {
        &self.0
    }

    pub fn entries(&self) -> Vec<PlanErrorEntry> {
        self.0
            .iter()
            .map(|e| PlanErrorEntry {
                kind: e.kind(),
                message: e.to_string(),
            })
            .collect()
    }

    /// Ok when nothing was recorded
    pub fn into_result(self) -> Result<(), ErrorSet> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<PlanError> for ErrorSet {
    fn from(err: PlanError) -> Self {
        Self(vec![err])
    }
}

impl fmt::Display for ErrorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(|e| e.to_string()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ErrorSet {}
