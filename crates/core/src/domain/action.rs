/// A named bulk action applied to a selection of raw, root-relative paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRequest {
    pub action: String,
    pub paths: Vec<String>,
}

impl ActionRequest {
    pub fn new(action: impl Into<String>, paths: Vec<String>) -> Self {
        Self {
            action: action.into(),
            paths,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionStatus {
    Success,
    Skipped,
    Failed,
}

/// Outcome of a bulk action for one selected path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResult {
    pub path: String,
    pub status: ActionStatus,
    pub message: Option<String>,
}

impl ActionResult {
    pub fn success(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            status: ActionStatus::Success,
            message: None,
        }
    }

    pub fn skipped(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            status: ActionStatus::Skipped,
            message: Some(message.into()),
        }
    }

    pub fn failed(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            status: ActionStatus::Failed,
            message: Some(message.into()),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Success,
    Partial,
}

impl ActionOutcome {
    /// `Success` only when every item succeeded.
    pub fn of(results: &[ActionResult]) -> Self {
        if results
            .iter()
            .all(|result| result.status == ActionStatus::Success)
        {
            Self::Success
        } else {
            Self::Partial
        }
    }
}
