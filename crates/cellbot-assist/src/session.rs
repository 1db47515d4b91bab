//! Agent session state
//!
//! Multi-step requests are tracked per session: the session owns the plan
//! and its progress, and callers hold one session per in-flight request
//! rather than sharing mutable global state.

use serde::{Deserialize, Serialize};

/// Where a session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    #[default]
    Idle,
    Planning,
    Executing,
    Complete,
}

/// One planned step and its outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentStep {
    pub description: String,
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
}

impl AgentStep {
    pub fn new<S: Into<String>>(description: S) -> Self {
        AgentStep {
            description: description.into(),
            completed: false,
            result: None,
        }
    }
}

/// Planning state for a single assistant request
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentSession {
    pub thinking: String,
    pub status: AgentStatus,
    pub steps: Vec<AgentStep>,
    pub original_query: String,
}

impl AgentSession {
    /// Start a fresh session for a user query
    pub fn new<S: Into<String>>(query: S) -> Self {
        AgentSession {
            original_query: query.into(),
            ..AgentSession::default()
        }
    }

    /// Replace the visible reasoning text
    pub fn set_thinking<S: Into<String>>(&mut self, thinking: S) {
        self.thinking = thinking.into();
    }

    pub fn set_status(&mut self, status: AgentStatus) {
        self.status = status;
    }

    /// Install a plan and move to the executing phase
    pub fn plan<S: Into<String>, I: IntoIterator<Item = S>>(&mut self, descriptions: I) {
        self.steps = descriptions.into_iter().map(AgentStep::new).collect();
        self.status = AgentStatus::Executing;
    }

    /// Attach a result to a step; out-of-range indices are ignored
    pub fn record_step_result<S: Into<String>>(&mut self, index: usize, result: S) {
        if let Some(step) = self.steps.get_mut(index) {
            step.result = Some(result.into());
        }
    }

    /// Mark a step done; completes the session once every step is done
    pub fn complete_step(&mut self, index: usize) {
        if let Some(step) = self.steps.get_mut(index) {
            step.completed = true;
        }
        if !self.steps.is_empty() && self.steps.iter().all(|s| s.completed) {
            self.status = AgentStatus::Complete;
        }
    }

    pub fn is_complete(&self) -> bool {
        self.status == AgentStatus::Complete
    }

    /// Back to the idle state, keeping nothing
    pub fn reset(&mut self) {
        *self = AgentSession::default();
    }
}
