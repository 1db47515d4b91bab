//! # cellbot-assist
//!
//! The assistant boundary: everything between a user request and an
//! applied operation that is not the model call itself.
//!
//! - [`SheetContext`] summarizes the active sheet into the compact JSON
//!   shape prompts embed.
//! - [`prompt`] builds the request prompts around the structured-operation
//!   contract the extractor expects.
//! - [`parse_reply`] turns raw assistant text into an [`AssistantReply`],
//!   extracting the operation when one is present.
//! - [`AgentSession`] tracks per-request planning state for multi-step
//!   flows.
//!
//! The network transport is deliberately out of scope; [`AssistError`]
//! is the failure surface a transport implementation reports through.

pub mod context;
pub mod error;
pub mod prompt;
pub mod reply;
pub mod session;

pub use context::{EmptyRegion, SheetContext, MAX_EMPTY_REGIONS, MAX_SAMPLE_ROWS};
pub use error::{AssistError, AssistResult};
pub use prompt::{build_prompt, system_preamble};
pub use reply::{parse_reply, AssistantReply};
pub use session::{AgentSession, AgentStatus, AgentStep};
