// Chat endpoint: keyword intent routing over the profile store, with model
// completions for the projects, skills/tools, and freeform paths.
// All model calls go through llm_client; all profile reads go through profile.

pub mod format;
pub mod handlers;
pub mod intent;
pub mod service;

pub use service::{ChatReply, ChatService};
