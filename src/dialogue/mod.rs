//! Dialogue state machine: per-conversation state, validators, prompts and
//! the controller that ties them to the reading pipeline.

pub mod controller;
pub mod prompts;
pub mod session;
pub mod stage;
pub mod validate;

pub use controller::{Dialogue, Flow};
pub use session::{BirthFields, ConversationSession, SessionStore};
pub use stage::Stage;
