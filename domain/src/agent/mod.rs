//! Agent entities and turn decoding

pub mod decoder;
pub mod entities;
pub mod model_params;

pub use decoder::{DecodedTurn, JsonTurnDecoder, NativeTurnDecoder, TurnDecoder};
pub use entities::{AgentDefinition, AgentStatus, ConversationState, Message, Role};
pub use model_params::ModelParams;
