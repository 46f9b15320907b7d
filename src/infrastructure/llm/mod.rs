mod openai_chat_client;

pub use openai_chat_client::{DEFAULT_OPENAI_BASE_URL, OpenAiChatClient};
