use std::fmt;

/// Which path produced a chat reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    /// Generated by the remote chat model.
    OpenAi,
    /// Keyword responder; no chat client was configured.
    Fallback,
    /// Keyword responder; the remote call failed.
    Error,
}

impl ReplySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReplySource::OpenAi => "openai",
            ReplySource::Fallback => "fallback",
            ReplySource::Error => "error",
        }
    }
}

impl fmt::Display for ReplySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatReply {
    pub text: String,
    pub model: String,
    pub tokens_used: u32,
    pub source: ReplySource,
}
