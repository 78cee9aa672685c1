//! Classification of inbound message text.

/// What an inbound message asks the relay to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<'a> {
    /// `/start`: reply with the welcome text.
    Start,
    /// `/clear`: drop the chat's history.
    Clear,
    /// Anything else is relayed to the completion service.
    Message(&'a str),
}

impl<'a> Command<'a> {
    /// Classify `text`. Commands match the whole text, ignoring letter case.
    pub fn parse(text: &'a str) -> Self {
        match text.to_uppercase().as_str() {
            "/START" => Command::Start,
            "/CLEAR" => Command::Clear,
            _ => Command::Message(text),
        }
    }
}
