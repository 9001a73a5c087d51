// Normalized inbound command event.
//
// The gateway adapter flattens a platform interaction into this shape before
// dispatch, so core code and tests never touch SDK types. Option values keep
// their declared type; accessors return `None` on a missing name or a type
// mismatch and handlers turn that into a validation error.

/// A typed option value extracted from the interaction payload.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    String(String),
    Integer(i64),
    Boolean(bool),
    /// User id of a user-type option.
    User(u64),
    /// Channel id of a channel-type option.
    Channel(u64),
}

/// One incoming command invocation, normalized.
#[derive(Debug, Clone)]
pub struct Invocation {
    /// Lowercased command name.
    pub command: String,
    pub subcommand: Option<String>,
    pub options: Vec<(String, OptionValue)>,
    pub user_id: u64,
    pub user_name: String,
    pub channel_id: u64,
    pub guild_id: Option<u64>,
}

impl Invocation {
    pub fn new(command: &str, user_id: u64, channel_id: u64) -> Self {
        Self {
            command: command.to_lowercase(),
            subcommand: None,
            options: Vec::new(),
            user_id,
            user_name: String::new(),
            channel_id,
            guild_id: None,
        }
    }

    pub fn with_subcommand(mut self, name: &str) -> Self {
        self.subcommand = Some(name.to_lowercase());
        self
    }

    pub fn with_option(mut self, name: &str, value: OptionValue) -> Self {
        self.options.push((name.to_string(), value));
        self
    }

    pub fn with_guild(mut self, guild_id: u64) -> Self {
        self.guild_id = Some(guild_id);
        self
    }

    pub fn with_user_name(mut self, name: &str) -> Self {
        self.user_name = name.to_string();
        self
    }

    pub fn option(&self, name: &str) -> Option<&OptionValue> {
        self.options
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn str_opt(&self, name: &str) -> Option<&str> {
        match self.option(name) {
            Some(OptionValue::String(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn int_opt(&self, name: &str) -> Option<i64> {
        match self.option(name) {
            Some(OptionValue::Integer(i)) => Some(*i),
            _ => None,
        }
    }

    pub fn bool_opt(&self, name: &str) -> Option<bool> {
        match self.option(name) {
            Some(OptionValue::Boolean(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn user_opt(&self, name: &str) -> Option<u64> {
        match self.option(name) {
            Some(OptionValue::User(id)) => Some(*id),
            _ => None,
        }
    }

    pub fn channel_opt(&self, name: &str) -> Option<u64> {
        match self.option(name) {
            Some(OptionValue::Channel(id)) => Some(*id),
            _ => None,
        }
    }
}
