//! # Chat Protocol
//!
//! Transport-neutral messages exchanged between a chat transport and the
//! command handlers.
//!
//! ```text
//! Transport ──Inbound──> Dispatcher ──Outbound──> Transport
//!              │                         │
//!              ├─ Command (/race)        ├─ text
//!              └─ Callback (role:owner)  └─ button rows
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::kinds::Role;

/// Chat (conversation) identifier.
pub type ChatId = i64;

/// User identifier, unique per chat platform account.
pub type UserId = i64;

/// The person who sent an update.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatUser {
    /// Platform user id.
    pub id: UserId,
    /// Name shown in replies.
    pub display_name: String,
}

/// A slash command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// `/start` - join or greet.
    Start,
    /// `/profile` - player summary.
    Profile,
    /// `/horses` - owned horses.
    Horses,
    /// `/market` - unowned horses.
    Market,
    /// `/tracks` - every track.
    Tracks,
    /// `/race` - run today's race.
    Race,
    /// `/ride <horse>` - book a ride as a jockey.
    Ride(String),
    /// `/help` - command list.
    Help,
    /// Anything else that starts with a slash.
    Unknown(String),
}

impl Command {
    /// Parses message text into a command.
    ///
    /// Returns `None` when the text is not a command at all. A `@botname`
    /// suffix on the command word is ignored.
    ///
    /// ```
    /// use paddock_shared::Command;
    ///
    /// assert_eq!(Command::parse("/race"), Some(Command::Race));
    /// assert_eq!(Command::parse("/ride@paddock_bot Thunder Road"),
    ///            Some(Command::Ride("Thunder Road".into())));
    /// assert_eq!(Command::parse("hello"), None);
    /// ```
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let rest = text.strip_prefix('/')?;
        let (word, args) = match rest.split_once(char::is_whitespace) {
            Some((word, args)) => (word, args.trim()),
            None => (rest, ""),
        };
        let word = word.split('@').next().unwrap_or(word);

        let command = match word.to_ascii_lowercase().as_str() {
            "start" => Self::Start,
            "profile" => Self::Profile,
            "horses" => Self::Horses,
            "market" => Self::Market,
            "tracks" => Self::Tracks,
            "race" => Self::Race,
            "ride" => Self::Ride(args.to_owned()),
            "help" => Self::Help,
            _ => Self::Unknown(word.to_owned()),
        };
        Some(command)
    }
}

/// A button press, encoded as `<kind>:<value>` callback data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Callback {
    /// Role chosen from the `/start` menu.
    ChooseRole(Role),
    /// Buy button next to a market listing.
    Buy(String),
}

impl Callback {
    const ROLE_PREFIX: &'static str = "role:";
    const BUY_PREFIX: &'static str = "buy:";

    /// Decodes callback data. Returns `None` for unknown payloads.
    #[must_use]
    pub fn parse(data: &str) -> Option<Self> {
        if let Some(role) = data.strip_prefix(Self::ROLE_PREFIX) {
            return role.parse().ok().map(Self::ChooseRole);
        }
        if let Some(horse) = data.strip_prefix(Self::BUY_PREFIX) {
            if horse.is_empty() {
                return None;
            }
            return Some(Self::Buy(horse.to_owned()));
        }
        None
    }

    /// Encodes the callback as button data.
    #[must_use]
    pub fn encode(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ChooseRole(role) => write!(f, "{}{}", Self::ROLE_PREFIX, role.as_str()),
            Self::Buy(horse) => write!(f, "{}{horse}", Self::BUY_PREFIX),
        }
    }
}

/// What an inbound update carries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Payload {
    /// A slash command typed by the user.
    Command(Command),
    /// A button press.
    Callback {
        /// Transport-specific id to acknowledge, if the platform needs one.
        query_id: Option<String>,
        /// Raw callback data.
        data: String,
    },
}

/// One update delivered by a transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Inbound {
    /// Chat to reply into.
    pub chat_id: ChatId,
    /// Sender.
    pub user: ChatUser,
    /// Command or callback.
    pub payload: Payload,
}

/// An inline button.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    /// Text on the button.
    pub label: String,
    /// Callback data sent back when pressed.
    pub data: String,
}

impl Button {
    /// Creates a button that sends `callback` when pressed.
    #[must_use]
    pub fn new(label: impl Into<String>, callback: &Callback) -> Self {
        Self {
            label: label.into(),
            data: callback.encode(),
        }
    }
}

/// A reply to send.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outbound {
    /// Destination chat.
    pub chat_id: ChatId,
    /// Message body.
    pub text: String,
    /// Button rows, empty for plain text.
    pub keyboard: Vec<Vec<Button>>,
}

impl Outbound {
    /// Creates a plain text reply.
    #[must_use]
    pub fn text(chat_id: ChatId, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: text.into(),
            keyboard: Vec::new(),
        }
    }

    /// Attaches button rows.
    #[must_use]
    pub fn with_keyboard(mut self, keyboard: Vec<Vec<Button>>) -> Self {
        self.keyboard = keyboard;
        self
    }
}
