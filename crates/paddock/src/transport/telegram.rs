//! Telegram Bot API transport.
//!
//! - `getUpdates` long poll with offset tracking
//! - `sendMessage` with inline keyboards
//! - `answerCallbackQuery` for button presses
//!
//! The API answers errors with a JSON envelope (`ok: false`) on any status,
//! so every body is decoded before the status is considered.

use paddock_shared::{Button, ChatUser, Command, Inbound, Outbound, Payload};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

use super::ChatTransport;
use crate::config::TelegramConfig;
use crate::error::TransportError;

/// Response envelope shared by every Bot API method.
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    error_code: Option<i64>,
}

impl<T> ApiResponse<T> {
    fn into_result(self) -> Result<T, TransportError> {
        match (self.ok, self.result) {
            (true, Some(result)) => Ok(result),
            _ => Err(TransportError::Api {
                code: self.error_code.unwrap_or(0),
                description: self
                    .description
                    .unwrap_or_else(|| "no description".to_owned()),
            }),
        }
    }
}

/// One entry of a `getUpdates` result.
#[derive(Debug, Deserialize)]
pub struct Update {
    /// Monotonic update id.
    pub update_id: i64,
    #[serde(default)]
    message: Option<Message>,
    #[serde(default)]
    callback_query: Option<CallbackQuery>,
}

#[derive(Debug, Deserialize)]
struct Message {
    chat: Chat,
    #[serde(default)]
    from: Option<User>,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Chat {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct User {
    id: i64,
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: Option<String>,
    #[serde(default)]
    username: Option<String>,
}

impl User {
    fn into_chat_user(self) -> ChatUser {
        let mut display_name = self.first_name;
        if let Some(last) = self.last_name {
            if !display_name.is_empty() {
                display_name.push(' ');
            }
            display_name.push_str(&last);
        }
        if display_name.trim().is_empty() {
            display_name = self.username.unwrap_or_else(|| format!("user{}", self.id));
        }
        ChatUser {
            id: self.id,
            display_name,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CallbackQuery {
    id: String,
    from: User,
    #[serde(default)]
    message: Option<Message>,
    #[serde(default)]
    data: Option<String>,
}

impl Update {
    /// Converts to an inbound message. Non-command text, service messages and
    /// buttons without data yield `None`.
    #[must_use]
    pub fn into_inbound(self) -> Option<Inbound> {
        if let Some(query) = self.callback_query {
            let data = query.data?;
            let user = query.from.into_chat_user();
            let chat_id = query.message.map_or(user.id, |m| m.chat.id);
            return Some(Inbound {
                chat_id,
                user,
                payload: Payload::Callback {
                    query_id: Some(query.id),
                    data,
                },
            });
        }

        let message = self.message?;
        let command = Command::parse(message.text.as_deref()?)?;
        let user = message.from?.into_chat_user();
        Some(Inbound {
            chat_id: message.chat.id,
            user,
            payload: Payload::Command(command),
        })
    }
}

/// `reply_markup` for an inline keyboard.
fn inline_keyboard(rows: &[Vec<Button>]) -> Value {
    let rows: Vec<Vec<Value>> = rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|b| json!({ "text": b.label, "callback_data": b.data }))
                .collect()
        })
        .collect();
    json!({ "inline_keyboard": rows })
}

/// `sendMessage` request body.
#[must_use]
pub fn send_message_body(message: &Outbound) -> Value {
    let mut body = json!({
        "chat_id": message.chat_id,
        "text": message.text,
    });
    if !message.keyboard.is_empty() {
        body["reply_markup"] = inline_keyboard(&message.keyboard);
    }
    body
}

/// Long-polling Bot API client.
pub struct TelegramTransport {
    client: Client,
    api_base: String,
    token: String,
    poll_timeout_secs: u64,
    offset: Option<i64>,
}

impl std::fmt::Debug for TelegramTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramTransport")
            .field("api_base", &self.api_base)
            .field("token", &"[REDACTED]")
            .field("offset", &self.offset)
            .finish_non_exhaustive()
    }
}

impl TelegramTransport {
    /// Builds the HTTP client.
    ///
    /// # Errors
    ///
    /// [`TransportError::MissingToken`] without a token, or
    /// [`TransportError::Http`] if the client cannot be built.
    pub fn new(config: &TelegramConfig) -> Result<Self, TransportError> {
        if config.token.trim().is_empty() {
            return Err(TransportError::MissingToken);
        }
        let client = Client::builder()
            .timeout(config.http_timeout())
            .connect_timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_owned(),
            token: config.token.clone(),
            poll_timeout_secs: config.poll_timeout_secs,
            offset: None,
        })
    }

    fn url(&self, method: &str) -> String {
        format!("{}/bot{}/{method}", self.api_base, self.token)
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, body: &Value) -> Result<T, TransportError> {
        let response = self.client.post(self.url(method)).json(body).send().await?;
        let text = response.text().await?;
        serde_json::from_str::<ApiResponse<T>>(&text)?.into_result()
    }

    /// Fetches updates after the last seen one and advances the offset.
    ///
    /// # Errors
    ///
    /// HTTP, API or decode failures; the offset is unchanged.
    pub async fn get_updates(&mut self) -> Result<Vec<Update>, TransportError> {
        let mut body = json!({
            "timeout": self.poll_timeout_secs,
            "allowed_updates": ["message", "callback_query"],
        });
        if let Some(offset) = self.offset {
            body["offset"] = json!(offset);
        }
        let updates: Vec<Update> = self.call("getUpdates", &body).await?;
        if let Some(last) = updates.iter().map(|u| u.update_id).max() {
            self.offset = Some(last + 1);
        }
        Ok(updates)
    }
}

impl ChatTransport for TelegramTransport {
    async fn poll(&mut self) -> Result<Option<Vec<Inbound>>, TransportError> {
        let updates = self.get_updates().await?;
        tracing::debug!(count = updates.len(), offset = ?self.offset, "updates received");
        Ok(Some(updates.into_iter().filter_map(Update::into_inbound).collect()))
    }

    async fn send(&mut self, message: &Outbound) -> Result<(), TransportError> {
        let _: Value = self.call("sendMessage", &send_message_body(message)).await?;
        Ok(())
    }

    async fn acknowledge(&mut self, callback_id: &str) -> Result<(), TransportError> {
        let _: bool = self
            .call("answerCallbackQuery", &json!({ "callback_query_id": callback_id }))
            .await?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "telegram"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paddock_shared::{Callback, Role};

    fn decode(json: &str) -> Vec<Inbound> {
        let envelope: ApiResponse<Vec<Update>> = serde_json::from_str(json).unwrap();
        envelope
            .into_result()
            .unwrap()
            .into_iter()
            .filter_map(Update::into_inbound)
            .collect()
    }

    #[test]
    fn test_decode_command_message() {
        let inbound = decode(
            r#"{"ok":true,"result":[{"update_id":10,"message":{"message_id":1,
                "from":{"id":42,"is_bot":false,"first_name":"Ada","last_name":"Lovelace"},
                "chat":{"id":-100,"type":"group"},"date":0,"text":"/race@PaddockBot"}}]}"#,
        );
        assert_eq!(
            inbound,
            [Inbound {
                chat_id: -100,
                user: ChatUser { id: 42, display_name: "Ada Lovelace".into() },
                payload: Payload::Command(Command::Race),
            }]
        );
    }

    #[test]
    fn test_decode_callback_query() {
        let inbound = decode(
            r#"{"ok":true,"result":[{"update_id":11,"callback_query":{"id":"cbq-1",
                "from":{"id":7,"is_bot":false,"first_name":"","username":"jo"},
                "message":{"message_id":2,"chat":{"id":7,"type":"private"},"date":0},
                "chat_instance":"x","data":"role:track_owner"}}]}"#,
        );
        assert_eq!(inbound.len(), 1);
        assert_eq!(inbound[0].user.display_name, "jo");
        match &inbound[0].payload {
            Payload::Callback { query_id, data } => {
                assert_eq!(query_id.as_deref(), Some("cbq-1"));
                assert_eq!(Callback::parse(data), Some(Callback::ChooseRole(Role::TrackOwner)));
            }
            other => panic!("unexpected payload {other:?}"),
        }
    }

    #[test]
    fn test_plain_text_and_unknown_updates_are_skipped() {
        let inbound = decode(
            r#"{"ok":true,"result":[
                {"update_id":1,"message":{"chat":{"id":1},"from":{"id":1,"first_name":"A"},"text":"hello"}},
                {"update_id":2,"message":{"chat":{"id":1},"from":{"id":1,"first_name":"A"}}},
                {"update_id":3,"edited_message":{"chat":{"id":1}}}
            ]}"#,
        );
        assert!(inbound.is_empty());
    }

    #[test]
    fn test_api_error_envelope() {
        let envelope: ApiResponse<Vec<Update>> = serde_json::from_str(
            r#"{"ok":false,"error_code":401,"description":"Unauthorized"}"#,
        )
        .unwrap();
        match envelope.into_result() {
            Err(TransportError::Api { code, description }) => {
                assert_eq!(code, 401);
                assert_eq!(description, "Unauthorized");
            }
            other => panic!("expected api error, got {other:?}"),
        }
    }

    #[test]
    fn test_send_message_body_with_keyboard() {
        let message = Outbound::text(5, "Pick one").with_keyboard(vec![vec![Button::new(
            "Jockey",
            &Callback::ChooseRole(Role::Jockey),
        )]]);
        let body = send_message_body(&message);
        assert_eq!(body["chat_id"], 5);
        assert_eq!(body["text"], "Pick one");
        assert_eq!(body["reply_markup"]["inline_keyboard"][0][0]["callback_data"], "role:jockey");
        assert_eq!(body["reply_markup"]["inline_keyboard"][0][0]["text"], "Jockey");

        assert!(send_message_body(&Outbound::text(5, "hi")).get("reply_markup").is_none());
    }

    #[test]
    fn test_missing_token_is_refused() {
        let err = TelegramTransport::new(&TelegramConfig::default()).unwrap_err();
        assert!(matches!(err, TransportError::MissingToken));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = TelegramConfig {
            token: "123:secret".into(),
            ..TelegramConfig::default()
        };
        let transport = TelegramTransport::new(&config).unwrap();
        assert!(!format!("{transport:?}").contains("secret"));
        assert_eq!(transport.url("getMe"), "https://api.telegram.org/bot123:secret/getMe");
    }

    #[tokio::test]
    async fn test_failed_poll_does_not_reveal_token() {
        let config = TelegramConfig {
            token: "123:supersecret".into(),
            api_base: "http://127.0.0.1:1".into(),
            ..TelegramConfig::default()
        };
        let mut transport = TelegramTransport::new(&config).unwrap();

        let err = transport.poll().await.unwrap_err();
        assert!(matches!(err, TransportError::Http(_)), "{err:?}");
        let logged = format!("{err} {err:?}");
        assert!(!logged.contains("supersecret"), "{logged}");
        assert!(transport.offset.is_none());
    }
}
