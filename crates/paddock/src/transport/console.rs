//! Local console transport.
//!
//! One fixed user types commands (`/race`) or button data (`role:owner`);
//! replies are printed with their buttons:
//!
//! ```text
//! > /start
//! Welcome to Paddock, the horse racing game!
//! Choose your role to get started:
//!   [Horse Owner] role:owner   [Jockey] role:jockey
//! ```

use paddock_shared::{Callback, ChatId, ChatUser, Command, Inbound, Outbound, Payload};
use tokio::io::{
    AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Lines, Stdin, Stdout,
};

use super::ChatTransport;
use crate::error::TransportError;

/// Chat id used for the console user.
pub const CONSOLE_CHAT: ChatId = 1;

/// Line-oriented transport over any async reader and writer.
pub struct ConsoleTransport<R, W> {
    lines: Lines<R>,
    writer: W,
    user: ChatUser,
}

impl ConsoleTransport<BufReader<Stdin>, Stdout> {
    /// Console on the process's stdin and stdout.
    #[must_use]
    pub fn stdio(user: ChatUser) -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout(), user)
    }
}

impl<R, W> ConsoleTransport<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Console over `reader` and `writer`.
    pub fn new(reader: R, writer: W, user: ChatUser) -> Self {
        Self {
            lines: reader.lines(),
            writer,
            user,
        }
    }

    /// The output written so far.
    pub fn writer(&self) -> &W {
        &self.writer
    }
}

fn parse_line(line: &str) -> Option<Payload> {
    let line = line.trim();
    if let Some(command) = Command::parse(line) {
        return Some(Payload::Command(command));
    }
    Callback::parse(line).map(|_| Payload::Callback {
        query_id: None,
        data: line.to_owned(),
    })
}

/// Renders a reply as console text.
#[must_use]
pub fn render(message: &Outbound) -> String {
    let mut out = message.text.clone();
    for row in &message.keyboard {
        let buttons: Vec<String> = row
            .iter()
            .map(|b| format!("[{}] {}", b.label, b.data))
            .collect();
        out.push_str("\n  ");
        out.push_str(&buttons.join("   "));
    }
    out.push('\n');
    out
}

impl<R, W> ChatTransport for ConsoleTransport<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    async fn poll(&mut self) -> Result<Option<Vec<Inbound>>, TransportError> {
        loop {
            self.writer.write_all(b"> ").await?;
            self.writer.flush().await?;

            let Some(line) = self.lines.next_line().await? else {
                return Ok(None);
            };
            if line.trim().is_empty() {
                continue;
            }
            if let Some(payload) = parse_line(&line) {
                return Ok(Some(vec![Inbound {
                    chat_id: CONSOLE_CHAT,
                    user: self.user.clone(),
                    payload,
                }]));
            }
            self.writer
                .write_all(b"Type a /command or button data such as role:owner.\n")
                .await?;
        }
    }

    async fn send(&mut self, message: &Outbound) -> Result<(), TransportError> {
        self.writer.write_all(render(message).as_bytes()).await?;
        self.writer.flush().await?;
        Ok(())
    }

    async fn acknowledge(&mut self, _callback_id: &str) -> Result<(), TransportError> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "console"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paddock_shared::{Button, Role};

    fn console(input: &'static str) -> ConsoleTransport<&'static [u8], Vec<u8>> {
        let user = ChatUser {
            id: 1,
            display_name: "local".into(),
        };
        ConsoleTransport::new(input.as_bytes(), Vec::new(), user)
    }

    #[tokio::test]
    async fn test_reads_commands_and_callbacks_until_eof() {
        let mut transport = console("/start\n\nhello\nrole:jockey\n");

        let first = transport.poll().await.unwrap().unwrap();
        assert_eq!(first[0].payload, Payload::Command(Command::Start));

        let second = transport.poll().await.unwrap().unwrap();
        assert_eq!(
            second[0].payload,
            Payload::Callback { query_id: None, data: "role:jockey".into() }
        );
        let output = String::from_utf8(transport.writer().clone()).unwrap();
        assert!(output.contains("Type a /command"));

        assert!(transport.poll().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_send_prints_text_and_buttons() {
        let mut transport = console("");
        let reply = Outbound::text(CONSOLE_CHAT, "Pick").with_keyboard(vec![vec![
            Button::new("Jockey", &Callback::ChooseRole(Role::Jockey)),
            Button::new("Trainer", &Callback::ChooseRole(Role::Trainer)),
        ]]);
        transport.send(&reply).await.unwrap();

        let output = String::from_utf8(transport.writer().clone()).unwrap();
        assert_eq!(output, "Pick\n  [Jockey] role:jockey   [Trainer] role:trainer\n");
    }
}
