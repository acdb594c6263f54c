//! # Command Handlers
//!
//! Turns one [`Inbound`] update into the replies to send.
//!
//! | Input | Effect |
//! |-------|--------|
//! | `/start` | role menu, or welcome back |
//! | `role:<role>` | enrollment |
//! | `/profile` `/horses` `/market` `/tracks` | read-only listings |
//! | `buy:<horse>` | refused: purchases are not open |
//! | `/race` | today's race, once per day |
//! | `/ride <horse>` | jockey books a ride |
//! | `/help`, anything else | static text |
//!
//! Game-rule refusals become replies. Only an inconsistent store surfaces as
//! an error.

use std::sync::Arc;

use chrono::NaiveDate;
use paddock_core::{enroll, CoreError, GameStore};
use paddock_race::{RaceDay, RaceDayError, RaceSimulator};
use paddock_shared::{
    Button, Callback, ChatId, ChatUser, Command, Inbound, Outbound, Payload, Role,
    MARKET_PAGE_SIZE,
};
use parking_lot::Mutex;

use crate::error::BotResult;
use crate::events::{GameEvent, EventSender};
use crate::format;

/// Routes updates to handlers. Shared by reference; `Send + Sync`.
pub struct Dispatcher {
    store: Arc<GameStore>,
    simulator: Mutex<RaceSimulator>,
    race_day: RaceDay,
    events: EventSender,
}

impl Dispatcher {
    /// Creates a dispatcher over a shared store.
    #[must_use]
    pub fn new(
        store: Arc<GameStore>,
        simulator: RaceSimulator,
        race_day: RaceDay,
        events: EventSender,
    ) -> Self {
        Self {
            store,
            simulator: Mutex::new(simulator),
            race_day,
            events,
        }
    }

    /// The shared store.
    #[must_use]
    pub fn store(&self) -> &Arc<GameStore> {
        &self.store
    }

    /// Handles one update. `today` drives the daily race gate.
    ///
    /// # Errors
    ///
    /// Only when the store is inconsistent; user mistakes become replies.
    pub fn handle(&self, inbound: &Inbound, today: NaiveDate) -> BotResult<Vec<Outbound>> {
        let chat = inbound.chat_id;
        let reply = match &inbound.payload {
            Payload::Command(command) => {
                tracing::debug!(chat, user = inbound.user.id, ?command, "command");
                self.command(chat, &inbound.user, command, today)?
            }
            Payload::Callback { data, .. } => {
                tracing::debug!(chat, user = inbound.user.id, %data, "callback");
                match Callback::parse(data) {
                    Some(Callback::ChooseRole(role)) => self.choose_role(chat, &inbound.user, role),
                    Some(Callback::Buy(horse)) => self.buy(chat, &horse),
                    None => Outbound::text(chat, format::STALE_BUTTON),
                }
            }
        };
        Ok(vec![reply])
    }

    fn command(
        &self,
        chat: ChatId,
        user: &ChatUser,
        command: &Command,
        today: NaiveDate,
    ) -> BotResult<Outbound> {
        Ok(match command {
            Command::Start => self.start(chat, user),
            Command::Profile => self.profile(chat, user),
            Command::Horses => self.horses(chat, user),
            Command::Market => self.market(chat),
            Command::Tracks => Outbound::text(chat, format::tracks(&self.store.read())),
            Command::Race => self.race(chat, today)?,
            Command::Ride(horse) => self.ride(chat, user, horse)?,
            Command::Help => Outbound::text(chat, format::HELP),
            Command::Unknown(_) => Outbound::text(chat, format::UNKNOWN),
        })
    }

    fn start(&self, chat: ChatId, user: &ChatUser) -> Outbound {
        if let Some(player) = self.store.read().get_player(user.id) {
            return Outbound::text(chat, format::welcome_back(player));
        }
        Outbound::text(chat, format::WELCOME).with_keyboard(role_menu())
    }

    fn choose_role(&self, chat: ChatId, user: &ChatUser, role: Role) -> Outbound {
        match self.store.transact(|state| enroll(state, user, role)) {
            Ok(enrollment) => {
                tracing::info!(user = user.id, %role, "player joined");
                self.events.send(GameEvent::PlayerJoined {
                    user_id: user.id,
                    role,
                });
                if let Some(horse) = &enrollment.horse {
                    self.events.send(GameEvent::HorseGranted {
                        user_id: user.id,
                        horse: horse.clone(),
                    });
                }
                if let Some(track) = &enrollment.track {
                    self.events.send(GameEvent::TrackGranted {
                        user_id: user.id,
                        track: track.clone(),
                    });
                }
                Outbound::text(chat, format::enrolled(&user.display_name, &enrollment))
            }
            Err(CoreError::AlreadyRegistered { role, .. }) => {
                Outbound::text(chat, format::already_joined(role))
            }
            Err(other) => {
                tracing::warn!(user = user.id, error = %other, "enrollment refused");
                Outbound::text(chat, format::STALE_BUTTON)
            }
        }
    }

    fn profile(&self, chat: ChatId, user: &ChatUser) -> Outbound {
        let state = self.store.read();
        let text = state
            .get_player(user.id)
            .map_or_else(|| format::NOT_JOINED.to_owned(), format::profile);
        Outbound::text(chat, text)
    }

    fn horses(&self, chat: ChatId, user: &ChatUser) -> Outbound {
        let state = self.store.read();
        if state.get_player(user.id).is_none() {
            return Outbound::text(chat, format::NOT_JOINED);
        }
        Outbound::text(chat, format::stable(&state.horses_owned_by(user.id)))
    }

    fn market(&self, chat: ChatId) -> Outbound {
        let state = self.store.read();
        let mut listings = state.list_unowned_horses();
        listings.truncate(MARKET_PAGE_SIZE);

        let buttons: Vec<Vec<Button>> = listings
            .iter()
            .map(|h| {
                vec![Button::new(
                    format!("Buy {}", h.name),
                    &Callback::Buy(h.name.clone()),
                )]
            })
            .collect();
        Outbound::text(chat, format::market(&listings)).with_keyboard(buttons)
    }

    fn buy(&self, chat: ChatId, horse: &str) -> Outbound {
        tracing::debug!(%horse, "purchase requested while the market is closed");
        Outbound::text(chat, format::PURCHASES_CLOSED)
    }

    fn race(&self, chat: ChatId, today: NaiveDate) -> BotResult<Outbound> {
        let mut state = self.store.write();
        let result = {
            let mut simulator = self.simulator.lock();
            self.race_day.run(&mut state, today, &mut simulator)
        };

        let text = match result {
            Ok(card) => {
                if let Some(winner) = card.outcome.winner() {
                    self.events.send(GameEvent::RaceRun {
                        date: card.date,
                        track: card.track.name.clone(),
                        winner: winner.horse.clone(),
                        runners: card.field_size,
                    });
                }
                format::race_card(&state, &card)
            }
            Err(RaceDayError::AlreadyRunToday(_)) => format::already_raced(),
            Err(RaceDayError::NotEnoughRunners { eligible, required }) => {
                format::not_enough_runners(eligible, required)
            }
            Err(RaceDayError::NoTracks) => format::no_tracks(),
            Err(RaceDayError::Core(err)) => return Err(err.into()),
        };
        Ok(Outbound::text(chat, text))
    }

    fn ride(&self, chat: ChatId, user: &ChatUser, horse: &str) -> BotResult<Outbound> {
        if horse.is_empty() {
            return Ok(Outbound::text(chat, format::RIDE_USAGE));
        }

        let text = match self.store.transact(|state| state.book_jockey(horse, user.id)) {
            Ok(()) => {
                tracing::info!(user = user.id, %horse, "ride booked");
                self.events.send(GameEvent::JockeyBooked {
                    user_id: user.id,
                    horse: horse.to_owned(),
                });
                format::ride_booked(horse)
            }
            Err(CoreError::UnknownPlayer(_)) => format::NOT_JOINED.to_owned(),
            Err(CoreError::NotAJockey { role, .. }) => {
                format!("Only jockeys can book rides; you joined as {}.", role.title())
            }
            Err(CoreError::UnknownHorse(name)) => format!("There is no horse called {name}."),
            Err(CoreError::RideTaken { horse, .. }) => {
                format!("Another jockey is already booked on {horse}.")
            }
            Err(other) => return Err(other.into()),
        };
        Ok(Outbound::text(chat, text))
    }
}

/// The four role buttons, two per row.
#[must_use]
pub fn role_menu() -> Vec<Vec<Button>> {
    Role::ALL
        .chunks(2)
        .map(|row| {
            row.iter()
                .map(|&role| Button::new(role.title(), &Callback::ChooseRole(role)))
                .collect()
        })
        .collect()
}
