//! Reply text.
//!
//! Plain text only; transports send it verbatim.

use std::fmt::Write as _;

use paddock_core::{Enrollment, GameState, Horse, Player, Track};
use paddock_race::RaceCard;
use paddock_shared::{Role, UserId};

/// Greeting for unregistered users, shown above the role menu.
pub const WELCOME: &str = "Welcome to Paddock, the horse racing game!\n\
     Choose your role to get started:";

/// Static command list.
pub const HELP: &str = "Paddock commands:\n\
     /start - join the game or say hello\n\
     /profile - your player card\n\
     /horses - horses you own\n\
     /market - horses for sale\n\
     /tracks - every track\n\
     /race - run today's race\n\
     /ride <horse> - book yourself to ride a horse (jockeys)\n\
     /help - this list";

/// Reply to anything unrecognised.
pub const UNKNOWN: &str = "Unknown command, try /help.";

/// Reply when a command needs a registered player.
pub const NOT_JOINED: &str = "You have not joined yet. Send /start to choose a role.";

/// Reply to a buy button.
pub const PURCHASES_CLOSED: &str = "Market purchases are not open yet.";

/// Reply to a stale or garbled button.
pub const STALE_BUTTON: &str = "That button is no longer valid.";

/// Reply to /start from a registered player.
#[must_use]
pub fn welcome_back(player: &Player) -> String {
    format!(
        "Welcome back, {}! You are playing as {}.\nSend /help to see what you can do.",
        player.display_name,
        player.role().title()
    )
}

/// Reply to a successful role selection.
#[must_use]
pub fn enrolled(name: &str, enrollment: &Enrollment) -> String {
    let mut text = format!(
        "Welcome to the paddock, {name}! You joined as {}.\nStarting balance: {}",
        enrollment.role.title(),
        money(enrollment.starting_money)
    );
    if let Some(horse) = &enrollment.horse {
        let _ = write!(text, "\nYour first horse: {horse}");
    } else if enrollment.role == Role::Owner {
        text.push_str("\nNo horses are free right now; check /market later.");
    }
    if let Some(track) = &enrollment.track {
        let _ = write!(text, "\nYour track: {track}");
    } else if enrollment.role == Role::TrackOwner {
        text.push_str("\nEvery track already has an owner.");
    }
    text
}

/// Reply to a second role selection.
#[must_use]
pub fn already_joined(role: Role) -> String {
    format!("You already joined as {}. Roles cannot be changed.", role.title())
}

/// Player card for /profile.
#[must_use]
pub fn profile(player: &Player) -> String {
    let mut text = format!(
        "{}\nRole: {}\nLevel: {}  Experience: {}\nMoney: {}\nReputation: {}\nHorses: {}",
        player.display_name,
        player.role().title(),
        player.level,
        player.experience,
        money(player.money),
        player.reputation,
        player.horse_count()
    );
    let rides: Vec<&str> = player.contracts().collect();
    if !rides.is_empty() {
        let _ = write!(text, "\nRides: {}", rides.join(", "));
    }
    text
}

/// One horse with stats and record.
#[must_use]
pub fn horse_line(horse: &Horse) -> String {
    format!(
        "{}\n  SPD {} STA {} ACC {} FORM {}\n  prefers {} {}, age {}, record {}-{}, value {}",
        horse.name,
        horse.stats.speed,
        horse.stats.stamina,
        horse.stats.acceleration,
        horse.stats.form,
        horse.surface_preference,
        horse.distance_preference,
        horse.age,
        horse.wins(),
        horse.races(),
        money(horse.value)
    )
}

/// Reply to /horses.
#[must_use]
pub fn stable(horses: &[&Horse]) -> String {
    if horses.is_empty() {
        return "You don't own any horses yet. Browse /market.".to_owned();
    }
    let lines: Vec<String> = horses.iter().map(|h| horse_line(h)).collect();
    format!("Your stable:\n\n{}", lines.join("\n\n"))
}

/// Reply to /market.
#[must_use]
pub fn market(listings: &[&Horse]) -> String {
    if listings.is_empty() {
        return "The market is empty: every horse has an owner.".to_owned();
    }
    let lines: Vec<String> = listings.iter().map(|h| horse_line(h)).collect();
    format!("Horses for sale:\n\n{}", lines.join("\n\n"))
}

/// Reply to /tracks.
#[must_use]
pub fn tracks(state: &GameState) -> String {
    let tracks = state.list_tracks();
    if tracks.is_empty() {
        return "No tracks yet.".to_owned();
    }
    let lines: Vec<String> = tracks.iter().map(|t| track_line(state, t)).collect();
    format!("Tracks:\n\n{}", lines.join("\n\n"))
}

fn track_line(state: &GameState, track: &Track) -> String {
    format!(
        "{}\n  {} {} furlongs ({}), going {}, owner {}",
        track.name,
        track.surface,
        track.distance_furlongs,
        track.band(),
        track.condition,
        owner_name(state, track.owner)
    )
}

fn owner_name(state: &GameState, owner: Option<UserId>) -> String {
    owner
        .and_then(|id| state.get_player(id))
        .map_or_else(|| "none".to_owned(), |p| p.display_name.clone())
}

/// Reply to a successful /race.
#[must_use]
pub fn race_card(state: &GameState, card: &RaceCard) -> String {
    let mut text = format!(
        "Race day {} at {} ({} {}f, going {}), {} runners\n",
        card.date,
        card.track.name,
        card.track.surface,
        card.track.distance_furlongs,
        card.track.condition,
        card.field_size
    );
    for (result, label) in card.outcome.podium().iter().zip(["1st", "2nd", "3rd"]) {
        let _ = write!(
            text,
            "\n{label}: {} ridden by {} ({:.1})",
            result.horse,
            result.jockey_label(),
            result.score
        );
    }
    if !card.payouts.is_empty() {
        text.push_str("\n\nPurse:");
        for payout in &card.payouts {
            let _ = write!(
                text,
                "\n{} {} to {}",
                payout.horse,
                money(payout.amount),
                owner_name(state, payout.owner)
            );
        }
    }
    text
}

/// Reply to /race when the gate is closed.
#[must_use]
pub fn already_raced() -> String {
    "Today's race has already been run. Come back tomorrow!".to_owned()
}

/// Reply to /race with too few fit horses.
#[must_use]
pub fn not_enough_runners(eligible: usize, required: usize) -> String {
    format!("Not enough horses in form to race: {eligible} eligible, {required} needed.")
}

/// Reply to /race with no tracks.
#[must_use]
pub fn no_tracks() -> String {
    "There are no tracks to race on.".to_owned()
}

/// Reply to a booked ride.
#[must_use]
pub fn ride_booked(horse: &str) -> String {
    format!("You are booked to ride {horse} in upcoming races.")
}

/// Usage hint for a bare /ride.
pub const RIDE_USAGE: &str = "Usage: /ride <horse name>";

/// Formats an amount of money.
#[must_use]
pub fn money(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out.insert(0, '$');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use paddock_core::Stats;
    use paddock_shared::{DistanceBand, Surface};

    #[test]
    fn test_money_groups_thousands() {
        assert_eq!(money(0), "$0");
        assert_eq!(money(999), "$999");
        assert_eq!(money(1_000), "$1,000");
        assert_eq!(money(25_000), "$25,000");
        assert_eq!(money(1_234_567), "$1,234,567");
    }

    #[test]
    fn test_enrolled_mentions_grants() {
        let owner = Enrollment {
            role: Role::Owner,
            starting_money: 25_000,
            horse: Some("Thunder Road".into()),
            track: None,
        };
        let text = enrolled("Ada", &owner);
        assert!(text.contains("joined as Horse Owner"));
        assert!(text.contains("$25,000"));
        assert!(text.contains("Thunder Road"));

        let unlucky = Enrollment { horse: None, ..owner };
        assert!(enrolled("Ada", &unlucky).contains("No horses are free"));
    }

    #[test]
    fn test_horse_line_shows_stats_and_record() {
        let stats = Stats::new(80, 72, 88, 7);
        let horse = Horse::new("Silver Arrow", stats, Surface::Turf, DistanceBand::Sprint).unwrap();
        let line = horse_line(&horse);
        assert!(line.starts_with("Silver Arrow"));
        assert!(line.contains("SPD 80 STA 72 ACC 88 FORM 7"));
        assert!(line.contains("turf sprint"));
        assert!(line.contains("record 0-0"));
    }

    #[test]
    fn test_empty_listings() {
        assert!(stable(&[]).contains("don't own any horses"));
        assert!(market(&[]).contains("market is empty"));
        assert_eq!(tracks(&GameState::new()), "No tracks yet.");
    }

    #[test]
    fn test_profile_lists_rides() {
        let mut state = GameState::new();
        state
            .insert_horse(
                Horse::new("Apollo", Stats::new(70, 70, 70, 7), Surface::Dirt, DistanceBand::Mile)
                    .unwrap(),
            )
            .unwrap();
        state.upsert_player(Player::new(9, "Jo", Role::Jockey));
        state.book_jockey("Apollo", 9).unwrap();

        let text = profile(state.get_player(9).unwrap());
        assert!(text.starts_with("Jo\nRole: Jockey"));
        assert!(text.contains("Money: $10,000"));
        assert!(text.contains("Rides: Apollo"));
    }
}
