//! # Race Simulator
//!
//! Scores every entrant, adds racing luck, and sorts.
//!
//! The simulator is pure apart from its [`LuckSource`]: the same entrants,
//! track, jockeys and luck sequence always produce the same result. Luck is
//! drawn once per entrant, in entrant order.
//!
//! ## Ties
//!
//! Scores are continuous, so exact ties are rare, but they are still ordered:
//! equal scores finish in horse-name order.

use std::collections::HashMap;

use paddock_core::{Horse, Player, Track};
use paddock_shared::constants::LUCK_SPREAD;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::scoring::ScoreBreakdown;

/// Horse name -> booked jockey. Horses without an entry race unridden.
pub type JockeyAssignments<'a> = HashMap<&'a str, &'a Player>;

/// Produces one racing-luck value per entrant.
pub trait LuckSource {
    /// Draws a value in `[-LUCK_SPREAD, LUCK_SPREAD]`.
    fn draw(&mut self) -> f64;
}

/// Uniform luck over the closed interval `[-10, 10]`.
#[derive(Clone, Debug)]
pub struct UniformLuck<R> {
    rng: R,
}

impl<R: Rng> UniformLuck<R> {
    /// Wraps a random number generator.
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }

    /// The wrapped generator, for other race-day draws.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }
}

impl<R: Rng> LuckSource for UniformLuck<R> {
    fn draw(&mut self) -> f64 {
        self.rng.gen_range(-LUCK_SPREAD..=LUCK_SPREAD)
    }
}

/// No luck at all: every draw is zero.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoLuck;

impl LuckSource for NoLuck {
    fn draw(&mut self) -> f64 {
        0.0
    }
}

/// One finisher.
#[derive(Clone, Debug, PartialEq)]
pub struct RaceResult {
    /// Finishing position, 1-based.
    pub position: usize,
    /// Horse name.
    pub horse: String,
    /// Final score.
    pub score: f64,
    /// How the score was made.
    pub breakdown: ScoreBreakdown,
    /// Display name of the jockey, if one rode.
    pub jockey: Option<String>,
    /// Id of the jockey, if one rode.
    pub jockey_id: Option<i64>,
}

impl RaceResult {
    /// Jockey name or "no jockey".
    #[must_use]
    pub fn jockey_label(&self) -> &str {
        self.jockey.as_deref().unwrap_or("no jockey")
    }
}

/// Finishing order of a race.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RaceOutcome {
    /// Results, winner first.
    pub results: Vec<RaceResult>,
}

impl RaceOutcome {
    /// First place.
    #[must_use]
    pub fn winner(&self) -> Option<&RaceResult> {
        self.results.first()
    }

    /// Second place.
    #[must_use]
    pub fn place(&self) -> Option<&RaceResult> {
        self.results.get(1)
    }

    /// Third place.
    #[must_use]
    pub fn show(&self) -> Option<&RaceResult> {
        self.results.get(2)
    }

    /// Top three finishers (fewer for tiny fields).
    #[must_use]
    pub fn podium(&self) -> &[RaceResult] {
        &self.results[..self.results.len().min(3)]
    }
}

/// Runs one race.
///
/// An empty field yields an empty outcome; callers enforce a minimum field.
pub fn simulate<L: LuckSource + ?Sized>(
    entrants: &[&Horse],
    track: &Track,
    jockeys: &JockeyAssignments<'_>,
    luck: &mut L,
) -> RaceOutcome {
    let mut results: Vec<RaceResult> = entrants
        .iter()
        .map(|horse| {
            let jockey = jockeys.get(horse.name.as_str()).copied();
            let breakdown = ScoreBreakdown::compute(horse, track, jockey, luck.draw());
            RaceResult {
                position: 0,
                horse: horse.name.clone(),
                score: breakdown.total(),
                breakdown,
                jockey: jockey.map(|j| j.display_name.clone()),
                jockey_id: jockey.map(|j| j.user_id),
            }
        })
        .collect();

    results.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.horse.cmp(&b.horse))
    });
    for (i, result) in results.iter_mut().enumerate() {
        result.position = i + 1;
    }

    RaceOutcome { results }
}

/// A simulator that owns a seedable generator.
///
/// Seeded simulators replay identical race days; unseeded ones draw from OS
/// entropy.
#[derive(Clone, Debug)]
pub struct RaceSimulator {
    luck: UniformLuck<ChaCha8Rng>,
}

impl RaceSimulator {
    /// Reproducible simulator.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            luck: UniformLuck::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    /// Simulator seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            luck: UniformLuck::new(ChaCha8Rng::from_entropy()),
        }
    }

    /// Runs a race with uniform luck.
    pub fn run(
        &mut self,
        entrants: &[&Horse],
        track: &Track,
        jockeys: &JockeyAssignments<'_>,
    ) -> RaceOutcome {
        simulate(entrants, track, jockeys, &mut self.luck)
    }

    /// The generator, for draws that are not luck (track, field).
    pub fn rng_mut(&mut self) -> &mut ChaCha8Rng {
        self.luck.rng_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paddock_core::Stats;
    use paddock_shared::{DistanceBand, Role, Surface, TrackCondition};

    /// Replays a fixed list of luck values, then zeros.
    #[derive(Clone, Debug, Default)]
    struct ScriptedLuck {
        values: std::vec::IntoIter<f64>,
    }

    impl ScriptedLuck {
        /// Luck values in entrant order. Out-of-range values are clamped.
        fn new(values: Vec<f64>) -> Self {
            Self {
                values: values.into_iter(),
            }
        }
    }

    impl LuckSource for ScriptedLuck {
        fn draw(&mut self) -> f64 {
            self.values
                .next()
                .map_or(0.0, |v| v.clamp(-LUCK_SPREAD, LUCK_SPREAD))
        }
    }

    fn horse(name: &str, speed: u8) -> Horse {
        Horse::new(name, Stats::new(speed, 70, 70, 7), Surface::Turf, DistanceBand::Sprint)
            .unwrap()
    }

    fn track() -> Track {
        Track::new("Riverside", Surface::Dirt, 8, TrackCondition::Good).unwrap()
    }

    fn field() -> Vec<Horse> {
        vec![horse("Able", 60), horse("Baker", 90), horse("Charlie", 75), horse("Delta", 82)]
    }

    #[test]
    fn test_without_luck_faster_horse_wins() {
        let horses = field();
        let entrants: Vec<&Horse> = horses.iter().collect();
        let outcome = simulate(&entrants, &track(), &HashMap::new(), &mut NoLuck);

        let order: Vec<_> = outcome.results.iter().map(|r| r.horse.as_str()).collect();
        assert_eq!(order, ["Baker", "Delta", "Charlie", "Able"]);
        assert_eq!(outcome.winner().unwrap().horse, "Baker");
        assert_eq!(outcome.place().unwrap().horse, "Delta");
        assert_eq!(outcome.show().unwrap().horse, "Charlie");
        assert_eq!(outcome.results.iter().map(|r| r.position).collect::<Vec<_>>(), [1, 2, 3, 4]);
    }

    #[test]
    fn test_results_are_sorted_descending() {
        let horses = field();
        let entrants: Vec<&Horse> = horses.iter().collect();
        let mut sim = RaceSimulator::seeded(7);
        for _ in 0..200 {
            let outcome = sim.run(&entrants, &track(), &HashMap::new());
            assert_eq!(outcome.results.len(), 4);
            assert!(outcome.results.windows(2).all(|w| w[0].score >= w[1].score));
        }
    }

    #[test]
    fn test_luck_stays_within_spread() {
        let mut luck = UniformLuck::new(ChaCha8Rng::seed_from_u64(99));
        for _ in 0..10_000 {
            let value = luck.draw();
            assert!((-10.0..=10.0).contains(&value), "{value}");
        }
    }

    #[test]
    fn test_luck_can_overturn_stats() {
        let horses = field();
        let entrants: Vec<&Horse> = horses.iter().collect();
        // Able trails Baker by 12 base points; +10 / -10 luck flips them.
        let mut luck = ScriptedLuck::new(vec![10.0, -10.0, 0.0, 0.0]);
        let outcome = simulate(&entrants, &track(), &HashMap::new(), &mut luck);
        assert_eq!(outcome.winner().unwrap().horse, "Able");
    }

    #[test]
    fn test_exact_ties_finish_in_name_order() {
        let horses = vec![horse("Zulu", 80), horse("Alpha", 80), horse("Mike", 80)];
        let entrants: Vec<&Horse> = horses.iter().collect();
        let outcome = simulate(&entrants, &track(), &HashMap::new(), &mut NoLuck);
        let order: Vec<_> = outcome.results.iter().map(|r| r.horse.as_str()).collect();
        assert_eq!(order, ["Alpha", "Mike", "Zulu"]);
    }

    #[test]
    fn test_same_seed_same_race() {
        let horses = field();
        let entrants: Vec<&Horse> = horses.iter().collect();
        let a = RaceSimulator::seeded(2024).run(&entrants, &track(), &HashMap::new());
        let b = RaceSimulator::seeded(2024).run(&entrants, &track(), &HashMap::new());
        assert_eq!(a, b);
    }

    #[test]
    fn test_jockey_is_credited_and_labelled() {
        let horses = field();
        let entrants: Vec<&Horse> = horses.iter().collect();
        let mut jockey = Player::new(5, "Lester", Role::Jockey);
        jockey.level = 10;
        let mut jockeys = JockeyAssignments::new();
        jockeys.insert("Able", &jockey);

        let outcome = simulate(&entrants, &track(), &jockeys, &mut NoLuck);
        let able = outcome.results.iter().find(|r| r.horse == "Able").unwrap();
        assert!((able.breakdown.jockey - 20.0).abs() < 1e-9);
        assert_eq!(able.jockey_label(), "Lester");
        assert_eq!(able.jockey_id, Some(5));
        assert_eq!(outcome.winner().unwrap().horse, "Able");
        let baker = outcome.results.iter().find(|r| r.horse == "Baker").unwrap();
        assert_eq!(baker.jockey_label(), "no jockey");
    }

    #[test]
    fn test_empty_field_is_empty_outcome() {
        let outcome = simulate(&[], &track(), &HashMap::new(), &mut NoLuck);
        assert!(outcome.winner().is_none());
        assert!(outcome.podium().is_empty());
    }
}
