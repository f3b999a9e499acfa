use rand::Rng;

use crate::model::{Club, Goal, GoalOrigin, Group, Venue};

const ROUNDS: usize = 14;

/// Play a random double round of fixtures inside each group and record every
/// goal on both sides. Cards are sprinkled per club and venue.
pub fn seed_random_season<R: Rng>(clubs: &mut [Club], rng: &mut R) {
    for group in Group::ALL {
        let members: Vec<usize> = clubs
            .iter()
            .enumerate()
            .filter(|(_, c)| c.group == group)
            .map(|(idx, _)| idx)
            .collect();
        if members.len() < 2 {
            continue;
        }
        for _ in 0..ROUNDS {
            let home = members[rng.gen_range(0..members.len())];
            let mut away = members[rng.gen_range(0..members.len())];
            while away == home {
                away = members[rng.gen_range(0..members.len())];
            }
            play_fixture(clubs, home, away, rng);
        }
    }

    for club in clubs.iter_mut() {
        club.yellow_cards.home += rng.gen_range(0..12);
        club.yellow_cards.away += rng.gen_range(0..14);
        if rng.gen_bool(0.3) {
            club.red_cards.home += 1;
        }
        if rng.gen_bool(0.35) {
            club.red_cards.away += 1;
        }
    }
}

fn play_fixture<R: Rng>(clubs: &mut [Club], home: usize, away: usize, rng: &mut R) {
    let home_goals = rng.gen_range(0..4);
    let away_goals = rng.gen_range(0..3);
    for _ in 0..home_goals {
        let minute = rng.gen_range(1..=95);
        let origin = random_origin(rng);
        clubs[home]
            .goals_scored
            .home
            .push(Goal::new(minute, origin, Venue::Home));
        clubs[away]
            .goals_conceded
            .away
            .push(Goal::new(minute, origin, Venue::Away));
    }
    for _ in 0..away_goals {
        let minute = rng.gen_range(1..=95);
        let origin = random_origin(rng);
        clubs[away]
            .goals_scored
            .away
            .push(Goal::new(minute, origin, Venue::Away));
        clubs[home]
            .goals_conceded
            .home
            .push(Goal::new(minute, origin, Venue::Home));
    }
}

fn random_origin<R: Rng>(rng: &mut R) -> GoalOrigin {
    GoalOrigin::ALL[rng.gen_range(0..GoalOrigin::COUNT)]
}
