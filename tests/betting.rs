use rand::SeedableRng;
use rand::rngs::StdRng;

use comparador::betting::{
    MARKET_BTTS, MARKET_CARDS, MARKET_GOALS_BY_HALF, MARKET_RESULT, MARKET_TOTAL_GOALS,
    betting_insights,
};
use comparador::demo_feed::seed_random_season;
use comparador::model::{Club, Goal, GoalOrigin, Group, Venue};
use comparador::roster::initial_clubs;

fn goals(minutes: &[u16], venue: Venue) -> Vec<Goal> {
    minutes
        .iter()
        .map(|m| Goal::new(*m, GoalOrigin::Other, venue))
        .collect()
}

#[test]
fn empty_clubs_get_the_three_fixed_markets() {
    let a = Club::new("a", "Alfa", Group::One);
    let b = Club::new("b", "Beta", Group::Two);
    let out = betting_insights(&a, &b);
    let markets: Vec<&str> = out.iter().map(|i| i.market.as_str()).collect();
    assert_eq!(markets, vec![MARKET_BTTS, MARKET_TOTAL_GOALS, MARKET_RESULT]);
    assert_eq!(out[0].probability.as_deref(), Some("35-50%"));
    assert!(out[1].analysis.contains("UNDER 2.5"));
    assert_eq!(
        out[2].probability.as_deref(),
        Some("Vitória Casa: 40-45% | Empate: 25-30% | Vitória Fora: 25-30%")
    );
}

#[test]
fn full_card_includes_all_six_markets_in_order() {
    let mut a = Club::new("a", "Alfa", Group::One);
    a.goals_scored.home = goals(&[50, 60, 70, 80], Venue::Home);
    a.goals_conceded.home = goals(&[10], Venue::Home);
    a.yellow_cards.home = 4;
    a.red_cards.home = 1;

    let mut b = Club::new("b", "Beta", Group::One);
    b.goals_scored.away = goals(&[55, 65], Venue::Away);
    b.goals_conceded.away = goals(&[20, 30, 40], Venue::Away);
    b.yellow_cards.away = 3;

    let out = betting_insights(&a, &b);
    let markets: Vec<&str> = out.iter().map(|i| i.market.as_str()).collect();
    assert_eq!(
        markets,
        vec![
            MARKET_BTTS,
            MARKET_TOTAL_GOALS,
            MARKET_RESULT,
            MARKET_GOALS_BY_HALF,
            MARKET_CARDS
        ]
    );
    // 10 venue goals over max(1, 5) matches = 2.0 per match.
    assert_eq!(out[0].probability.as_deref(), Some("80%"));
    assert!(out[0].analysis.contains("Alfa marca em 80% das partidas em casa"));
    assert!(out[0].analysis.contains("Beta marca em 40% como visitante"));
    assert_eq!(out[1].probability.as_deref(), Some("60-70%"));
    assert_eq!(out[3].probability.as_deref(), Some("Mais gols 2T: 70%"));
    assert_eq!(out[4].probability.as_deref(), Some("Over 4.5 Cartões: 60-70%"));
}

#[test]
fn btts_falls_back_when_home_side_never_scored() {
    let a = Club::new("a", "Alfa", Group::One);
    let mut b = Club::new("b", "Beta", Group::One);
    b.goals_scored.away = goals(&[5, 15], Venue::Away);
    let out = betting_insights(&a, &b);
    assert!(out[0].analysis.starts_with("Probabilidade MODERADA/BAIXA"));
    assert_eq!(out[0].probability.as_deref(), Some("35-50%"));
}

#[test]
fn market_count_stays_within_bounds_on_random_seasons() {
    let mut rng = StdRng::seed_from_u64(2025);
    let mut clubs = initial_clubs();
    seed_random_season(&mut clubs, &mut rng);

    for home in &clubs {
        for away in &clubs {
            if home.id == away.id {
                continue;
            }
            let out = betting_insights(home, away);
            assert!((3..=6).contains(&out.len()));
            assert_eq!(out[0].market, MARKET_BTTS);
            assert_eq!(out[1].market, MARKET_TOTAL_GOALS);
            assert_eq!(out[2].market, MARKET_RESULT);
            assert!(out.iter().all(|i| i.probability.is_some()));
            assert_eq!(out.iter().filter(|i| i.market == MARKET_RESULT).count(), 1);
        }
    }
}
