use crate::model::{BettingInsight, Club};
use crate::numfmt::{one_decimal, whole};

pub const MARKET_BTTS: &str = "Ambas Marcam (BTTS)";
pub const MARKET_TOTAL_GOALS: &str = "Total de Gols";
pub const MARKET_RESULT: &str = "Resultado Final";
pub const MARKET_GOALS_BY_HALF: &str = "Gols por Tempo";
pub const MARKET_CARDS: &str = "Cartões";

const GOAL_LINE: f64 = 2.5;
const HIGH_SCORING: f64 = 3.0;
const RESULT_EDGE_RATIO: f64 = 1.4;
const HALF_TIME_MINUTE: u16 = 45;
const SECOND_HALF_SHARE: f64 = 60.0;
const FIRST_HALF_SHARE: f64 = 55.0;
const CARD_LINE: f64 = 4.0;

/// Venue-specific tallies for `home` hosting `away`.
struct Fixture<'a> {
    home: &'a Club,
    away: &'a Club,
    home_scored: usize,
    home_conceded: usize,
    away_scored: usize,
    away_conceded: usize,
    avg_goals_per_match: f64,
}

impl<'a> Fixture<'a> {
    fn new(home: &'a Club, away: &'a Club) -> Self {
        let home_scored = home.goals_scored.home.len();
        let home_conceded = home.goals_conceded.home.len();
        let away_scored = away.goals_scored.away.len();
        let away_conceded = away.goals_conceded.away.len();
        let goals = (home_scored + home_conceded + away_scored + away_conceded) as f64;
        Self {
            home,
            away,
            home_scored,
            home_conceded,
            away_scored,
            away_conceded,
            avg_goals_per_match: goals / (goals / 2.0).max(1.0),
        }
    }
}

type MarketRule = fn(&Fixture<'_>) -> Option<BettingInsight>;

const MARKETS: [MarketRule; 5] = [
    both_teams_to_score,
    total_goals,
    match_result,
    goals_by_half,
    cards,
];

/// Market commentary for `home` hosting `away`. The first three markets are
/// always present; goals-by-half and cards only when their thresholds hit.
pub fn betting_insights(home: &Club, away: &Club) -> Vec<BettingInsight> {
    let fixture = Fixture::new(home, away);
    MARKETS.iter().filter_map(|rule| rule(&fixture)).collect()
}

fn insight(market: &str, analysis: String, probability: impl Into<String>) -> BettingInsight {
    BettingInsight {
        market: market.to_string(),
        analysis,
        probability: Some(probability.into()),
    }
}

fn scoring_rate(scored: usize, conceded: usize) -> f64 {
    scored as f64 / (scored + conceded).max(1) as f64 * 100.0
}

fn both_teams_to_score(f: &Fixture<'_>) -> Option<BettingInsight> {
    if f.home_scored == 0 || f.away_scored == 0 {
        return Some(insight(
            MARKET_BTTS,
            "Probabilidade MODERADA/BAIXA. Uma ou ambas equipes têm dificuldade de marcar nas condições de mando correspondentes.".to_string(),
            "35-50%",
        ));
    }
    let probability = (60.0 + f.avg_goals_per_match * 10.0).min(95.0);
    Some(insight(
        MARKET_BTTS,
        format!(
            "Probabilidade ALTA. {} marca em {}% das partidas em casa, e {} marca em {}% como visitante.",
            f.home.name,
            whole(scoring_rate(f.home_scored, f.home_conceded)),
            f.away.name,
            whole(scoring_rate(f.away_scored, f.away_conceded))
        ),
        format!("{}%", whole(probability)),
    ))
}

fn total_goals(f: &Fixture<'_>) -> Option<BettingInsight> {
    let avg = f.avg_goals_per_match;
    if avg <= GOAL_LINE {
        return Some(insight(
            MARKET_TOTAL_GOALS,
            format!(
                "Tendência para UNDER 2.5 gols. Média combinada de {} gols. Ambas equipes demonstram padrão de jogos com poucos gols.",
                one_decimal(avg)
            ),
            "60-70%",
        ));
    }
    let probability = if avg > HIGH_SCORING { "65-75%" } else { "55-65%" };
    Some(insight(
        MARKET_TOTAL_GOALS,
        format!(
            "Tendência para OVER 2.5 gols. Média combinada de {} gols por jogo. {} (casa) tem média de {} gols/jogo em casa, {} (fora) tem {} gols/jogo fora.",
            one_decimal(avg),
            f.home.name,
            one_decimal((f.home_scored + f.home_conceded) as f64),
            f.away.name,
            one_decimal((f.away_scored + f.away_conceded) as f64)
        ),
        probability,
    ))
}

fn match_result(f: &Fixture<'_>) -> Option<BettingInsight> {
    let home_scored = f.home_scored as f64;
    let away_scored = f.away_scored as f64;

    let (analysis, probability) = if home_scored > away_scored * RESULT_EDGE_RATIO
        && f.home_conceded < f.away_scored
    {
        (
            format!(
                "Vantagem clara para {}. Como mandante, marca {} e sofre {}, enquanto {} fora marca {} e sofre {}.",
                f.home.name,
                f.home_scored,
                f.home_conceded,
                f.away.name,
                f.away_scored,
                f.away_conceded
            ),
            "Vitória Casa: 55-65%",
        )
    } else if away_scored > home_scored * RESULT_EDGE_RATIO && f.away_conceded < f.home_scored {
        (
            format!(
                "{} apresenta bom desempenho fora. Vitória visitante é possível, mas mando de campo favorece {}.",
                f.away.name, f.home.name
            ),
            "Vitória Fora: 30-40% | Empate: 30-35%",
        )
    } else {
        (
            format!(
                "Jogo equilibrado. Estatísticas similares em casa ({}) e fora ({}). Mando de campo pode ser decisivo.",
                f.home.name, f.away.name
            ),
            "Vitória Casa: 40-45% | Empate: 25-30% | Vitória Fora: 25-30%",
        )
    };
    Some(insight(MARKET_RESULT, analysis, probability))
}

fn goals_by_half(f: &Fixture<'_>) -> Option<BettingInsight> {
    let (mut first, mut second) = (0usize, 0usize);
    for goal in f.home.goals_scored.iter().chain(f.away.goals_scored.iter()) {
        if goal.minute <= HALF_TIME_MINUTE {
            first += 1;
        } else {
            second += 1;
        }
    }
    let total = first + second;
    if total == 0 {
        return None;
    }

    let first_pct = first as f64 / total as f64 * 100.0;
    let second_pct = second as f64 / total as f64 * 100.0;
    if second_pct > SECOND_HALF_SHARE {
        Some(insight(
            MARKET_GOALS_BY_HALF,
            format!(
                "Forte tendência de gols no SEGUNDO TEMPO ({}% dos gols). Ambas equipes são mais produtivas após o intervalo.",
                whole(second_pct)
            ),
            format!("Mais gols 2T: {}%", whole(second_pct.min(70.0))),
        ))
    } else if first_pct > FIRST_HALF_SHARE {
        Some(insight(
            MARKET_GOALS_BY_HALF,
            format!(
                "Equipes começam fortes. {}% dos gols ocorrem no PRIMEIRO TEMPO.",
                whole(first_pct)
            ),
            format!("Gol 1T: {}%", whole(first_pct.min(65.0))),
        ))
    } else {
        None
    }
}

/// Yellow cards count once, red cards twice.
fn weighted_cards(club: &Club) -> u64 {
    club.yellow_cards.total() + 2 * club.red_cards.total()
}

fn cards(f: &Fixture<'_>) -> Option<BettingInsight> {
    let home_cards = weighted_cards(f.home);
    let away_cards = weighted_cards(f.away);
    let avg = (home_cards + away_cards) as f64 / 2.0;
    if avg <= CARD_LINE {
        return None;
    }
    Some(insight(
        MARKET_CARDS,
        format!(
            "Jogo com tendência de MUITOS CARTÕES. Média combinada de {} cartões. {}: {} cartões totais, {}: {} cartões totais.",
            one_decimal(avg),
            f.home.name,
            home_cards,
            f.away.name,
            away_cards
        ),
        "Over 4.5 Cartões: 60-70%",
    ))
}
