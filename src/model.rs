use std::fmt;

use serde::{Deserialize, Serialize};

/// How a goal was created. Declaration order is the canonical order used for
/// tie-breaks and for every table keyed by origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GoalOrigin {
    #[serde(rename = "bola_parada")]
    SetPiece,
    #[serde(rename = "escanteio")]
    Corner,
    #[serde(rename = "linha_fundo_direita")]
    RightByline,
    #[serde(rename = "linha_fundo_esquerda")]
    LeftByline,
    #[serde(rename = "frontal_area")]
    EdgeOfBox,
    #[serde(rename = "contra_ataque")]
    CounterAttack,
    #[serde(rename = "penalti")]
    Penalty,
    #[serde(rename = "erro_defensivo")]
    DefensiveError,
    #[serde(rename = "outros")]
    Other,
}

impl GoalOrigin {
    pub const COUNT: usize = 9;

    pub const ALL: [GoalOrigin; Self::COUNT] = [
        GoalOrigin::SetPiece,
        GoalOrigin::Corner,
        GoalOrigin::RightByline,
        GoalOrigin::LeftByline,
        GoalOrigin::EdgeOfBox,
        GoalOrigin::CounterAttack,
        GoalOrigin::Penalty,
        GoalOrigin::DefensiveError,
        GoalOrigin::Other,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            GoalOrigin::SetPiece => "Bola Parada",
            GoalOrigin::Corner => "Escanteio",
            GoalOrigin::RightByline => "Linha de Fundo Direita",
            GoalOrigin::LeftByline => "Linha de Fundo Esquerda",
            GoalOrigin::EdgeOfBox => "Frontal da Área",
            GoalOrigin::CounterAttack => "Contra-Ataque",
            GoalOrigin::Penalty => "Pênalti",
            GoalOrigin::DefensiveError => "Erro Defensivo Adversário",
            GoalOrigin::Other => "Outros",
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::COUNT]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::COUNT - 1) % Self::COUNT]
    }
}

impl fmt::Display for GoalOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Venue {
    Home,
    Away,
}

impl Venue {
    pub fn label(self) -> &'static str {
        match self {
            Venue::Home => "Casa",
            Venue::Away => "Fora",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Venue::Home => Venue::Away,
            Venue::Away => Venue::Home,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalKind {
    Scored,
    Conceded,
}

impl GoalKind {
    pub fn label(self) -> &'static str {
        match self {
            GoalKind::Scored => "Marcado",
            GoalKind::Conceded => "Sofrido",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            GoalKind::Scored => GoalKind::Conceded,
            GoalKind::Conceded => GoalKind::Scored,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardColor {
    Yellow,
    Red,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub minute: u16,
    pub origin: GoalOrigin,
    pub is_home: bool,
}

impl Goal {
    pub fn new(minute: u16, origin: GoalOrigin, venue: Venue) -> Self {
        Self {
            minute,
            origin,
            is_home: venue == Venue::Home,
        }
    }

    pub fn venue(&self) -> Venue {
        if self.is_home { Venue::Home } else { Venue::Away }
    }
}

/// Tournament bracket. Serialized as the bare number `1` or `2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Group {
    One,
    Two,
}

impl Group {
    pub const ALL: [Group; 2] = [Group::One, Group::Two];

    pub fn number(self) -> u8 {
        match self {
            Group::One => 1,
            Group::Two => 2,
        }
    }

    pub fn other(self) -> Self {
        match self {
            Group::One => Group::Two,
            Group::Two => Group::One,
        }
    }
}

impl TryFrom<u8> for Group {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Group::One),
            2 => Ok(Group::Two),
            other => Err(format!("group must be 1 or 2, got {other}")),
        }
    }
}

impl From<Group> for u8 {
    fn from(group: Group) -> Self {
        group.number()
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByVenue<T> {
    pub home: T,
    pub away: T,
}

impl<T> ByVenue<T> {
    pub fn get(&self, venue: Venue) -> &T {
        match venue {
            Venue::Home => &self.home,
            Venue::Away => &self.away,
        }
    }

    pub fn get_mut(&mut self, venue: Venue) -> &mut T {
        match venue {
            Venue::Home => &mut self.home,
            Venue::Away => &mut self.away,
        }
    }
}

impl ByVenue<Vec<Goal>> {
    pub fn total(&self) -> usize {
        self.home.len() + self.away.len()
    }

    /// Home goals followed by away goals.
    pub fn iter(&self) -> impl Iterator<Item = &Goal> {
        self.home.iter().chain(self.away.iter())
    }
}

impl ByVenue<u32> {
    /// Widened so imported tallies near `u32::MAX` cannot overflow.
    pub fn total(&self) -> u64 {
        u64::from(self.home) + u64::from(self.away)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Club {
    pub id: String,
    pub name: String,
    pub group: Group,
    pub goals_scored: ByVenue<Vec<Goal>>,
    pub goals_conceded: ByVenue<Vec<Goal>>,
    pub yellow_cards: ByVenue<u32>,
    pub red_cards: ByVenue<u32>,
}

impl Club {
    pub fn new(id: impl Into<String>, name: impl Into<String>, group: Group) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            group,
            goals_scored: ByVenue::default(),
            goals_conceded: ByVenue::default(),
            yellow_cards: ByVenue::default(),
            red_cards: ByVenue::default(),
        }
    }

    pub fn goals(&self, kind: GoalKind) -> &ByVenue<Vec<Goal>> {
        match kind {
            GoalKind::Scored => &self.goals_scored,
            GoalKind::Conceded => &self.goals_conceded,
        }
    }

    pub fn cards(&self, color: CardColor) -> &ByVenue<u32> {
        match color {
            CardColor::Yellow => &self.yellow_cards,
            CardColor::Red => &self.red_cards,
        }
    }

    /// Yellow plus red, both venues.
    pub fn total_cards(&self) -> u64 {
        self.yellow_cards.total() + self.red_cards.total()
    }
}

/// Per-origin share of one goal list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalOriginStats {
    pub origin: GoalOrigin,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BettingInsight {
    pub market: String,
    pub analysis: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probability: Option<String>,
}
