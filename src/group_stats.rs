use serde::Serialize;

use crate::model::{Club, Group};

/// Mean card tallies per club within one group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CardAverages {
    pub yellow: f64,
    pub red: f64,
    pub total: f64,
}

pub fn average_cards(all_clubs: &[Club], group: Group) -> CardAverages {
    let mut members = 0usize;
    let mut yellow = 0u64;
    let mut red = 0u64;
    for club in all_clubs.iter().filter(|c| c.group == group) {
        members += 1;
        yellow = yellow.saturating_add(club.yellow_cards.total());
        red = red.saturating_add(club.red_cards.total());
    }
    if members == 0 {
        return CardAverages::default();
    }

    let n = members as f64;
    CardAverages {
        yellow: yellow as f64 / n,
        red: red as f64 / n,
        total: (yellow as f64 + red as f64) / n,
    }
}
