use crate::model::{Club, Group};

const GROUP_1: [&str; 20] = [
    "Arenteiro",
    "Arenas Club",
    "Barakaldo",
    "Bilbao Athletic",
    "Cacereño",
    "Celta Fortuna",
    "Guadalajara",
    "Lugo",
    "Mérida",
    "Osasuna Promesas",
    "Ourense CF",
    "Ponferradina",
    "Pontevedra",
    "Real Avilés",
    "Real Madrid Castilla",
    "Talavera",
    "Tenerife",
    "Unionistas",
    "Zamora",
    "Racing Ferrol",
];

const GROUP_2: [&str; 20] = [
    "Alcorcón",
    "Algeciras",
    "Antequera",
    "Atlético Madrileño",
    "Atlético Sanluqueño",
    "Betis Deportivo",
    "Cartagena",
    "CE Europa",
    "Eldense",
    "Gimnàstic de Tarragona",
    "Hércules",
    "Ibiza",
    "Juventud Torremolinos",
    "Marbella",
    "Real Murcia",
    "Sabadell",
    "Sevilla Atlético",
    "Tarazona",
    "Teruel",
    "Villarreal B",
];

/// Fresh clubs for both groups with ids `club-{index}` and empty records.
pub fn initial_clubs() -> Vec<Club> {
    GROUP_1
        .iter()
        .map(|name| (*name, Group::One))
        .chain(GROUP_2.iter().map(|name| (*name, Group::Two)))
        .enumerate()
        .map(|(idx, (name, group))| Club::new(format!("club-{idx}"), name, group))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn ids_are_unique_and_groups_balanced() {
        let clubs = initial_clubs();
        assert_eq!(clubs.len(), 40);
        let ids: HashSet<&str> = clubs.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids.len(), clubs.len());
        assert_eq!(clubs[0].id, "club-0");
        assert_eq!(clubs.iter().filter(|c| c.group == Group::One).count(), 20);
        assert!(clubs.iter().all(|c| c.total_cards() == 0));
    }
}
