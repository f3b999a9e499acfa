use crate::model::{Goal, GoalOrigin, GoalOriginStats};

/// Count goals per origin and express each as a share of the list.
///
/// Zero-count origins are left out and the result is sorted by count, highest
/// first. Equal counts keep the enumeration order of [`GoalOrigin::ALL`].
pub fn aggregate_by_origin<'a, I>(goals: I) -> Vec<GoalOriginStats>
where
    I: IntoIterator<Item = &'a Goal>,
{
    let mut counts = [0usize; GoalOrigin::COUNT];
    let mut total = 0usize;
    for goal in goals {
        counts[goal.origin.index()] += 1;
        total += 1;
    }
    if total == 0 {
        return Vec::new();
    }

    let mut out: Vec<GoalOriginStats> = GoalOrigin::ALL
        .iter()
        .zip(counts)
        .filter(|(_, count)| *count > 0)
        .map(|(origin, count)| GoalOriginStats {
            origin: *origin,
            count,
            percentage: count as f64 / total as f64 * 100.0,
        })
        .collect();
    // Stable: ties stay in declaration order.
    out.sort_by(|a, b| b.count.cmp(&a.count));
    out
}
