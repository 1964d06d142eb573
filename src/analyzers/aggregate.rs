use crate::analyzers::groups::{BACKEND, GroupKey, is_backend};
use crate::analyzers::types::{DirectionEntry, GroupAggregate};
use crate::analyzers::utility::avg2;
use crate::stats::StatsData;

fn entry(data: &StatsData, name: &str) -> DirectionEntry {
    let stats = data.direction(name).cloned().unwrap_or_default();
    DirectionEntry {
        name: name.to_string(),
        count: stats.count,
        sum: stats.sum,
        avg: stats.avg,
        children: Vec::new(),
    }
}

/// Keeps entries with a nonzero count, most populated first. Ties keep their
/// input order.
fn populated_by_count<'a>(
    data: &StatsData,
    names: impl IntoIterator<Item = &'a str>,
) -> Vec<DirectionEntry> {
    let mut entries: Vec<DirectionEntry> = names
        .into_iter()
        .map(|name| entry(data, name))
        .filter(|e| e.count > 0)
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries
}

/// Every direction with at least one score, sorted by count descending.
pub fn direction_stats_list(data: &StatsData) -> Vec<DirectionEntry> {
    populated_by_count(data, data.direction_names.iter().map(String::as_str))
}

/// Like [`direction_stats_list`], but the backend directions collapse into a
/// single leading "Backend" entry that carries them as children.
pub fn direction_stats_list_grouped(data: &StatsData) -> Vec<DirectionEntry> {
    let children = populated_by_count(data, BACKEND.iter().copied());
    let others = direction_stats_list(data)
        .into_iter()
        .filter(|e| !is_backend(&e.name));

    if children.is_empty() {
        return others.collect();
    }

    let count = children.iter().map(|c| c.count).sum();
    let sum = children.iter().map(|c| c.sum).sum();
    let backend = DirectionEntry {
        name: "Backend".to_string(),
        count,
        sum,
        avg: avg2(sum, count),
        children,
    };

    std::iter::once(backend).chain(others).collect()
}

/// The group's populated directions, sorted by count descending.
pub fn direction_stats_for_group(data: &StatsData, key: GroupKey) -> Vec<DirectionEntry> {
    populated_by_count(data, key.members().iter().copied())
}

/// Combined count/sum/avg over the group. `None` when the group has no scores.
pub fn group_aggregate(data: &StatsData, key: GroupKey) -> Option<GroupAggregate> {
    let mut count = 0;
    let mut sum = 0.0;
    for stats in key.members().iter().filter_map(|name| data.direction(name)) {
        if stats.count > 0 {
            count += stats.count;
            sum += stats.sum;
        }
    }

    if count == 0 {
        return None;
    }

    Some(GroupAggregate {
        count,
        sum,
        avg: avg2(sum, count),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
code,Backend - Python,Backend - Java,Frontend,ML,Mobile - iOS
a,50,,80,,
b,60,70,,,
c,,90,40,,
d,,30,20,10,
";

    #[test]
    fn test_direction_stats_list_sorted_and_filtered() {
        let data = StatsData::from_csv(CSV);
        let list = direction_stats_list(&data);
        let names: Vec<_> = list.iter().map(|e| e.name.as_str()).collect();
        // ties keep header order, iOS has no scores
        assert_eq!(names, vec!["Backend - Java", "Frontend", "Backend - Python", "ML"]);
        assert_eq!(list[0].count, 3);
        assert_eq!(list[0].sum, 190.0);
    }

    #[test]
    fn test_direction_stats_list_grouped() {
        let data = StatsData::from_csv(CSV);
        let list = direction_stats_list_grouped(&data);

        assert_eq!(list[0].name, "Backend");
        assert_eq!(list[0].count, 5);
        assert_eq!(list[0].sum, 300.0);
        assert_eq!(list[0].avg, 60.0);
        let children: Vec<_> = list[0].children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(children, vec!["Backend - Java", "Backend - Python"]);

        let rest: Vec<_> = list[1..].iter().map(|e| e.name.as_str()).collect();
        assert_eq!(rest, vec!["Frontend", "ML"]);
    }

    #[test]
    fn test_grouped_without_backend_scores() {
        let data = StatsData::from_csv("code,Frontend,Backend - Java\na,10,\n");
        let list = direction_stats_list_grouped(&data);
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].name, "Frontend");
        assert!(list[0].children.is_empty());
    }

    #[test]
    fn test_direction_stats_for_group() {
        let data = StatsData::from_csv(CSV);
        let backend = direction_stats_for_group(&data, GroupKey::Backend);
        assert_eq!(backend.len(), 2);
        assert_eq!(backend[0].name, "Backend - Java");
        assert!(direction_stats_for_group(&data, GroupKey::Ios).is_empty());
        assert!(direction_stats_for_group(&data, GroupKey::Android).is_empty());
    }

    #[test]
    fn test_group_aggregate() {
        let data = StatsData::from_csv(CSV);
        let agg = group_aggregate(&data, GroupKey::Backend).unwrap();
        assert_eq!(agg.count, 5);
        assert_eq!(agg.sum, 300.0);
        assert_eq!(agg.avg, 60.0);

        let fe = group_aggregate(&data, GroupKey::Frontend).unwrap();
        assert_eq!(fe.avg, 46.67);
    }

    #[test]
    fn test_group_aggregate_absent_when_empty() {
        let data = StatsData::from_csv(CSV);
        assert_eq!(group_aggregate(&data, GroupKey::Ios), None);
        assert_eq!(group_aggregate(&StatsData::empty(), GroupKey::Backend), None);
    }
}
