use super::snapshot::CaseSnapshot;

/// Most urgent tier first, soonest expiration first within a tier. Stable.
pub fn sort_by_priority(snapshots: &mut [CaseSnapshot]) {
    snapshots.sort_by_key(|snapshot| (snapshot.priority, snapshot.days_left));
}

pub fn sorted_by_priority(mut snapshots: Vec<CaseSnapshot>) -> Vec<CaseSnapshot> {
    sort_by_priority(&mut snapshots);
    snapshots
}
