//! Identifier allocation from the resident collections.
//!
//! No counter is persisted anywhere: the next id is always derived from
//! the ids currently in memory. That is only correct because the full
//! collection is loaded once at startup and kept resident for the process
//! lifetime.

/// Next patient id: "P" + integer, one past the highest existing suffix
///
/// Ids not matching the "P" + integer pattern are ignored. The floor is 99,
/// so the first patient in an empty collection gets "P100". No zero-padding.
pub fn next_patient_id<'a, I>(ids: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let max = ids
        .into_iter()
        .filter_map(|id| id.strip_prefix('P'))
        .filter_map(|suffix| suffix.parse::<u32>().ok())
        .fold(99, u32::max);
    format!("P{}", max + 1)
}

/// Next appointment id: one past the highest existing id, starting at 1
pub fn next_appointment_id<I>(ids: I) -> u32
where
    I: IntoIterator<Item = u32>,
{
    ids.into_iter().max().map_or(1, |max| max + 1)
}
