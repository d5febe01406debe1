use unicode_normalization::UnicodeNormalization;

use crate::types::Program;

/// Normalize a query or haystack for matching: trim, NFC, lowercase.
pub fn normalize_query(raw: &str) -> String {
    raw.trim().nfc().collect::<String>().to_lowercase()
}

/// Searchable text of a program: title, description, platform and version.
pub fn haystack(program: &Program) -> String {
    let joined = format!(
        "{} {} {} {}",
        program.title,
        program.description,
        program.platform,
        program.version.as_deref().unwrap_or("")
    );
    joined.nfc().collect::<String>().to_lowercase()
}

/// Whether a program matches an already-normalized query.
pub fn matches(program: &Program, normalized: &str) -> bool {
    normalized.is_empty() || haystack(program).contains(normalized)
}

/// Subset of `records` matching `query`, in the order given.
///
/// Substring match, no ranking. An empty or whitespace-only query keeps every record.
pub fn filter<'a, I>(records: I, query: &str) -> Vec<&'a Program>
where
    I: IntoIterator<Item = &'a Program>,
{
    let normalized = normalize_query(query);
    records
        .into_iter()
        .filter(|p| matches(p, &normalized))
        .collect()
}
