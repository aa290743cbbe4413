use crate::domain::model::{Rule, RuleSet, ScanKind, Verdict};
use crate::utils::error::{Result, ShieldError};

/// Returns the first rule, in declaration order, with any pattern contained in
/// the input. Matching is case-insensitive substring containment; nothing
/// fuzzier. Empty input never matches.
pub fn first_match<'a>(input: &str, rules: &'a [Rule]) -> Option<&'a Rule> {
    let haystack = input.trim().to_lowercase();
    if haystack.is_empty() {
        return None;
    }

    rules.iter().find(|rule| {
        rule.patterns.iter().any(|pattern| {
            let pattern = pattern.trim().to_lowercase();
            !pattern.is_empty() && haystack.contains(&pattern)
        })
    })
}

/// Classify `input` against one scan type's rule set. An empty rule set is a
/// configuration error, not a safe verdict: a scan that cannot see its rules
/// must not claim the input is clean.
pub fn evaluate(kind: ScanKind, input: &str, set: &RuleSet) -> Result<Verdict> {
    if set.rules.is_empty() {
        return Err(ShieldError::EmptyCatalog {
            kind: kind.as_str().to_string(),
        });
    }

    Ok(match first_match(input, &set.rules) {
        Some(rule) => Verdict::from_rule(rule),
        None => Verdict::safe(&set.default),
    })
}
