/// Fewest edits turning `pattern` into any substring of `text`.
///
/// Sellers' variant of Levenshtein: the match may start anywhere in `text`
/// for free. Zero means `pattern` occurs verbatim; the result never exceeds
/// `pattern.len()`.
pub(crate) fn substring_distance(pattern: &[char], text: &[char]) -> usize {
    let m = pattern.len();
    if m == 0 {
        return 0;
    }

    let mut prev: Vec<usize> = (0..=m).collect();
    let mut cur = vec![0usize; m + 1];
    let mut best = m;

    for &ch in text {
        cur[0] = 0;
        for i in 1..=m {
            let substitution = prev[i - 1] + usize::from(pattern[i - 1] != ch);
            let deletion = prev[i] + 1;
            let insertion = cur[i - 1] + 1;
            cur[i] = substitution.min(deletion).min(insertion);
        }
        best = best.min(cur[m]);
        std::mem::swap(&mut prev, &mut cur);
    }
    best
}

/// Lower-cased characters, the unit the approximate matcher compares.
pub(crate) fn fold(text: &str) -> Vec<char> {
    text.chars().flat_map(char::to_lowercase).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn distance(pattern: &str, text: &str) -> usize {
        substring_distance(&fold(pattern), &fold(text))
    }

    #[test]
    fn verbatim_substring_is_free() {
        assert_eq!(distance("ethyl", "High-Density Polyethylene"), 0);
        assert_eq!(distance("HDPE", "hdpe"), 0);
    }

    #[test]
    fn typos_cost_one_edit_each() {
        assert_eq!(distance("polyethelene", "Polyethylene"), 1);
        assert_eq!(distance("alumnium", "Aluminium"), 1);
        assert_eq!(distance("polyetilene", "Polyethylene"), 2);
    }

    #[test]
    fn unrelated_text_costs_most_of_the_pattern() {
        assert_eq!(distance("xqz", "Steel"), 3);
    }

    proptest! {
        #[test]
        fn proptest_distance_is_bounded_by_pattern_length(
            pattern in "[a-z]{0,12}",
            text in "[a-z ]{0,24}",
        ) {
            prop_assert!(distance(&pattern, &text) <= pattern.chars().count());
        }

        #[test]
        fn proptest_embedded_pattern_is_found_exactly(
            prefix in "[a-z]{0,8}",
            pattern in "[a-z]{1,8}",
            suffix in "[a-z]{0,8}",
        ) {
            let text = format!("{prefix}{pattern}{suffix}");
            prop_assert_eq!(distance(&pattern, &text), 0);
        }
    }
}
