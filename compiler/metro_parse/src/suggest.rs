//! "Did you mean?" hints for misspelled unit names.

/// Levenshtein distance in characters.
fn edit_distance(a: &str, b: &str) -> usize {
    let b_len = b.chars().count();
    let mut prev_row: Vec<usize> = (0..=b_len).collect();
    let mut curr_row: Vec<usize> = vec![0; b_len + 1];

    for (i, a_char) in a.chars().enumerate() {
        curr_row[0] = i + 1;
        for (j, b_char) in b.chars().enumerate() {
            let cost = usize::from(a_char != b_char);
            curr_row[j + 1] = (prev_row[j + 1] + 1)
                .min(curr_row[j] + 1)
                .min(prev_row[j] + cost);
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }
    prev_row[b_len]
}

/// Edits tolerated for a name of `len` characters.
fn threshold(len: usize) -> usize {
    match len {
        0 => 0,
        1..=2 => 1,
        3..=5 => 2,
        6..=10 => 3,
        n => (n / 2).min(5),
    }
}

/// Closest candidate within the threshold; ties go to the earliest.
pub(crate) fn suggest_similar<'a>(
    name: &str,
    candidates: impl Iterator<Item = &'a str>,
) -> Option<&'a str> {
    let limit = threshold(name.chars().count());
    let mut best: Option<(&str, usize)> = None;
    for candidate in candidates {
        if name.len().abs_diff(candidate.len()) > limit {
            continue;
        }
        let distance = edit_distance(name, candidate);
        if distance <= limit && !matches!(best, Some((_, d)) if d <= distance) {
            best = Some((candidate, distance));
        }
    }
    best.map(|(candidate, _)| candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_distance() {
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("Meter", "Meter"), 0);
        assert_eq!(edit_distance("", "abc"), 3);
    }

    #[test]
    fn test_suggest_similar() {
        let units = ["Meter", "Second", "Kelvin"];
        assert_eq!(suggest_similar("Metre", units.into_iter()), Some("Meter"));
        assert_eq!(suggest_similar("Secnd", units.into_iter()), Some("Second"));
        assert_eq!(suggest_similar("Furlong", units.into_iter()), None);
        assert_eq!(suggest_similar("", units.into_iter()), None);
    }
}
