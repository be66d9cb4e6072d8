//! Edit distance for typo suggestions.

/// Classic dynamic-programming Levenshtein distance over characters.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Two-row rolling window over the full matrix
    let mut prev: Vec<usize> = (0..=a.len()).collect();
    let mut curr: Vec<usize> = vec![0; a.len() + 1];

    for (i, bc) in b.iter().enumerate() {
        curr[0] = i + 1;
        for (j, ac) in a.iter().enumerate() {
            let substitution = prev[j] + usize::from(ac != bc);
            curr[j + 1] = substitution.min(curr[j] + 1).min(prev[j + 1] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[a.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_is_zero() {
        assert_eq!(edit_distance("help", "help"), 0);
        assert_eq!(edit_distance("", ""), 0);
    }

    #[test]
    fn test_known_distances() {
        assert_eq!(edit_distance("core", "cor"), 1);
        assert_eq!(edit_distance("help", "hlep"), 2);
        assert_eq!(edit_distance("matrix", "matrx"), 1);
        assert_eq!(edit_distance("status", "statis"), 1);
        assert_eq!(edit_distance("abc", "xyz"), 3);
    }

    #[test]
    fn test_empty_side() {
        assert_eq!(edit_distance("", "fortune"), 7);
        assert_eq!(edit_distance("sudo", ""), 4);
    }

    #[test]
    fn test_unicode_chars_count_once() {
        assert_eq!(edit_distance("héllo", "hello"), 1);
    }
}
