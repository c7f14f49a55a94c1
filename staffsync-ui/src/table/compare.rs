//! Cell comparison and the row ordering built on it.

use std::cmp::Ordering;

/// Parse a cell as a number, ignoring surrounding whitespace.
///
/// Empty cells and `NaN` are not numbers.
pub fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|n| !n.is_nan())
}

/// Compare two cells.
///
/// The mode is chosen for this pair only: numeric when both cells parse as
/// numbers, lexical otherwise. A column mixing numbers and text can therefore
/// produce a non-transitive ordering; [`merge_sort_by`] tolerates that.
pub fn compare_cells(a: &str, b: &str) -> Ordering {
    let (a, b) = (a.trim(), b.trim());
    match (parse_number(a), parse_number(b)) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        _ => compare_text(a, b),
    }
}

/// Lexical comparison: case-folded first. Texts that differ only in case put
/// the lowercase spelling first (`"bob"` before `"Bob"`), as locale collation
/// does.
fn compare_text(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        .then_with(|| b.cmp(a))
}

/// Stable top-down merge sort.
///
/// Unlike `slice::sort_by` this never panics when `compare` is not a total
/// order; it just yields some permutation of the input.
pub fn merge_sort_by<T, F>(items: Vec<T>, compare: &mut F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    if items.len() <= 1 {
        return items;
    }

    let mut left = items;
    let right = left.split_off(left.len() / 2);
    let left = merge_sort_by(left, compare);
    let right = merge_sort_by(right, compare);

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    loop {
        let take_right = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => compare(r, l) == Ordering::Less,
            (Some(_), None) => false,
            (None, Some(_)) => true,
            (None, None) => break,
        };
        let next = if take_right { right.next() } else { left.next() };
        merged.extend(next);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number(" 42 "), Some(42.0));
        assert_eq!(parse_number("-1.5"), Some(-1.5));
        assert_eq!(parse_number("1e3"), Some(1000.0));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("12abc"), None);
    }

    #[test]
    fn test_numeric_pair() {
        assert_eq!(compare_cells("5", "30"), Ordering::Less);
        assert_eq!(compare_cells("100", "30"), Ordering::Greater);
        assert_eq!(compare_cells("2.0", "2"), Ordering::Equal);
    }

    #[test]
    fn test_lexical_pair() {
        assert_eq!(compare_cells("amy", "Bob"), Ordering::Less);
        assert_eq!(compare_cells("bob", "Bob"), Ordering::Less);
        assert_eq!(compare_cells("Bob", "bob"), Ordering::Greater);
        assert_eq!(compare_cells("bob", "bob"), Ordering::Equal);
        // One side is text, so "30" is compared as a string.
        assert_eq!(compare_cells("30", "abc"), Ordering::Less);
        assert_eq!(compare_cells("5", "30x"), Ordering::Greater);
    }

    #[test]
    fn test_lowercase_before_uppercase_variant() {
        let names = vec!["Bob", "amy", "bob", "Amy"];
        let sorted = merge_sort_by(names, &mut |a: &&str, b: &&str| compare_cells(a, b));
        assert_eq!(sorted, ["amy", "Amy", "bob", "Bob"]);
    }

    #[test]
    fn test_merge_sort_is_stable() {
        let items = vec![(1, 'a'), (0, 'b'), (1, 'c'), (0, 'd')];
        let sorted = merge_sort_by(items, &mut |x: &(i32, char), y: &(i32, char)| x.0.cmp(&y.0));
        assert_eq!(sorted, vec![(0, 'b'), (0, 'd'), (1, 'a'), (1, 'c')]);
    }

    #[test]
    fn test_merge_sort_survives_cycles() {
        // 9 < 10 numerically, "10" < "1a" and "1a" < "9" lexically.
        let items = vec!["1a", "10", "9", "1a", "9", "10"];
        let sorted = merge_sort_by(items.clone(), &mut |a: &&str, b: &&str| compare_cells(a, b));
        assert_eq!(sorted.len(), items.len());
        let mut expected = items;
        expected.sort();
        let mut got = sorted;
        got.sort();
        assert_eq!(got, expected);
    }
}
