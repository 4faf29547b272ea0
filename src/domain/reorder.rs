//! Pure remove-and-reinsert operations over ordered sequences.
//!
//! Both functions copy their inputs and return fresh vectors, so callers can
//! compare old and new sequences to detect a change.

/// Moves the element at `from_index` to `to_index` within one sequence.
///
/// `to_index` is interpreted against the sequence *after* the element has
/// been removed, and is clamped to its length. An out-of-range `from_index`
/// returns an unchanged copy.
///
/// # Examples
/// ```
/// use kanban_core::domain::reorder::reorder_within_column;
///
/// let ids = vec!["A", "B", "C"];
/// assert_eq!(reorder_within_column(&ids, 0, 2), vec!["B", "C", "A"]);
/// assert_eq!(ids, vec!["A", "B", "C"]);
/// ```
pub fn reorder_within_column<T: Clone>(
    sequence: &[T],
    from_index: usize,
    to_index: usize,
) -> Vec<T> {
    let mut result = sequence.to_vec();
    if from_index >= result.len() {
        return result;
    }

    let removed = result.remove(from_index);
    let to_index = to_index.min(result.len());
    result.insert(to_index, removed);
    result
}

/// Moves the element at `from_index` in `source` into `destination` at
/// `to_index` (clamped to the destination length).
///
/// Returns the new `(source, destination)` pair. An out-of-range
/// `from_index` returns unchanged copies of both.
pub fn move_between_sequences<T: Clone>(
    source: &[T],
    destination: &[T],
    from_index: usize,
    to_index: usize,
) -> (Vec<T>, Vec<T>) {
    let mut source = source.to_vec();
    let mut destination = destination.to_vec();
    if from_index >= source.len() {
        return (source, destination);
    }

    let removed = source.remove(from_index);
    let to_index = to_index.min(destination.len());
    destination.insert(to_index, removed);
    (source, destination)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 2, vec!["B", "C", "A"])]
    #[case(2, 0, vec!["C", "A", "B"])]
    #[case(1, 1, vec!["A", "B", "C"])]
    #[case(0, 99, vec!["B", "C", "A"])]
    #[case(7, 0, vec!["A", "B", "C"])]
    fn test_reorder_within_column(
        #[case] from: usize,
        #[case] to: usize,
        #[case] expected: Vec<&'static str>,
    ) {
        let ids = vec!["A", "B", "C"];
        assert_eq!(reorder_within_column(&ids, from, to), expected);
    }

    #[test]
    fn test_reorder_does_not_mutate_input() {
        let ids = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        let before = ids.clone();

        let reordered = reorder_within_column(&ids, 0, 2);

        assert_eq!(ids, before);
        assert_ne!(reordered, before);
    }

    #[test]
    fn test_reorder_is_a_permutation() {
        let ids: Vec<u32> = (0..6).collect();
        for from in 0..ids.len() {
            for to in 0..ids.len() {
                let mut reordered = reorder_within_column(&ids, from, to);
                assert_eq!(reordered.len(), ids.len());
                reordered.sort_unstable();
                assert_eq!(reordered, ids);
            }
        }
    }

    #[test]
    fn test_move_between_sequences() {
        let todo = vec!["A", "B"];
        let done: Vec<&str> = Vec::new();

        let (todo_after, done_after) = move_between_sequences(&todo, &done, 0, 0);

        assert_eq!(todo_after, vec!["B"]);
        assert_eq!(done_after, vec!["A"]);
        assert_eq!(todo, vec!["A", "B"]);
        assert!(done.is_empty());
    }

    #[test]
    fn test_move_between_sequences_clamps_target_index() {
        let source = vec!["A"];
        let destination = vec!["X", "Y"];

        let (source_after, destination_after) =
            move_between_sequences(&source, &destination, 0, 10);

        assert!(source_after.is_empty());
        assert_eq!(destination_after, vec!["X", "Y", "A"]);
    }

    #[test]
    fn test_move_between_sequences_out_of_range_source() {
        let source = vec!["A"];
        let destination = vec!["X"];

        let (source_after, destination_after) =
            move_between_sequences(&source, &destination, 3, 0);

        assert_eq!(source_after, source);
        assert_eq!(destination_after, destination);
    }
}
