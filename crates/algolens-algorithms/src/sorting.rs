//! In-place sorting step generators.
//!
//! Every generator copies the input, narrates each comparison and move and
//! returns the sorted copy. [`StepKind::Swap`] always carries the full array
//! after the move and [`StepKind::SortedBoundary`] marks the frontier of the
//! settled region as each algorithm defines it: from the right for bubble
//! sort, from the left for selection and insertion sort, one settled pivot
//! at a time for quicksort.

use algolens_core::{StepKind, StepRecord, StepTrace};
use tracing::debug;

use crate::error::{AlgorithmError, AlgorithmResult};

fn join(arr: &[i64]) -> String {
    arr.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn push_swap(trace: &mut StepTrace, indices: Vec<usize>, arr: &[i64], message: String, line: u32) {
    trace.push(StepRecord::new(
        StepKind::Swap {
            indices,
            array: arr.to_vec(),
        },
        message,
        line,
    ));
}

fn push_boundary(trace: &mut StepTrace, boundary: usize, message: String, line: u32) {
    trace.push(StepRecord::new(
        StepKind::SortedBoundary { boundary },
        message,
        line,
    ));
}

/// Bubble sort with the early exit on a swap-free pass.
pub fn bubble_sort(array: &[i64]) -> AlgorithmResult<(StepTrace, Vec<i64>)> {
    if array.is_empty() {
        return Err(AlgorithmError::EmptyInput);
    }
    debug!(len = array.len(), "bubble sort");
    let mut trace = StepTrace::new();
    let mut arr = array.to_vec();
    let n = arr.len();

    trace.push_message(format!("Starting Bubble Sort on array: [{}]", join(&arr)), 1);

    for i in 0..n.saturating_sub(1) {
        let mut swapped = false;
        for j in 0..n - i - 1 {
            trace.push(StepRecord::new(
                StepKind::CompareIndices {
                    left: j,
                    right: j + 1,
                },
                format!(
                    "Comparing elements at index {j} ({}) and {} ({})",
                    arr[j],
                    j + 1,
                    arr[j + 1]
                ),
                5,
            ));
            if arr[j] > arr[j + 1] {
                let (val1, val2) = (arr[j], arr[j + 1]);
                arr.swap(j, j + 1);
                swapped = true;
                push_swap(
                    &mut trace,
                    vec![j, j + 1],
                    &arr,
                    format!("{val1} > {val2}. Swapping them."),
                    6,
                );
            } else {
                trace.push_message(format!("{} <= {}. No swap needed.", arr[j], arr[j + 1]), 5);
            }
        }
        push_boundary(
            &mut trace,
            n - 1 - i,
            format!(
                "Element {} is now in its correct sorted position.",
                arr[n - 1 - i]
            ),
            8,
        );
        if !swapped {
            trace.push_message("No swaps in this pass. Array is sorted.", 8);
            break;
        }
    }

    push_boundary(&mut trace, 0, "The entire array is now sorted.".to_string(), 10);
    trace.push_message(format!("Bubble Sort complete. Final array: [{}]", join(&arr)), 10);
    Ok((trace, arr))
}

/// Selection sort; the running minimum is marked with
/// [`StepKind::MarkIndices`] as it moves.
pub fn selection_sort(array: &[i64]) -> AlgorithmResult<(StepTrace, Vec<i64>)> {
    if array.is_empty() {
        return Err(AlgorithmError::EmptyInput);
    }
    debug!(len = array.len(), "selection sort");
    let mut trace = StepTrace::new();
    let mut arr = array.to_vec();
    let n = arr.len();

    trace.push_message(
        format!("Starting Selection Sort on array: [{}]", join(&arr)),
        1,
    );

    for i in 0..n.saturating_sub(1) {
        let mut min_index = i;
        trace.push_message(
            format!(
                "Outer loop pass {}. Finding minimum in unsorted part starting at index {i}.",
                i + 1
            ),
            3,
        );
        trace.push(StepRecord::new(
            StepKind::MarkIndices { indices: vec![i] },
            format!(
                "Current minimum assumed to be {} at index {min_index}.",
                arr[min_index]
            ),
            4,
        ));

        for j in i + 1..n {
            trace.push(StepRecord::new(
                StepKind::CompareIndices {
                    left: j,
                    right: min_index,
                },
                format!(
                    "Comparing element {} with current minimum {}.",
                    arr[j], arr[min_index]
                ),
                6,
            ));
            if arr[j] < arr[min_index] {
                let old_min = arr[min_index];
                min_index = j;
                trace.push(StepRecord::new(
                    StepKind::MarkIndices { indices: vec![j] },
                    format!("{} < {old_min}. New minimum is {}.", arr[j], arr[j]),
                    7,
                ));
            }
        }

        if min_index != i {
            let (val1, val2) = (arr[i], arr[min_index]);
            arr.swap(i, min_index);
            push_swap(
                &mut trace,
                vec![i, min_index],
                &arr,
                format!(
                    "Swapping minimum element {val2} with element at start of unsorted part {val1}."
                ),
                10,
            );
        } else {
            trace.push_message(
                format!("Element {} is already in its correct position.", arr[i]),
                10,
            );
        }
        push_boundary(
            &mut trace,
            i,
            format!("Element {} is now sorted.", arr[i]),
            10,
        );
    }

    push_boundary(
        &mut trace,
        n - 1,
        "The entire array is now sorted.".to_string(),
        12,
    );
    trace.push_message(
        format!("Selection Sort complete. Final array: [{}]", join(&arr)),
        12,
    );
    Ok((trace, arr))
}

/// Insertion sort. Shifts are emitted as single-index swaps carrying the
/// array after each move, and the final placement of the key is its own
/// swap step.
pub fn insertion_sort(array: &[i64]) -> AlgorithmResult<(StepTrace, Vec<i64>)> {
    if array.is_empty() {
        return Err(AlgorithmError::EmptyInput);
    }
    debug!(len = array.len(), "insertion sort");
    let mut trace = StepTrace::new();
    let mut arr = array.to_vec();
    let n = arr.len();

    trace.push_message(
        format!("Starting Insertion Sort on array: [{}]", join(&arr)),
        1,
    );
    push_boundary(
        &mut trace,
        0,
        "First element is considered sorted.".to_string(),
        1,
    );

    for i in 1..n {
        let key = arr[i];
        let mut j = i as i64 - 1;
        trace.push(StepRecord::new(
            StepKind::MarkIndices { indices: vec![i] },
            format!("Selecting {key} as the key to insert into the sorted portion."),
            3,
        ));

        if j >= 0 {
            trace.push(StepRecord::new(
                StepKind::CompareIndices {
                    left: j as usize,
                    right: i,
                },
                format!("Comparing key {key} with {}.", arr[j as usize]),
                5,
            ));
        }
        while j >= 0 && arr[j as usize] > key {
            arr[j as usize + 1] = arr[j as usize];
            push_swap(
                &mut trace,
                vec![j as usize + 1, j as usize],
                &arr,
                format!(
                    "{} > {key}. Shifting {} to the right.",
                    arr[j as usize + 1],
                    arr[j as usize + 1]
                ),
                6,
            );
            j -= 1;
            if j >= 0 {
                trace.push(StepRecord::new(
                    StepKind::CompareIndices {
                        left: j as usize,
                        right: i,
                    },
                    format!("Comparing key {key} with {}.", arr[j as usize]),
                    5,
                ));
            }
        }
        arr[(j + 1) as usize] = key;
        push_swap(
            &mut trace,
            vec![(j + 1) as usize],
            &arr,
            format!("Inserting key {key} at its correct position."),
            9,
        );
        push_boundary(
            &mut trace,
            i,
            format!("Elements up to index {i} are now sorted."),
            2,
        );
    }

    trace.push_message(
        format!("Insertion Sort complete. Final array: [{}]", join(&arr)),
        11,
    );
    Ok((trace, arr))
}

/// Lomuto-partition quicksort with the last element of each range as pivot.
pub fn quick_sort(array: &[i64]) -> AlgorithmResult<(StepTrace, Vec<i64>)> {
    if array.is_empty() {
        return Err(AlgorithmError::EmptyInput);
    }
    debug!(len = array.len(), "quick sort");
    let mut trace = StepTrace::new();
    let mut arr = array.to_vec();

    trace.push_message(format!("Starting Quick Sort on array: [{}]", join(&arr)), 1);

    let high = arr.len() as i64 - 1;
    quick_sort_range(&mut arr, &mut trace, 0, high);

    trace.push_message(format!("Quick Sort complete. Final array: [{}]", join(&arr)), 7);
    Ok((trace, arr))
}

fn quick_sort_range(arr: &mut [i64], trace: &mut StepTrace, low: i64, high: i64) {
    if low < high {
        trace.push_message(
            format!("Calling partition on subarray from index {low} to {high}."),
            2,
        );
        let pi = partition(arr, trace, low as usize, high as usize) as i64;
        trace.push_message(
            format!("Recursively sorting left part: [{low}, {}]", pi - 1),
            4,
        );
        quick_sort_range(arr, trace, low, pi - 1);
        trace.push_message(
            format!("Recursively sorting right part: [{}, {high}]", pi + 1),
            5,
        );
        quick_sort_range(arr, trace, pi + 1, high);
    }
}

fn partition(arr: &mut [i64], trace: &mut StepTrace, low: usize, high: usize) -> usize {
    let pivot = arr[high];
    trace.push(StepRecord::new(
        StepKind::SetPivot { index: high },
        format!("Choosing {pivot} as the pivot for range [{low}, {high}]."),
        9,
    ));
    let mut i = low;

    for j in low..high {
        trace.push(StepRecord::new(
            StepKind::CompareIndices {
                left: j,
                right: high,
            },
            format!("Comparing {} with pivot {pivot}.", arr[j]),
            11,
        ));
        if arr[j] < pivot {
            let (val1, val2) = (arr[i], arr[j]);
            arr.swap(i, j);
            push_swap(
                trace,
                vec![i, j],
                arr,
                format!("{val2} < {pivot}. Swapping {val1} and {val2}."),
                13,
            );
            i += 1;
        }
    }

    let val2 = arr[high];
    arr.swap(i, high);
    push_swap(
        trace,
        vec![i, high],
        arr,
        format!("Placing pivot {val2} at its final sorted position."),
        16,
    );
    push_boundary(trace, i, format!("Pivot {} is now sorted.", arr[i]), 17);
    i
}

#[cfg(test)]
mod tests {
    use super::*;

    fn final_array(trace: &StepTrace) -> Option<&Vec<i64>> {
        trace.iter().rev().find_map(|s| match &s.kind {
            StepKind::Swap { array, .. } => Some(array),
            _ => None,
        })
    }

    #[test]
    fn test_bubble_sort_sorts_and_narrates() {
        let (trace, sorted) = bubble_sort(&[5, 1, 4, 2, 8]).unwrap();
        assert_eq!(sorted, vec![1, 2, 4, 5, 8]);
        assert_eq!(final_array(&trace), Some(&sorted));
        assert!(matches!(
            trace.last().map(|s| &s.kind),
            Some(StepKind::Message)
        ));
    }

    #[test]
    fn test_bubble_sort_early_exit_on_sorted_input() {
        let (trace, _) = bubble_sort(&[1, 2, 3, 4]).unwrap();
        assert!(trace
            .iter()
            .any(|s| s.message == "No swaps in this pass. Array is sorted."));
        assert!(!trace.iter().any(|s| matches!(s.kind, StepKind::Swap { .. })));
    }

    #[test]
    fn test_bubble_sort_boundary_walks_right_to_left() {
        let (trace, _) = bubble_sort(&[3, 2, 1]).unwrap();
        let boundaries: Vec<usize> = trace
            .iter()
            .filter_map(|s| match s.kind {
                StepKind::SortedBoundary { boundary } => Some(boundary),
                _ => None,
            })
            .collect();
        assert_eq!(boundaries, vec![2, 1, 0]);
    }

    #[test]
    fn test_selection_sort_marks_running_minimum() {
        let (trace, sorted) = selection_sort(&[64, 25, 12, 22, 11]).unwrap();
        assert_eq!(sorted, vec![11, 12, 22, 25, 64]);
        assert!(trace
            .iter()
            .any(|s| matches!(s.kind, StepKind::MarkIndices { .. })));
    }

    #[test]
    fn test_insertion_sort_first_boundary_precedes_any_compare() {
        let (trace, sorted) = insertion_sort(&[4, 3, 2, 10, 12, 1]).unwrap();
        assert_eq!(sorted, vec![1, 2, 3, 4, 10, 12]);
        let boundary_pos = trace
            .iter()
            .position(|s| matches!(s.kind, StepKind::SortedBoundary { .. }));
        let compare_pos = trace
            .iter()
            .position(|s| matches!(s.kind, StepKind::CompareIndices { .. }));
        assert!(boundary_pos < compare_pos);
    }

    #[test]
    fn test_quick_sort_settles_each_pivot() {
        let (trace, sorted) = quick_sort(&[10, 7, 8, 9, 1, 5]).unwrap();
        assert_eq!(sorted, vec![1, 5, 7, 8, 9, 10]);
        let pivots = trace
            .iter()
            .filter(|s| matches!(s.kind, StepKind::SetPivot { .. }))
            .count();
        let boundaries = trace
            .iter()
            .filter(|s| matches!(s.kind, StepKind::SortedBoundary { .. }))
            .count();
        assert_eq!(pivots, boundaries);
    }

    #[test]
    fn test_single_element_arrays_sort_trivially() {
        let (_, sorted) = bubble_sort(&[7]).unwrap();
        assert_eq!(sorted, vec![7]);
        let (_, sorted) = quick_sort(&[7]).unwrap();
        assert_eq!(sorted, vec![7]);
    }

    #[test]
    fn test_empty_input_is_rejected() {
        assert_eq!(bubble_sort(&[]), Err(AlgorithmError::EmptyInput));
        assert_eq!(selection_sort(&[]), Err(AlgorithmError::EmptyInput));
        assert_eq!(insertion_sort(&[]), Err(AlgorithmError::EmptyInput));
        assert_eq!(quick_sort(&[]), Err(AlgorithmError::EmptyInput));
    }

    #[test]
    fn test_swap_steps_carry_array_snapshots() {
        let (trace, _) = selection_sort(&[2, 1]).unwrap();
        for step in trace.iter() {
            if let StepKind::Swap { array, .. } = &step.kind {
                assert_eq!(array.len(), 2);
            }
        }
    }
}
