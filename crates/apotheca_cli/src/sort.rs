//! Display-ordering sorts for item listings.
//!
//! Three classic list sorts, one per sortable column. They order a
//! snapshot for printing only; the index layer is not involved and nothing
//! here feeds back into storage.

use apotheca_core::Item;

/// Sorts items by name, case-insensitively, with an in-place quicksort
/// (Lomuto partition, last element as pivot).
pub fn quick_sort_by_name(items: &mut [Item]) {
    if items.len() > 1 {
        quick_sort(items);
    }
}

fn quick_sort(items: &mut [Item]) {
    if items.len() <= 1 {
        return;
    }
    let pivot = partition(items);
    let (left, right) = items.split_at_mut(pivot);
    quick_sort(left);
    quick_sort(&mut right[1..]);
}

fn partition(items: &mut [Item]) -> usize {
    let pivot = items.len() - 1;
    let pivot_name = items[pivot].name.to_lowercase();
    let mut boundary = 0;
    for i in 0..pivot {
        if items[i].name.to_lowercase() <= pivot_name {
            items.swap(i, boundary);
            boundary += 1;
        }
    }
    items.swap(boundary, pivot);
    boundary
}

/// Sorts items by stock quantity, ascending, with a bubble sort.
pub fn bubble_sort_by_quantity(items: &mut [Item]) {
    let n = items.len();
    for pass in 0..n {
        for i in 0..n.saturating_sub(pass + 1) {
            if items[i].quantity > items[i + 1].quantity {
                items.swap(i, i + 1);
            }
        }
    }
}

/// Sorts items by expiry date, ascending, with a top-down merge sort.
pub fn merge_sort_by_expiry(items: &mut [Item]) {
    if items.len() <= 1 {
        return;
    }
    let mid = items.len() / 2;
    merge_sort_by_expiry(&mut items[..mid]);
    merge_sort_by_expiry(&mut items[mid..]);

    let merged = {
        let (left, right) = items.split_at(mid);
        let mut merged = Vec::with_capacity(items.len());
        let (mut i, mut j) = (0, 0);
        while i < left.len() && j < right.len() {
            // <= keeps the merge stable.
            if left[i].expiry <= right[j].expiry {
                merged.push(left[i].clone());
                i += 1;
            } else {
                merged.push(right[j].clone());
                j += 1;
            }
        }
        merged.extend_from_slice(&left[i..]);
        merged.extend_from_slice(&right[j..]);
        merged
    };
    items.clone_from_slice(&merged);
}
