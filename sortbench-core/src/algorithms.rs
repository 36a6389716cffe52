//! Built-in Sorters
//!
//! Reference implementations registered by the CLI. They also serve as
//! known-good candidates in tests.

use crate::error::BoxError;
use crate::registry::{AlgorithmDescriptor, Registry};
use crate::sorter::Sorter;

/// Slices at or below this length are finished with insertion sort
const INSERTION_THRESHOLD: usize = 16;

/// Initial scratch capacity reserved by [`MergeSort::setup`]
const MERGE_SCRATCH_CAPACITY: usize = 1 << 16;

/// The standard library's stable sort
#[derive(Debug, Default)]
pub struct StdSort;

impl Sorter for StdSort {
    fn sort(&mut self, mut input: Vec<i32>) -> Vec<i32> {
        input.sort();
        input
    }
}

/// Top-down merge sort reusing one scratch buffer across calls
#[derive(Debug, Default)]
pub struct MergeSort {
    scratch: Vec<i32>,
}

impl Sorter for MergeSort {
    fn setup(&mut self) -> Result<(), BoxError> {
        self.scratch.try_reserve(MERGE_SCRATCH_CAPACITY)?;
        Ok(())
    }

    fn sort(&mut self, mut input: Vec<i32>) -> Vec<i32> {
        self.scratch.clear();
        self.scratch.extend_from_slice(&input);
        merge_sort(&mut input, &mut self.scratch);
        input
    }
}

/// Sorts `v`; `buf` must hold a copy of `v` on entry
fn merge_sort(v: &mut [i32], buf: &mut [i32]) {
    if v.len() <= INSERTION_THRESHOLD {
        insertion_sort(v);
        return;
    }
    let mid = v.len() / 2;
    {
        let (buf_left, buf_right) = buf.split_at_mut(mid);
        let (left, right) = v.split_at_mut(mid);
        // Sort the halves into `buf`, using `v` as their scratch space
        merge_sort(buf_left, left);
        merge_sort(buf_right, right);
    }
    let (left, right) = buf.split_at(mid);
    let (mut i, mut j) = (0, 0);
    for slot in v.iter_mut() {
        if j >= right.len() || (i < left.len() && left[i] <= right[j]) {
            *slot = left[i];
            i += 1;
        } else {
            *slot = right[j];
            j += 1;
        }
    }
}

/// Quicksort with median-of-three pivots, recursing into the smaller side
#[derive(Debug, Default)]
pub struct QuickSort;

impl Sorter for QuickSort {
    fn sort(&mut self, mut input: Vec<i32>) -> Vec<i32> {
        quicksort(&mut input);
        input
    }
}

fn quicksort(mut v: &mut [i32]) {
    while v.len() > INSERTION_THRESHOLD {
        let pivot = partition(v);
        let (left, rest) = std::mem::take(&mut v).split_at_mut(pivot);
        let right = &mut rest[1..];
        if left.len() < right.len() {
            quicksort(left);
            v = right;
        } else {
            quicksort(right);
            v = left;
        }
    }
    insertion_sort(v);
}

/// Lomuto partition around the median of first, middle and last
fn partition(v: &mut [i32]) -> usize {
    let last = v.len() - 1;
    let mid = v.len() / 2;
    if v[mid] < v[0] {
        v.swap(mid, 0);
    }
    if v[last] < v[0] {
        v.swap(last, 0);
    }
    if v[mid] < v[last] {
        v.swap(mid, last);
    }

    let pivot = v[last];
    let mut store = 0;
    for i in 0..last {
        if v[i] < pivot {
            v.swap(i, store);
            store += 1;
        }
    }
    v.swap(store, last);
    store
}

/// In-place heap sort
#[derive(Debug, Default)]
pub struct HeapSort;

impl Sorter for HeapSort {
    fn sort(&mut self, mut input: Vec<i32>) -> Vec<i32> {
        let len = input.len();
        for start in (0..len / 2).rev() {
            sift_down(&mut input, start, len);
        }
        for end in (1..len).rev() {
            input.swap(0, end);
            sift_down(&mut input, 0, end);
        }
        input
    }
}

fn sift_down(v: &mut [i32], mut root: usize, end: usize) {
    loop {
        let mut child = 2 * root + 1;
        if child >= end {
            return;
        }
        if child + 1 < end && v[child] < v[child + 1] {
            child += 1;
        }
        if v[root] >= v[child] {
            return;
        }
        v.swap(root, child);
        root = child;
    }
}

/// Shell sort with Ciura's gap sequence, extended by a factor of 2.25
#[derive(Debug, Default)]
pub struct ShellSort;

impl Sorter for ShellSort {
    fn sort(&mut self, mut input: Vec<i32>) -> Vec<i32> {
        let mut gaps = vec![1usize, 4, 10, 23, 57, 132, 301, 701];
        while let Some(&largest) = gaps.last() {
            let next = (largest as f64 * 2.25) as usize;
            if next >= input.len() {
                break;
            }
            gaps.push(next);
        }

        for &gap in gaps.iter().rev() {
            for i in gap..input.len() {
                let value = input[i];
                let mut j = i;
                while j >= gap && input[j - gap] > value {
                    input[j] = input[j - gap];
                    j -= gap;
                }
                input[j] = value;
            }
        }
        input
    }
}

fn insertion_sort(v: &mut [i32]) {
    for i in 1..v.len() {
        let value = v[i];
        let mut j = i;
        while j > 0 && v[j - 1] > value {
            v[j] = v[j - 1];
            j -= 1;
        }
        v[j] = value;
    }
}

/// Descriptors for every built-in sorter
pub fn builtin_descriptors() -> Vec<AlgorithmDescriptor> {
    vec![
        AlgorithmDescriptor::of::<HeapSort>("HeapSort"),
        AlgorithmDescriptor::of::<MergeSort>("MergeSort"),
        AlgorithmDescriptor::of::<QuickSort>("QuickSort"),
        AlgorithmDescriptor::of::<ShellSort>("ShellSort"),
        AlgorithmDescriptor::of::<StdSort>("StdSort"),
    ]
}

/// Register every built-in sorter
pub fn register_builtins(registry: &mut Registry) {
    for descriptor in builtin_descriptors() {
        registry.register(descriptor);
    }
}
