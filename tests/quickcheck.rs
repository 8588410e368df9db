use quickcheck::{Arbitrary, Gen, TestResult};
use quickcheck_macros::quickcheck;
use std::collections::BTreeSet;
use tree_set::{OrderedSet, SetError};

/// An operation on an `OrderedSet`, mirrored on a `BTreeSet` model.
#[derive(Clone, Debug)]
enum Op {
    /// Add an item to the set.
    Add(i8),
    /// Remove an item from the set, present or not.
    Remove(i8),
    /// Remove the item at index `n % set.len()` from the set.
    RemoveNth(usize),
    /// Add an item through `between(lower, upper)`.
    AddBetween(i8, i8, i8),
    /// Remove every item of `from(lower)` divisible by `n % 4 + 1`, through the view's iterator.
    RemoveIter(i8, u8),
}

impl Arbitrary for Op {
    fn arbitrary(gen: &mut Gen) -> Self {
        match gen.choose(&[0, 1, 2, 3, 4]).copied() {
            Some(0) => Op::Add(i8::arbitrary(gen)),
            Some(1) => Op::Remove(i8::arbitrary(gen)),
            Some(2) => Op::RemoveNth(usize::arbitrary(gen)),
            Some(3) => Op::AddBetween(i8::arbitrary(gen), i8::arbitrary(gen), i8::arbitrary(gen)),
            _ => Op::RemoveIter(i8::arbitrary(gen), u8::arbitrary(gen)),
        }
    }
}

impl Op {
    /// Perform the operation on the set and the model.
    fn exec(self, set: &mut OrderedSet<i8>, model: &mut BTreeSet<i8>) {
        match self {
            Op::Add(item) => assert_eq!(set.add(item), model.insert(item)),
            Op::Remove(item) => assert_eq!(set.remove(&item), model.remove(&item)),
            Op::RemoveNth(index) => if !model.is_empty() {
                let item = *model.iter().nth(index % model.len()).unwrap();
                assert!(set.remove(&item));
                model.remove(&item);
            },
            Op::AddBetween(lower, upper, item) => {
                let view = set.between(lower, upper);
                if lower <= item && item < upper {
                    assert_eq!(view.add(item), Ok(model.insert(item)));
                } else {
                    assert_eq!(view.add(item), Err(SetError::OutOfRange));
                }
            }
            Op::RemoveIter(lower, step) => {
                let step = i16::from(step % 4) + 1;
                let mut it = set.from(lower).iter();
                while let Some(item) = it.next() {
                    if i16::from(item) % step == 0 {
                        it.remove().unwrap();
                        model.remove(&item);
                    }
                }
            }
        }
    }
}

#[quickcheck]
fn matches_model(ops: Vec<Op>) -> bool {
    let mut set = OrderedSet::new();
    let mut model = BTreeSet::new();

    for op in ops { op.exec(&mut set, &mut model); }

    set.check_invariant() &&
    set.len() == model.len() &&
    set.to_vec() == model.iter().cloned().collect::<Vec<_>>()
}

#[quickcheck]
fn iterates_sorted_distinct(items: Vec<i32>) -> bool {
    let set: OrderedSet<_> = items.iter().cloned().collect();
    let model: BTreeSet<_> = items.into_iter().collect();
    set.iter().eq(model.into_iter())
}

#[quickcheck]
fn add_then_remove_restores(items: Vec<i32>, item: i32) -> TestResult {
    let mut set: OrderedSet<_> = items.into_iter().collect();
    if set.contains(&item) { return TestResult::discard(); }

    let before = set.to_vec();
    let height = set.height();

    set.add(item);
    set.remove(&item);

    TestResult::from_bool(set.to_vec() == before && set.height() <= height && set.check_invariant())
}

#[quickcheck]
fn remove_never_grows_height(items: Vec<i32>, index: usize) -> TestResult {
    let mut set: OrderedSet<_> = items.into_iter().collect();
    if set.is_empty() { return TestResult::discard(); }

    let item = set.to_vec()[index % set.len()];
    let height = set.height();
    let len = set.len();

    TestResult::from_bool(
        set.remove(&item) &&
        set.height() <= height &&
        set.len() == len - 1 &&
        !set.contains(&item) &&
        set.check_invariant()
    )
}

#[quickcheck]
fn remove_affects_no_others(items: Vec<i32>, item: i32) -> bool {
    let mut set: OrderedSet<_> = items.into_iter().collect();
    let expected: Vec<_> = set.iter().filter(|&other| other != item).collect();

    set.remove(&item);
    set.to_vec() == expected
}

#[quickcheck]
fn view_matches_filter(items: Vec<i16>, lower: i16, upper: i16) -> bool {
    let set: OrderedSet<_> = items.into_iter().collect();
    let view = set.between(lower, upper);
    let expected: Vec<_> = set.iter().filter(|&item| lower <= item && item < upper).collect();

    view.to_vec() == expected &&
    view.iter().collect::<Vec<_>>() == expected &&
    view.len() == expected.len() &&
    view.first().ok() == expected.first().cloned() &&
    view.last().ok() == expected.last().cloned() &&
    expected.iter().all(|item| view.contains(item))
}

#[quickcheck]
fn nested_view_intersects(items: Vec<i16>, a: (i16, i16), b: (i16, i16)) -> bool {
    let set: OrderedSet<_> = items.into_iter().collect();
    let nested = set.between(a.0, a.1).between(b.0, b.1);
    let (lower, upper) = (a.0.max(b.0), a.1.min(b.1));

    nested.to_vec() == set.between(lower, upper).to_vec()
}

#[quickcheck]
fn neighbors(items: Vec<i32>, item: i32) -> bool {
    let set: OrderedSet<_> = items.iter().cloned().collect();
    let model: BTreeSet<_> = items.into_iter().collect();

    set.pred(&item, false) == model.range(..item).next_back().cloned() &&
    set.pred(&item, true) == model.range(..=item).next_back().cloned() &&
    set.succ(&item, false) == model.range(item..).find(|&&other| other != item).cloned() &&
    set.succ(&item, true) == model.range(item..).next().cloned()
}
