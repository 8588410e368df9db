use ::ordered_iter::OrderedSetIterator;
use super::set::Iter;

impl<T> OrderedSetIterator for Iter<T> where T: Ord + Clone {}

#[cfg(test)]
mod test {
    use ::ordered_iter::OrderedSetIterator;
    use crate::OrderedSet;

    #[test]
    fn test_inner_join() {
        let a: OrderedSet<_> = vec![1, 2, 3, 5, 8].into_iter().collect();
        let b: OrderedSet<_> = vec![2, 3, 4, 8, 13].into_iter().collect();

        let both: Vec<_> = a.iter().inner_join_set(b.iter()).collect();
        assert_eq!(both, [2, 3, 8]);
    }
}
