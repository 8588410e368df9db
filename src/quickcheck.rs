use ::quickcheck::{Arbitrary, Gen};
use super::OrderedSet;

impl<T> Arbitrary for OrderedSet<T> where T: Arbitrary + Ord {
    fn arbitrary(gen: &mut Gen) -> Self { Vec::<T>::arbitrary(gen).into_iter().collect() }

    fn shrink(&self) -> Box<dyn Iterator<Item=Self>> {
        let vec: Vec<T> = self.to_vec();
        Box::new(vec.shrink().map(|vec| vec.into_iter().collect()))
    }
}

#[cfg(test)]
mod test {
    use ::quickcheck::quickcheck;
    use crate::OrderedSet;

    #[test]
    fn test_arbitrary_sets_are_valid() {
        fn check(set: OrderedSet<i16>) -> bool {
            let items = set.to_vec();
            set.check_invariant() &&
            items.len() == set.len() &&
            items.windows(2).all(|pair| pair[0] < pair[1])
        }

        quickcheck(check as fn(_) -> _);
    }
}
