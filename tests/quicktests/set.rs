use ordtree::{OrderedContainer, Set};

use std::collections::{BTreeSet, HashSet};

use crate::Op;

/// Applies a set of operations to a set and a `BTreeSet`.
/// This way we can ensure that after a random smattering of inserts
/// and removes we have the same keys in both.
fn do_ops<K>(ops: &[Op<K>], set: &mut Set<K>, expected: &mut BTreeSet<K>)
where
    K: Ord + Clone,
{
    for op in ops {
        match op {
            Op::Insert(k) => {
                set.insert(k.clone());
                expected.insert(k.clone());
            }
            Op::Remove(k) => {
                set.remove(k);
                expected.remove(k);
            }
        }
    }
}

quickcheck::quickcheck! {
    fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
        let mut set = Set::new();
        let mut expected = BTreeSet::new();

        do_ops(&ops, &mut set, &mut expected);
        set.iter().eq(expected.iter()) && set.len() == expected.len()
    }
}

quickcheck::quickcheck! {
    fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
        let set: Set<_> = xs.iter().copied().collect();
        let added: HashSet<_> = xs.into_iter().collect();
        let nots: HashSet<_> = nots.into_iter().collect();
        let mut nots = nots.difference(&added);

        nots.all(|x| set.find(x) == set.end())
    }
}

quickcheck::quickcheck! {
    fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
        let mut set: Set<_> = xs.iter().copied().collect();
        for delete in &deletes {
            let cursor = set.find(delete);
            set.erase(cursor);
        }

        deletes.iter().all(|x| !set.contains(x))
            && xs.iter().filter(|x| !deletes.contains(*x)).all(|x| set.contains(x))
    }
}

quickcheck::quickcheck! {
    fn walks_both_ways(xs: Vec<i16>) -> bool {
        let set: Set<_> = xs.into_iter().collect();

        let mut forward = Vec::new();
        let mut cursor = set.begin();
        while let Ok(key) = set.get(cursor) {
            forward.push(*key);
            cursor = set.next(cursor);
        }

        let mut backward = Vec::new();
        let mut cursor = set.prev(set.end());
        while let Ok(key) = set.get(cursor) {
            backward.push(*key);
            cursor = set.prev(cursor);
        }
        backward.reverse();

        forward.windows(2).all(|pair| pair[0] < pair[1]) && forward == backward
    }
}

quickcheck::quickcheck! {
    fn merge_is_union(xs: Vec<i8>, ys: Vec<i8>) -> bool {
        let mut a: Set<_> = xs.iter().copied().collect();
        let mut b: Set<_> = ys.iter().copied().collect();
        a.merge(&mut b);

        let union: BTreeSet<_> = xs.into_iter().chain(ys).collect();
        b.is_empty() && a.iter().eq(union.iter())
    }
}

quickcheck::quickcheck! {
    fn clone_then_clear(xs: Vec<i8>) -> bool {
        let mut original: Set<_> = xs.into_iter().collect();
        let copy = original.clone();
        OrderedContainer::clear(&mut original);

        original.is_empty() && copy.len() == copy.iter().count()
    }
}
