use ordtree::Multiset;

use std::collections::BTreeMap;

use crate::Op;

/// Applies a set of operations to a multiset and a map of key counts.
fn do_ops<K>(ops: &[Op<K>], multiset: &mut Multiset<K>, counts: &mut BTreeMap<K, usize>)
where
    K: Ord + Clone,
{
    for op in ops {
        match op {
            Op::Insert(k) => {
                multiset.insert(k.clone());
                *counts.entry(k.clone()).or_insert(0) += 1;
            }
            Op::Remove(k) => {
                multiset.remove(k);
                if let Some(count) = counts.get_mut(k) {
                    *count -= 1;
                }
                counts.retain(|_, count| *count > 0);
            }
        }
    }
}

quickcheck::quickcheck! {
    fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
        let mut multiset = Multiset::new();
        let mut counts = BTreeMap::new();

        do_ops(&ops, &mut multiset, &mut counts);
        let total: usize = counts.values().sum();

        multiset.len() == total && counts.iter().all(|(k, count)| multiset.count(k) == *count)
    }
}

quickcheck::quickcheck! {
    fn iterates_sorted_with_repeats(xs: Vec<i8>) -> bool {
        let multiset: Multiset<_> = xs.iter().copied().collect();
        let mut sorted = xs;
        sorted.sort();

        multiset.iter().eq(sorted.iter()) && multiset.iter().rev().eq(sorted.iter().rev())
    }
}

quickcheck::quickcheck! {
    fn equal_range_spans_count(xs: Vec<i8>, needle: i8) -> bool {
        let multiset: Multiset<_> = xs.into_iter().collect();
        let (mut cursor, upper) = multiset.equal_range(&needle);

        let mut walked = 0;
        while cursor != upper {
            if multiset.get(cursor) != Ok(&needle) {
                return false;
            }
            walked += 1;
            cursor = multiset.next(cursor);
        }
        walked == multiset.count(&needle)
    }
}

quickcheck::quickcheck! {
    fn merge_keeps_everything(xs: Vec<i8>, ys: Vec<i8>) -> bool {
        let mut a: Multiset<_> = xs.iter().copied().collect();
        let mut b: Multiset<_> = ys.iter().copied().collect();
        a.merge(&mut b);

        let mut all: Vec<_> = xs.into_iter().chain(ys).collect();
        all.sort();
        b.is_empty() && a.iter().eq(all.iter())
    }
}
