//! Property tests against the public API only.

mod multiset;
mod set;

use quickcheck::{Arbitrary, Gen};

/// An enum for the various kinds of "things" to do to
/// ordered containers in a quicktest.
#[derive(Copy, Clone, Debug)]
pub enum Op<K> {
    /// Insert the K into the container
    Insert(K),
    /// Remove the K from the container
    Remove(K),
}

impl<K> Arbitrary for Op<K>
where
    K: Arbitrary,
{
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 0, 1]).unwrap() {
            0 => Op::Insert(K::arbitrary(g)),
            1 => Op::Remove(K::arbitrary(g)),
            _ => unreachable!(),
        }
    }
}
