use std::num::NonZeroU32;
use std::ops::Index;

use ahash::RandomState;
use hashbrown::hash_table::Entry;
use hashbrown::HashTable;

/// An interned string. Only meaningful together with the [`Interner`] that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub struct Istr(NonZeroU32);

impl Istr {
    fn from_index(index: usize) -> Self {
        let n = u32::try_from(index + 1).expect("interner overflow");
        Self(NonZeroU32::new(n).expect("index + 1 is never zero"))
    }

    fn index(self) -> usize {
        self.0.get() as usize - 1
    }
}

#[derive(Default)]
pub struct Interner {
    random_state: RandomState,
    lookup: HashTable<Slot>,

    strings: Vec<Box<str>>,
}

#[derive(Clone, Copy)]
struct Slot {
    index: usize,
    hash: u64,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    /// # Panics
    /// Panics if more than `u32::MAX - 1` distinct strings are interned.
    pub fn intern(&mut self, s: &str) -> Istr {
        let hash = self.random_state.hash_one(s);

        let entry = self.lookup.entry(
            hash,
            |entry| &*self.strings[entry.index] == s,
            |entry| entry.hash,
        );

        let index = match entry {
            Entry::Occupied(entry) => entry.get().index,
            Entry::Vacant(entry) => {
                let index = self.strings.len();
                self.strings.push(s.into());
                entry.insert(Slot { index, hash });
                index
            }
        };

        Istr::from_index(index)
    }

    /// Look up a string without interning it.
    pub fn get_interned(&self, s: &str) -> Option<Istr> {
        let hash = self.random_state.hash_one(s);

        self.lookup
            .find(hash, |entry| &*self.strings[entry.index] == s)
            .map(|entry| Istr::from_index(entry.index))
    }

    pub fn get(&self, istr: Istr) -> Option<&str> {
        self.strings.get(istr.index()).map(|s| &**s)
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

impl Index<Istr> for Interner {
    type Output = str;

    fn index(&self, istr: Istr) -> &Self::Output {
        self.get(istr).expect("string not from this interner")
    }
}

#[cfg(test)]
mod tests {
    use super::Interner;

    #[test]
    fn interning_is_idempotent() {
        let mut interner = Interner::new();

        let count = interner.intern("count");
        let friendly = interner.intern("friendly");

        assert_ne!(count, friendly);
        assert_eq!(interner.intern("count"), count);
        assert_eq!(interner.len(), 2);

        assert_eq!(&interner[count], "count");
        assert_eq!(&interner[friendly], "friendly");
    }

    #[test]
    fn lookup_without_interning() {
        let mut interner = Interner::new();
        let main = interner.intern("main");

        assert_eq!(interner.get_interned("main"), Some(main));
        assert_eq!(interner.get_interned("fib"), None);
        assert_eq!(interner.len(), 1);
    }
}
