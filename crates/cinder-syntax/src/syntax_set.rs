use crate::SyntaxKind;

const SLOTS: usize = 4;

/// Fixed-size bitset over `SyntaxKind`, usable in `const` context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyntaxSet {
    bits: [u64; SLOTS],
}

impl SyntaxSet {
    pub const EMPTY: Self = Self { bits: [0; SLOTS] };

    const fn locate(kind: SyntaxKind) -> (usize, u64) {
        let kind = kind as u16;
        let slot = (kind / u64::BITS as u16) as usize;

        debug_assert!(slot < SLOTS, "SyntaxSet is too small for every SyntaxKind");

        (slot, 1 << (kind % u64::BITS as u16))
    }

    pub const fn new<const N: usize>(kinds: [SyntaxKind; N]) -> Self {
        let mut set = Self::EMPTY;

        let mut i = 0;
        while i < N {
            set = set.with(kinds[i]);
            i += 1;
        }

        set
    }

    pub const fn with(mut self, kind: SyntaxKind) -> Self {
        let (slot, mask) = Self::locate(kind);
        self.bits[slot] |= mask;
        self
    }

    pub const fn contains(&self, kind: SyntaxKind) -> bool {
        let (slot, mask) = Self::locate(kind);
        self.bits[slot] & mask != 0
    }
}
