//! Most-significant-first limb accumulation.

use super::Operand;
use crate::{Limb, WideWord, Word, primitives::split_wide};

/// Accumulates limbs most significant first, as `acc = (acc << 64) | limb`.
///
/// Pushed values may be wider than a limb. The bits above [`Limb::BITS`] overlap
/// the previously pushed (more significant) limb and are OR-ed into it, which is
/// exactly what repeated shift-and-or produces. Unlike repeated shifting of a big
/// integer, [`LimbBuilder::finish`] runs in time linear in the number of limbs.
#[derive(Clone, Debug, Default)]
pub struct LimbBuilder {
    /// Pushed values, most significant first.
    wide: Vec<WideWord>,
}

impl LimbBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty builder with room for `limbs` pushes.
    pub fn with_capacity(limbs: usize) -> Self {
        Self {
            wide: Vec::with_capacity(limbs),
        }
    }

    /// Append `limb` below everything pushed so far.
    pub fn push(&mut self, limb: Limb) {
        self.wide.push(limb.to_wide());
    }

    /// Append a value that may exceed one limb below everything pushed so far.
    pub fn push_wide(&mut self, value: WideWord) {
        self.wide.push(value);
    }

    /// Number of values pushed.
    pub fn len(&self) -> usize {
        self.wide.len()
    }

    /// Has nothing been pushed yet?
    pub fn is_empty(&self) -> bool {
        self.wide.is_empty()
    }

    /// Produce the accumulated operand.
    pub fn finish(self) -> Operand {
        let mut words: Vec<Word> = vec![0; self.wide.len() + 1];

        for (pos, value) in self.wide.iter().rev().enumerate() {
            let (lo, hi) = split_wide(*value);
            words[pos] |= lo;
            words[pos + 1] |= hi;
        }

        Operand::from_words(words)
    }
}
