use crate::RngState;

/// A shuffled pile of card printings. The deal pulls from the back; when the
/// deck runs out mid-deal, exactly one more printing is shuffled in so that
/// no card type can ever be dealt more than one copy over the others.
#[derive(Debug, Default, Clone)]
pub struct Deck<T> {
    pub cards: Vec<T>,
}

impl<T: Clone> Deck<T> {
    /// Build `copies` full printings of the base set, shuffled together.
    pub fn printings(base: &[T], copies: usize, rng: &mut RngState) -> Self {
        let mut cards = Vec::with_capacity(base.len() * copies);
        for _ in 0..copies {
            cards.extend_from_slice(base);
        }
        rng.shuffle(&mut cards);
        Self { cards }
    }

    /// Add one more full printing, shuffled. Only called on an empty deck.
    pub fn refill(&mut self, base: &[T], rng: &mut RngState) {
        self.cards.extend_from_slice(base);
        rng.shuffle(&mut self.cards);
    }

    pub fn pop(&mut self) -> Option<T> {
        self.cards.pop()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
