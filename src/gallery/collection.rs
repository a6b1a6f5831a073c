//! Card collection and the transformations over it: generate, shuffle and
//! read-back from the presentation surface.
//!
//! A [`CardCollection`] is replaced wholesale on every add or shuffle. It owns
//! its cards and answers id lookups, so interaction hooks only ever hold ids.

use std::collections::HashMap;

use crate::gallery::card::{Card, CardFactory, CardId};
use crate::gallery::rng::GalleryRng;
use crate::gallery::seeds::SEED_CARDS;
use crate::gallery::surface::CardNode;

/// Ordered cards with an id index. Order is display order.
#[derive(Debug, Clone, Default)]
pub struct CardCollection {
    order: Vec<CardId>,
    cards: HashMap<CardId, Card>,
}

impl CardCollection {
    /// Build from an ordered list. A card whose id is already present is dropped.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        let mut collection = Self::default();
        for card in cards {
            if collection.cards.contains_key(&card.id) {
                continue;
            }
            collection.order.push(card.id);
            collection.cards.insert(card.id, card);
        }
        collection
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(&id)
    }

    pub fn get_mut(&mut self, id: CardId) -> Option<&mut Card> {
        self.cards.get_mut(&id)
    }

    /// Cards in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.order.iter().filter_map(|id| self.cards.get(id))
    }

    pub fn to_vec(&self) -> Vec<Card> {
        self.iter().cloned().collect()
    }
}

/// Materialize `count` cards from the seed set.
///
/// Without the random source this takes the first `count` seeds in order,
/// clamped to the seed set's length. With it, each card is an independent
/// draw (with replacement) and its title gets a `#<position>` suffix so
/// repeated draws stay distinguishable.
pub fn generate(
    count: usize,
    use_random_source: bool,
    factory: &mut CardFactory,
    rng: &mut GalleryRng,
) -> Vec<Card> {
    if !use_random_source {
        return SEED_CARDS
            .iter()
            .take(count)
            .map(|seed| factory.make_card(seed.icon, seed.title, seed.description))
            .collect();
    }

    (0..count)
        .map(|i| {
            let seed = &SEED_CARDS[rng.index_up_to(SEED_CARDS.len() - 1)];
            let title = format!("{} #{}", seed.title, i + 1);
            factory.make_card(seed.icon, &title, seed.description)
        })
        .collect()
}

/// Fisher-Yates over a private copy; `cards` itself is left untouched.
pub fn shuffle(cards: &[Card], rng: &mut GalleryRng) -> Vec<Card> {
    let mut shuffled = cards.to_vec();
    for i in (1..shuffled.len()).rev() {
        let j = rng.index_up_to(i);
        shuffled.swap(i, j);
    }
    shuffled
}

/// Rebuild cards from the text shown on the surface.
///
/// Lossy: ids, timestamps and click counts are not on the surface, so every
/// card comes back with a fresh id and zero clicks.
pub fn extract_from_presentation(nodes: &[CardNode], factory: &mut CardFactory) -> Vec<Card> {
    nodes
        .iter()
        .map(|node| factory.make_card(&node.icon, &node.title, &node.description))
        .collect()
}
