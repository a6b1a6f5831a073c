//! Projects a card collection onto the presentation surface.

use crate::gallery::collection::CardCollection;
use crate::gallery::surface::{CardNode, Hook, Surface, Transition};

/// Projection options that come from config and current state.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectOptions {
    /// Reveal delay added per card position.
    pub stagger_ms: u64,
    /// Start every node with the floating transition.
    pub floating: bool,
}

/// Clear the card container and insert one node per card, in order.
///
/// Each node's reveal delay is `position * stagger_ms`. Tap is bound to
/// inspect and pointer-enter to bounce, both by card id.
pub fn project<S: Surface>(collection: &CardCollection, surface: &mut S, opts: ProjectOptions) {
    surface.clear_cards();
    for (i, card) in collection.iter().enumerate() {
        let transitions = if opts.floating {
            vec![Transition::Float]
        } else {
            Vec::new()
        };
        surface.insert_card(CardNode {
            card_id: card.id,
            icon: card.icon.clone(),
            title: card.title.clone(),
            description: card.description.clone(),
            reveal_delay_ms: i as u64 * opts.stagger_ms,
            transitions,
            on_tap: Hook::Inspect(card.id),
            on_enter: Hook::Bounce(card.id),
        });
    }
}
