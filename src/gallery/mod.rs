//! Card gallery core: card records, collection operations, projection onto
//! the presentation surface, and the interaction controller that ties them
//! together.

pub mod card;
pub mod collection;
pub mod controller;
pub mod projector;
pub mod rng;
pub mod scheduler;
pub mod seeds;
pub mod state;
pub mod surface;
