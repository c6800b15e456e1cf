//! Normalization, fan-out and share-card logic, kept apart from the routing
//! layer so it can be tested against fixtures and a mock upstream.

pub mod fanout;
pub mod normalize;
pub mod share_card;
