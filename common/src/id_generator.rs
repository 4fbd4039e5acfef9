use std::sync::atomic::{AtomicU64, Ordering};

use rand::Rng;

use crate::{ConnectionId, SessionId};

const ADJECTIVES: &[&str] = &[
    "Swift", "Brave", "Clever", "Mighty", "Silent", "Golden", "Wild", "Noble",
    "Fierce", "Gentle", "Quick", "Wise", "Bold", "Proud", "Cunning", "Sly",
];

const NOUNS: &[&str] = &[
    "Falcon", "Bear", "Tiger", "Wolf", "Eagle", "Dragon", "Lion", "Panther",
    "Hawk", "Fox", "Raven", "Cobra", "Shark", "Phoenix", "Lynx", "Viper",
];

static NEXT_CONNECTION: AtomicU64 = AtomicU64::new(1);

/// Readable prefix plus 64 random bits, independent of who is playing.
pub fn generate_session_id() -> SessionId {
    let mut rng = rand::rng();
    let adjective = ADJECTIVES[rng.random_range(0..ADJECTIVES.len())];
    let noun = NOUNS[rng.random_range(0..NOUNS.len())];
    let suffix: u64 = rng.random();
    SessionId::new(format!("{}-{}-{:016x}", adjective, noun, suffix))
}

pub fn generate_connection_id() -> ConnectionId {
    let n = NEXT_CONNECTION.fetch_add(1, Ordering::Relaxed);
    ConnectionId::new(format!("conn-{}", n))
}
