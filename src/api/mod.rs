pub mod client;
pub mod normalize;

#[cfg(test)]
pub(crate) mod test_server;

pub use client::{PokeApiClient, DEFAULT_BASE_URL};
