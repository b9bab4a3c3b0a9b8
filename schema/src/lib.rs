// Pokemon Card Game Schema - Shared record definitions
// This crate contains the records that cross the boundary between the PokeAPI
// data access layer and the game logic: the raw wire shapes as PokeAPI sends
// them, and the minimal normalized shapes the game works with.

// Re-export the main types
pub use api_data::*;
pub use pokemon_types::*;
pub use species_data::*;

pub mod api_data;
pub mod pokemon_types;
pub mod species_data;
