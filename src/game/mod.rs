pub mod ai;
pub mod draw;
pub mod effectiveness;
pub mod engine;
pub mod runner;
pub mod session;
pub mod setup;
pub mod state;
pub mod table;

#[cfg(test)]
pub(crate) mod tests;
