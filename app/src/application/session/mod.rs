pub mod controller;
pub mod draft;
pub mod errors;
pub mod identity;
pub mod listing;
pub mod notice;
pub mod view_state;

#[cfg(test)]
mod controller_tests;
