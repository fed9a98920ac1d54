pub mod favorites;
pub mod recipes;
pub mod users;
