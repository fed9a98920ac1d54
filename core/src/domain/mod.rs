pub mod authentication;
pub mod common;
pub mod favorite;
pub mod recipe;
pub mod storage;
