pub mod favorites_repository;
