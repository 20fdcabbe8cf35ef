pub mod entities;
pub mod pool;
pub mod repository;
