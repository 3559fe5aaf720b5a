// src/api/handlers/mod.rs
mod health;
mod pages;
mod premium;

pub use health::health_check;
pub use pages::{index_page, simulateur_page, static_file};
pub use premium::calcul_prime;
