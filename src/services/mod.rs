// src/services/mod.rs
pub mod assistant;
pub mod completion;
pub mod groq;
