pub mod telaria;
pub mod types;
