pub mod difficulty;
pub mod pow;
