pub mod dictionary;
pub mod word_bank;
