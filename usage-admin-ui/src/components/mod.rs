pub mod button;
pub mod input;
