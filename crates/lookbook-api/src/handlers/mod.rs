pub mod health;
pub mod shoot;
