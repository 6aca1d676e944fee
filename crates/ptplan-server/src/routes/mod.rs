pub mod export;
pub mod health;
pub mod patients;
pub mod recommendations;
pub mod roster;
pub mod schedule;
