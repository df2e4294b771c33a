pub mod board;
pub mod game;
pub mod move_gen;
pub mod position;
