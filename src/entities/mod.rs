pub mod item;

pub use item::{CreateItemArgs, TodoItem, UpdateItemArgs};
