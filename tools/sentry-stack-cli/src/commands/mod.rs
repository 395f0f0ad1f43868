pub mod list;
pub mod stack;
