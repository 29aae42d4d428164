//! Navigator adapters

mod stack;

pub use stack::StackNavigator;
