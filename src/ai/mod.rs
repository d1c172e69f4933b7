pub mod policy;

pub use policy::{GreedyPolicy, OpponentPolicy};
