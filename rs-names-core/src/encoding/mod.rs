//! Encoders turning characters and category labels into model features.
//!
//! - `Vocabulary`: characters <-> indices, with the reserved end symbol
//! - `CategoryEncoder`: race and group labels <-> indices
//! - `OneHot` / `FeatureComposer`: indices -> one-hot vectors -> model input

pub mod category;
pub mod onehot;
pub mod vocabulary;

pub use category::{CategoryEncoder, GOBLIN_RACE, GROUPS, LAST_GROUP, RACES};
pub use onehot::{FeatureComposer, OneHot};
pub use vocabulary::{END_CHAR, Vocabulary};
