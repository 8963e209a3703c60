//! Character-level neural name generation for fantasy characters.
//!
//! This crate provides the inference side of a recurrent name model:
//! - Character and category encoders (vocabulary, races, groups, one-hot)
//! - A `SequenceModel` abstraction with a stacked LSTM implementation
//! - Stochastic decoding of single names (`NameSampler`)
//! - Batches of first/last name pairs with a degenerate-name filter
//!   (`NameGenerator`)
//! - A reader for the plain-text training corpus
//!
//! Training is out of scope: models are loaded from postcard artifacts.

/// Character and category encoders.
pub mod encoding;

/// Sequence model abstraction, LSTM model, sampler and generator.
pub mod model;

/// Training corpus reader (`{race}_{group}.txt` name lists).
pub mod corpus;

/// Error type shared by the whole crate.
pub mod error;

/// I/O utilities (file loading, path helpers).
///
/// Not exposed
pub(crate) mod io;

pub use error::{NameError, Result};
pub use model::SequenceModel;
pub use model::generator::{GeneratorConfig, NameGenerator, NamePair};
pub use model::lstm::LstmModel;
pub use model::sampler::NameSampler;
