pub mod config;
pub mod core;
pub mod error;

pub use crate::config::G2pConfig;
pub use crate::core::pipeline::{convert, Conversion, G2p, WordConversion, WordFailure};
pub use crate::core::rules::{Rule, Rulebook};
pub use crate::core::symbols::Alphabet;
pub use crate::error::{G2pError, Result};
