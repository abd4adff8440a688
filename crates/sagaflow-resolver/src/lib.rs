mod error;
mod index;
mod normalizer;
mod options;

pub use error::ResolveError;
pub use normalizer::Normalizer;
pub use options::{ResolveOptions, Strictness};
