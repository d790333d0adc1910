//! Built-in spells and data-driven content loaders.
//!
//! This crate houses the concrete spell variants (their effects are expressed
//! purely through the host traits in `spell-core`) and the static list used to
//! register them at startup. With the `loaders` feature (default) it also
//! reads engine configuration and spell tuning from TOML files.

pub mod spells;
pub mod tuning;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use spells::{Confundo, SpellKind, Stupefy, builtin_spells};
pub use tuning::{ConfundoTuning, DurationError, SpellTuning, StupefyTuning, parse_duration};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, LoadResult, TuningLoader};
