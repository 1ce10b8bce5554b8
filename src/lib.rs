pub use orm_dialect_core::*;

#[cfg(feature = "nuodb")]
pub use orm_dialect_nuodb as nuodb;
