pub mod analysis;
pub mod portrait;

pub use portrait::PhasePortrait;
