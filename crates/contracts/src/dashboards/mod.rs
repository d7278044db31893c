//! Dashboard DTOs.

pub mod d400_overview;
