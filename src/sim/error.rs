//! Simulation fault taxonomy
//!
//! Every fault is synchronous and reported to the immediate caller; the
//! engine never retries internally. A body the engine has already committed
//! to placing (a just-fired bullet landing out of bounds) is terminated
//! rather than surfaced here.

/// Faults raised by construction, membership, command, and query operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimError {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("position would leave the body outside its arena")]
    InvalidPlacement,

    #[error("body does not fit inside the arena bounds")]
    OutOfBounds,

    #[error("body would overlap a live member of the arena")]
    PlacementConflict,

    #[error("bodies do not share an arena")]
    MismatchedArena,

    #[error("bodies already overlap; collision time is undefined")]
    Overlap,

    #[error("duration must be non-negative, got {0}")]
    NegativeDuration(f64),

    #[error("duration must be finite and non-negative, got {0}")]
    InvalidDuration(f64),

    #[error("body {0} is not a member of this arena")]
    NotMember(super::BodyId),

    #[error("body is already owned by an arena or a ship")]
    AlreadyOwned,

    #[error("operation requires a ship")]
    NotAShip,

    #[error("ship has no bullets loaded")]
    NoCargo,
}
