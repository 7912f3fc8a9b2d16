//! Error types for the Kindred core library.
//!
//! Defines the error enum exposed by the public API, the stable codes used by
//! callers that need machine-readable failures, and a convenient result alias.

use std::fmt;

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Reason an edge or link between two vertices was refused.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum EdgeRejection {
    /// Both endpoints named the same vertex.
    SelfLoop,
}

impl fmt::Display for EdgeRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SelfLoop => f.write_str("a vertex cannot be connected to itself"),
        }
    }
}

/// Error type produced by the graph and link-table operations.
///
/// Vertex identifiers are captured through their `Debug` rendering so the
/// error stays independent of the identifier type used by the graph.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum KindredError {
    /// A query referenced a vertex that has no recorded connection.
    #[error("vertex {vertex} is not present in the graph")]
    UnknownVertex {
        /// `Debug` rendering of the missing vertex.
        vertex: String,
    },
    /// A probability outside `[0, 1]` (or NaN) was supplied.
    #[error("probability {value} is outside the range [0, 1]")]
    InvalidProbability {
        /// The rejected value.
        value: f64,
    },
    /// An edge or link was refused before any state changed.
    #[error("invalid edge at vertex {vertex}: {reason}")]
    InvalidEdge {
        /// `Debug` rendering of the offending vertex.
        vertex: String,
        /// Why the edge was refused.
        reason: EdgeRejection,
    },
    /// A Monte-Carlo estimate was requested with zero trials.
    #[error("connectivity estimates require at least one trial")]
    InvalidTrialCount,
    /// A scripted random source was given a draw outside `[0, 1)`.
    #[error("scripted draw {value} is outside the range [0, 1)")]
    InvalidDraw {
        /// The rejected draw.
        value: f64,
    },
    /// A scripted random source was given no draws.
    #[error("scripted random sources need at least one draw")]
    EmptyScript,
    /// A lock guarding shared state was poisoned by a panicking writer.
    #[error("lock guarding {resource} was poisoned")]
    LockPoisoned {
        /// Name of the guarded resource.
        resource: &'static str,
    },
}

impl KindredError {
    pub(crate) fn unknown_vertex<V: fmt::Debug>(vertex: &V) -> Self {
        Self::UnknownVertex {
            vertex: format!("{vertex:?}"),
        }
    }

    pub(crate) fn self_loop<V: fmt::Debug>(vertex: &V) -> Self {
        Self::InvalidEdge {
            vertex: format!("{vertex:?}"),
            reason: EdgeRejection::SelfLoop,
        }
    }
}

define_error_codes! {
    /// Stable codes describing [`KindredError`] variants.
    enum KindredErrorCode for KindredError {
        /// A query referenced a vertex that has no recorded connection.
        UnknownVertex => UnknownVertex { .. } => "KINDRED_UNKNOWN_VERTEX",
        /// A probability outside `[0, 1]` (or NaN) was supplied.
        InvalidProbability => InvalidProbability { .. } => "KINDRED_INVALID_PROBABILITY",
        /// An edge or link was refused before any state changed.
        InvalidEdge => InvalidEdge { .. } => "KINDRED_INVALID_EDGE",
        /// A Monte-Carlo estimate was requested with zero trials.
        InvalidTrialCount => InvalidTrialCount => "KINDRED_INVALID_TRIAL_COUNT",
        /// A scripted random source was given a draw outside `[0, 1)`.
        InvalidDraw => InvalidDraw { .. } => "KINDRED_INVALID_DRAW",
        /// A scripted random source was given no draws.
        EmptyScript => EmptyScript => "KINDRED_EMPTY_SCRIPT",
        /// A lock guarding shared state was poisoned by a panicking writer.
        LockPoisoned => LockPoisoned { .. } => "KINDRED_LOCK_POISONED",
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, KindredError>;
