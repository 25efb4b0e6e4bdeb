//! Two-phase validation for messages decoded from the wire.
//!
//! A message reaches trusted code along exactly two paths:
//!
//! 1. **Builder / constructor** – field values are validated eagerly as they
//!    are supplied, so the finished message is trustworthy by construction.
//! 2. **Wire decode** – [`crate::protocol::codec::decode_message`] performs a
//!    purely structural decode and hands back an [`Unvalidated`] wrapper. The
//!    only way to get the message out is [`Unvalidated::validate`], which
//!    re-runs every field-level grammar.
//!
//! The wrapper is consumed by validation, so "already validated" is a fact
//! the type system knows rather than a runtime flag: builder output is the
//! plain message type and is never re-checked, and a validated message cannot
//! be wrapped again.

use thiserror::Error;

use crate::domain::identifier::IdentifierError;
use crate::protocol::messages::ListAction;

/// Reasons a structurally well-formed message can fail validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// An identifier field violates the identifier grammar.
    #[error(transparent)]
    Identifier(#[from] IdentifierError),

    /// A field this message type requires is absent.
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    /// Too few audio IDs for the requested list action.
    #[error("audioIds size cannot be less than {min} for action {action}")]
    TooFewAudioIds {
        action: ListAction,
        min: usize,
        found: usize,
    },

    /// Too many audio IDs for the requested list action.
    #[error("audioIds size cannot be greater than {max} for action {action}")]
    TooManyAudioIds {
        action: ListAction,
        max: usize,
        found: usize,
    },
}

/// Field-level validation and wire normalization for a message type.
pub trait Validate: Sized {
    /// Checks every field against its grammar and applies normalizations
    /// (zero delay windows and empty ID sets become absent, duplicate list
    /// IDs collapse). Fails atomically: on error the message is dropped, no
    /// partially validated value escapes.
    fn validate(self) -> Result<Self, ValidationError>;
}

/// A decoded message that has not yet been validated.
///
/// Produced only by the codec. [`get`](Unvalidated::get) allows inspection
/// before validation (for example routing on the subject ID), but the
/// payload must not be acted upon until [`validate`](Unvalidated::validate)
/// succeeds.
#[derive(Debug, Clone, PartialEq)]
pub struct Unvalidated<T>(T);

impl<T: Validate> Unvalidated<T> {
    pub(crate) fn new(message: T) -> Self {
        Self(message)
    }

    /// Borrows the message without validating it.
    pub fn get(&self) -> &T {
        &self.0
    }

    /// Runs the message's validation, yielding the trusted value.
    pub fn validate(self) -> Result<T, ValidationError> {
        self.0.validate()
    }
}
