//! State identifiers.
//!
//! A state is named by a validated, non-empty string. Two identifiers name
//! the same state iff their strings are equal, so equality and hashing are
//! plain string equality and hashing.

use super::error::FsmError;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Validated name of a state.
///
/// Construction rejects empty names once; every `StateId` in circulation is
/// therefore known to be valid.
///
/// # Example
///
/// ```rust
/// use ufsm::core::{FsmError, StateId};
///
/// let idle = StateId::new("idle").unwrap();
/// assert_eq!(idle.as_str(), "idle");
/// assert_eq!(idle, "idle");
///
/// assert_eq!(StateId::new(""), Err(FsmError::InvalidState));
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StateId(String);

impl StateId {
    /// Create a state identifier, rejecting empty names.
    pub fn new(name: impl Into<String>) -> Result<Self, FsmError> {
        let name = name.into();
        if name.is_empty() {
            return Err(FsmError::InvalidState);
        }
        Ok(Self(name))
    }

    /// The state's name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StateId({:?})", self.0)
    }
}

impl AsRef<str> for StateId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for StateId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StateId {
    type Error = FsmError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Self::new(name)
    }
}

impl TryFrom<&str> for StateId {
    type Error = FsmError;

    fn try_from(name: &str) -> Result<Self, Self::Error> {
        Self::new(name)
    }
}

impl From<StateId> for String {
    fn from(id: StateId) -> Self {
        id.0
    }
}

impl PartialEq<str> for StateId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for StateId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl PartialEq<StateId> for &str {
    fn eq(&self, other: &StateId) -> bool {
        *self == other.0
    }
}

/// Conversion of caller-supplied values into a [`StateId`].
///
/// Any value with a meaningful string form can name a state, but falsy
/// values are rejected: empty strings, `0`, `false` and `None` all fail with
/// [`FsmError::InvalidState`].
///
/// # Example
///
/// ```rust
/// use ufsm::core::{FsmError, IntoStateId};
///
/// assert_eq!("open".into_state_id().unwrap(), "open");
/// assert_eq!(42u8.into_state_id().unwrap(), "42");
/// assert_eq!(0i32.into_state_id(), Err(FsmError::InvalidState));
/// assert_eq!(None::<&str>.into_state_id(), Err(FsmError::InvalidState));
/// ```
pub trait IntoStateId {
    fn into_state_id(self) -> Result<StateId, FsmError>;
}

impl IntoStateId for StateId {
    fn into_state_id(self) -> Result<StateId, FsmError> {
        Ok(self)
    }
}

impl IntoStateId for &StateId {
    fn into_state_id(self) -> Result<StateId, FsmError> {
        Ok(self.clone())
    }
}

impl IntoStateId for &str {
    fn into_state_id(self) -> Result<StateId, FsmError> {
        StateId::new(self)
    }
}

impl IntoStateId for String {
    fn into_state_id(self) -> Result<StateId, FsmError> {
        StateId::new(self)
    }
}

impl IntoStateId for &String {
    fn into_state_id(self) -> Result<StateId, FsmError> {
        StateId::new(self.as_str())
    }
}

impl IntoStateId for char {
    fn into_state_id(self) -> Result<StateId, FsmError> {
        StateId::new(self.to_string())
    }
}

impl IntoStateId for bool {
    fn into_state_id(self) -> Result<StateId, FsmError> {
        if self {
            StateId::new("true")
        } else {
            Err(FsmError::InvalidState)
        }
    }
}

impl<T: IntoStateId> IntoStateId for Option<T> {
    fn into_state_id(self) -> Result<StateId, FsmError> {
        self.ok_or(FsmError::InvalidState)?.into_state_id()
    }
}

macro_rules! impl_into_state_id_for_integers {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoStateId for $ty {
                fn into_state_id(self) -> Result<StateId, FsmError> {
                    if self == 0 {
                        return Err(FsmError::InvalidState);
                    }
                    StateId::new(self.to_string())
                }
            }
        )*
    };
}

impl_into_state_id_for_integers!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
