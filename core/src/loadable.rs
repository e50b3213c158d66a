//! Explicit tri-state for values fetched from an external collaborator.
//!
//! `Loading` (a fetch is in flight), `Unavailable` (the fetch settled
//! without a value), and `Ready` are three distinct states. Callers must
//! not collapse `Loading` into a fallback value — see
//! [`crate::apr::display_apr`] for the policy this enum exists to
//! enforce.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "state", content = "value")]
pub enum Loadable<T> {
    /// A fetch is in flight; no value should be rendered yet.
    Loading,
    /// The fetch settled without a value (error or no data).
    Unavailable,
    /// The fetched value.
    Ready(T),
}

impl<T> Default for Loadable<T> {
    /// The initial state of any value that has to be fetched.
    fn default() -> Self {
        Loadable::Loading
    }
}

impl<T> Loadable<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Loadable::Loading)
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Loadable::Unavailable)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Loadable::Ready(_))
    }

    /// The value, if ready.
    pub fn ready(&self) -> Option<&T> {
        match self {
            Loadable::Ready(value) => Some(value),
            _ => None,
        }
    }

    /// Map the ready value, preserving the other two states.
    pub fn map<U>(self, op: impl FnOnce(T) -> U) -> Loadable<U> {
        match self {
            Loadable::Loading => Loadable::Loading,
            Loadable::Unavailable => Loadable::Unavailable,
            Loadable::Ready(value) => Loadable::Ready(op(value)),
        }
    }
}

impl<T> From<Option<T>> for Loadable<T> {
    /// A settled fetch result: `Some` is ready, `None` is unavailable.
    /// `Loading` can only be expressed explicitly.
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Loadable::Ready(value),
            None => Loadable::Unavailable,
        }
    }
}
