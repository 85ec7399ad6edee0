// ── Load lifecycle shared by every resource view ──
//
//   Loading ──ok──▶ Loaded(data)
//      └────err──▶ LoadedWithError(default)
//
// A view never stays in `Loading` once its fetch has resolved. State is
// replaced wholesale; nothing mutates a loaded value behind the view's back.

use crate::error::CoreError;
use crate::notify::Outcome;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ViewState<T> {
    #[default]
    Loading,
    Loaded(T),
    LoadedWithError(T),
}

impl<T: Default> ViewState<T> {
    /// Settle a fetch result. Failures fall back to `T::default()`, so
    /// lists render empty rather than hanging.
    pub fn settle<E>(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => Self::Loaded(data),
            Err(_) => Self::LoadedWithError(T::default()),
        }
    }
}

impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// True once the fetch resolved, whether or not it failed.
    pub fn is_loaded(&self) -> bool {
        !self.is_loading()
    }

    pub fn has_error(&self) -> bool {
        matches!(self, Self::LoadedWithError(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Loading => None,
            Self::Loaded(data) | Self::LoadedWithError(data) => Some(data),
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            Self::Loading => None,
            Self::Loaded(data) | Self::LoadedWithError(data) => Some(data),
        }
    }

    /// New state with `f` applied to the data, keeping the error flag.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ViewState<U> {
        match self {
            Self::Loading => ViewState::Loading,
            Self::Loaded(data) => ViewState::Loaded(f(data)),
            Self::LoadedWithError(data) => ViewState::LoadedWithError(f(data)),
        }
    }

    /// Replacement state holding `data`, keeping the error flag.
    pub fn with_data(&self, data: T) -> Self {
        match self {
            Self::LoadedWithError(_) => Self::LoadedWithError(data),
            Self::Loading | Self::Loaded(_) => Self::Loaded(data),
        }
    }
}

impl<T: Default + Clone> ViewState<T> {
    /// Current data, or the empty default while loading.
    pub fn snapshot(&self) -> T {
        self.data().cloned().unwrap_or_default()
    }
}

/// Settle a fetch into state plus the matching outcome. `message`
/// replaces the error text when the view has a fixed one.
pub(crate) fn settle<T: Default>(
    result: Result<T, CoreError>,
    message: Option<&str>,
) -> (ViewState<T>, Outcome) {
    match result {
        Ok(data) => (ViewState::Loaded(data), Outcome::none()),
        Err(e) => {
            tracing::warn!(error = %e, "load failed");
            (
                ViewState::LoadedWithError(T::default()),
                Outcome::failure(&e, message),
            )
        }
    }
}

/// Outcome of a mutation: `success` toast on `Ok`, error toast otherwise.
pub(crate) fn report<T>(result: Result<T, CoreError>, success: impl Into<String>) -> Outcome {
    match result {
        Ok(_) => Outcome::success(success),
        Err(e) => {
            tracing::warn!(error = %e, "operation failed");
            Outcome::failure(&e, None)
        }
    }
}
