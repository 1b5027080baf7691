//! Result container for asynchronous operations.
//!
//! A [`ResultFlow`] wraps the outcome of one kind of fetch (the current user,
//! the list of sprints, a login attempt) as an observable [`LoadResult`].
//! View-models own and mutate it; everything else only reads or subscribes.
//!
//! Published states follow a fixed order:
//!
//! ```text
//! Nothing -> Loading -> Success | Error
//! Success | Error -> Loading -> ...
//! any -> Nothing (reset)
//! ```
//!
//! `set_success` and `set_error` outside of Loading are dropped, so a
//! subscriber that reads after every change sees Loading before the outcome.

use log::warn;
use std::future::Future;
use tokio::sync::watch;

use crate::api::ApiError;
use crate::observable::Observable;

/// State of an asynchronous operation.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadResult<T> {
    /// Nothing has been requested yet, or the state was reset
    Nothing,
    /// A request is in flight. Carries the previous value when it was preserved.
    Loading(Option<T>),
    /// The last request succeeded
    Success(T),
    /// The last request failed with a displayable message
    Error(String),
}

impl<T> LoadResult<T> {
    /// The value carried by this state, if any
    pub fn data(&self) -> Option<&T> {
        match self {
            LoadResult::Loading(data) => data.as_ref(),
            LoadResult::Success(data) => Some(data),
            LoadResult::Nothing | LoadResult::Error(_) => None,
        }
    }

    pub fn is_nothing(&self) -> bool {
        matches!(self, LoadResult::Nothing)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadResult::Loading(_))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, LoadResult::Success(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, LoadResult::Error(_))
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            LoadResult::Error(message) => Some(message),
            _ => None,
        }
    }
}

impl<T> Default for LoadResult<T> {
    fn default() -> Self {
        LoadResult::Nothing
    }
}

/// Options for [`ResultFlow::load_or_error_with`].
#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    /// Keep the previous value visible while loading
    pub preserve_value: bool,
    /// Message to publish on failure instead of the error's own message
    pub error_message: Option<&'static str>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            preserve_value: true,
            error_message: None,
        }
    }
}

/// Observable holder of a [`LoadResult`].
#[derive(Debug)]
pub struct ResultFlow<T> {
    state: Observable<LoadResult<T>>,
}

impl<T: Clone> ResultFlow<T> {
    pub fn new() -> Self {
        Self {
            state: Observable::new(LoadResult::Nothing),
        }
    }

    /// Snapshot of the current state
    pub fn current(&self) -> LoadResult<T> {
        self.state.get()
    }

    /// Clone of the value in the current state, if any
    pub fn value(&self) -> Option<T> {
        self.state.with(|state| state.data().cloned())
    }

    pub fn is_loading(&self) -> bool {
        self.state.with(LoadResult::is_loading)
    }

    /// Subscribe to state changes
    pub fn subscribe(&self) -> watch::Receiver<LoadResult<T>> {
        self.state.subscribe()
    }

    /// Enter Loading, keeping the current value visible
    pub fn set_loading(&self) {
        self.state.update(|state| {
            let previous = state.data().cloned();
            *state = LoadResult::Loading(previous);
        });
    }

    /// Enter Loading and drop the current value
    pub fn set_loading_without_value(&self) {
        self.state.set(LoadResult::Loading(None));
    }

    /// Publish Success. Ignored unless a request is in flight.
    pub fn set_success(&self, value: T) {
        if self.accepts_outcome("Success") {
            self.state.set(LoadResult::Success(value));
        }
    }

    /// Publish Error. Ignored unless a request is in flight.
    pub fn set_error(&self, message: impl Into<String>) {
        if self.accepts_outcome("Error") {
            self.state.set(LoadResult::Error(message.into()));
        }
    }

    /// Return to Nothing
    pub fn reset(&self) {
        self.state.set(LoadResult::Nothing);
    }

    /// Run `fetch` with Loading published around it and publish its outcome.
    ///
    /// Returns the value on success so callers can chain on it.
    pub async fn load_or_error<Fut>(&self, fetch: Fut) -> Option<T>
    where
        Fut: Future<Output = Result<T, ApiError>>,
    {
        self.load_or_error_with(LoadOptions::default(), fetch).await
    }

    pub async fn load_or_error_with<Fut>(&self, options: LoadOptions, fetch: Fut) -> Option<T>
    where
        Fut: Future<Output = Result<T, ApiError>>,
    {
        if options.preserve_value {
            self.set_loading();
        } else {
            self.set_loading_without_value();
        }

        match fetch.await {
            Ok(value) => {
                self.state.set(LoadResult::Success(value.clone()));
                Some(value)
            }
            Err(e) => {
                warn!("Request failed: {}", e);
                let message = options.error_message.map(str::to_string).unwrap_or_else(|| e.user_message().to_string());
                self.state.set(LoadResult::Error(message));
                None
            }
        }
    }

    // Success and Error only ever follow Loading.
    fn accepts_outcome(&self, outcome: &str) -> bool {
        let loading = self.is_loading();
        if !loading {
            warn!("Ignoring {} outside of Loading", outcome);
        }
        loading
    }
}

impl<T: Clone> Default for ResultFlow<T> {
    fn default() -> Self {
        Self::new()
    }
}
