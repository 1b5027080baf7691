//! Per-screen controllers.
//!
//! A view-model owns the observable state one screen renders
//! ([`ResultFlow`](crate::result::ResultFlow)s and
//! [`PagedList`](crate::paging::PagedList)s), calls repositories to fill
//! it, and turns repository errors into Error states. Actions take
//! `&mut self`, so each view-model has a single writer; screens read by
//! subscribing to the flows.
//!
//! View-models never listen in the background. They check the session's
//! change signals when the screen opens (`start` / `on_open`) and reset
//! themselves if the selected project moved in the meantime.

pub mod dashboard;
pub mod epics;
pub mod login;
pub mod project_selector;
pub mod scrum;
pub mod settings;
pub mod team;

pub use dashboard::DashboardViewModel;
pub use epics::EpicsViewModel;
pub use login::LoginViewModel;
pub use project_selector::ProjectSelectorViewModel;
pub use scrum::ScrumViewModel;
pub use settings::SettingsViewModel;
pub use team::TeamViewModel;
