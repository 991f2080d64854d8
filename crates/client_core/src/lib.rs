//! Client-side session state and navigation for the course evaluations
//! administration tool.

pub mod api;
mod bootstrap;
pub mod context;
pub mod notifications;
pub mod page;
pub mod router;
pub mod session;
pub mod settings;
pub mod term;

pub use api::{ApiClient, ContextSource};
pub use bootstrap::bootstrap;
pub use context::AppContext;
pub use notifications::{Notifications, Politeness, ServiceAnnouncement};
pub use page::{HeadlessPage, PageHost};
pub use router::{Navigation, NavigationError, Route, Router};
pub use session::{AuthState, ConfigUpdate, SessionState};
pub use settings::{load_settings, Settings};
pub use term::{SelectedTerm, TermUnavailable};
