//! Incremental search engine: debounce, autocomplete session, and the pure
//! renderers for suggestions and search results.

pub mod classify;
pub mod debounce;
pub mod render;
pub mod request;
pub mod session;
pub mod ticket;

pub use classify::{MatchAnnotation, ResultsView, SearchState, SearchTracker};
pub use debounce::{Debouncer, Scheduler, WindowScheduler};
pub use render::DropdownView;
pub use request::{SearchForm, SearchRequest, VolumePreview};
pub use session::{Dropdown, Lookup, NavKey, PendingLookup, SearchSession};
pub use ticket::{LatestWins, RequestId};
