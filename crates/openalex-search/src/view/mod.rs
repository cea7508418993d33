//! Text rendering and form state for the search client.
//!
//! These types hold no network state. The orchestrator feeds them data and
//! the CLI prints what they produce.

mod detail;
mod form;
mod pagination;
mod results;

pub use detail::{MAX_DETAIL_AUTHORSHIPS, MAX_DETAIL_CONCEPTS, render_work_detail};
pub use form::SearchForm;
pub use pagination::Pagination;
pub use results::{WorkAction, available_actions, render_results, render_work_entry};
