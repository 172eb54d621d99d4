//! Components of the showcase page.
//!
//! Each component demonstrates one primitive:
//! - [`Counter`]: stores, computed values, watchers and a scoped interval.
//! - [`StatusToggle`]: shared state and conditional rendering.
//! - [`TodoList`]: list rendering over a [`ListManager`](crate::list::ListManager).
//! - [`SignupForm`]: two-way bound inputs and validation.
//! - [`Page`]: keyed children, mounted and unmounted conditionally.

mod counter;
pub use self::counter::Counter;

mod form;
pub use self::form::{SignupData, SignupForm, ValidationError, MIN_NAME_LEN};

mod page;
pub use self::page::{Page, PageConfig, OFFLINE_BANNER};

mod status;
pub use self::status::StatusToggle;

mod todo;
pub use self::todo::TodoList;
