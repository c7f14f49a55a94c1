//! Presentation logic for the StaffSync client: table search and sorting,
//! and transient notifications.

pub mod notifications;
pub mod table;
pub mod transitions;

pub mod prelude {
    pub use crate::notifications::{
        Notification, NotificationCenter, NotificationHandle, NotificationId, Phase, Severity,
    };
    pub use crate::table::{
        SortDirection, SortState, Table, TableError, TableId, TableSortFilter, filter_rows,
    };
    pub use crate::transitions::{Easing, TransitionConfig};
}
