//! Line-oriented command shell over a [`SharedListStore`](crate::list::SharedListStore).

pub mod handler;
pub mod reply;
pub mod session;

pub use handler::{CommandError, Handler};
pub use reply::Reply;
pub use session::run_session;
