pub mod build;
pub mod common;
pub mod etag;
pub mod list;
pub mod url;
pub mod watch;
