//! Built-in page transforms.

mod head;
mod urls;

pub use head::inject_head;
pub use urls::ModifyUrls;
