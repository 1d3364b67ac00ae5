//! Domain types for upstream release and commit data.

mod commit;
mod release;

pub use commit::{Commit, CommitAuthor, CommitDetail};
pub use release::{Release, ReleaseAsset};
