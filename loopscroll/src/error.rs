use alloc::string::String;

/// Which data-source variant a scroll view was initialized with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SourceKind {
    Payload,
    Index,
}

impl core::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Payload => f.write_str("payload"),
            Self::Index => f.write_str("index"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("scroll view used before init_by_payload/init_by_index")]
    NotInitialized,

    #[error("scroll view is already initialized with a {0} source")]
    AlreadyInitialized(SourceKind),

    #[error("scroll view was initialized with a {expected} source, not a {found} source")]
    SourceMismatch {
        expected: SourceKind,
        found: SourceKind,
    },

    #[error("no template selected and no default template configured")]
    NoTemplate,

    #[error("element was not created by this pool")]
    UnknownElement,

    #[error("element is already idle in the pool")]
    AlreadyIdle,

    #[error("pool has been cleared")]
    PoolCleared,

    #[error("index {index} out of bounds (count = {count})")]
    IndexOutOfBounds { index: usize, count: usize },

    #[error("cell {index} belongs to generation {found}, source is at generation {expected}")]
    StaleCell {
        index: usize,
        expected: u32,
        found: u32,
    },

    #[error("failed to create element: {0}")]
    CreateFailed(String),
}

pub type Result<T, E = Error> = core::result::Result<T, E>;

pub(crate) fn check_index(index: usize, count: usize) -> Result<()> {
    if index < count {
        Ok(())
    } else {
        Err(Error::IndexOutOfBounds { index, count })
    }
}
