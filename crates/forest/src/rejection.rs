use algolab_core::Key;

/// Why a tree call left the structure untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TreeRejection {
    #[error("{0} is already in the tree, duplicate keys are not allowed")]
    Duplicate(Key),
    #[error("{0} was not found in the tree")]
    NotFound(Key),
}
