use thiserror::Error;

/// Errors raised while building or updating a menu.
///
/// Interaction itself never fails; these only guard the data handed in by
/// the surrounding UI.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MenuError {
    /// Two options in the same tree share an id.
    #[error("duplicate option id '{0}'")]
    DuplicateOptionId(String),

    /// An option was given an empty id.
    #[error("option '{label}' has an empty id")]
    EmptyOptionId {
        /// Label of the offending option.
        label: String,
    },

    /// A value was set that names no option in the tree.
    #[error("no option with id '{0}'")]
    UnknownOption(String),
}
