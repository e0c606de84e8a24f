use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("required field not set: {0}")]
    MissingField(&'static str),

    #[error("invalid resource name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error(
        "address name must be on the form addressSpace.addressName: {0}"
    )]
    MalformedAddressName(String),

    #[error(
        "address space component of address name '{name}' does not match \
         owning space '{space}'"
    )]
    AddressSpaceMismatch { name: String, space: String },
}
