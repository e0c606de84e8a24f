pub mod address;
pub mod auth;
pub mod endpoint;
pub mod error;
pub mod name;
pub mod space;

pub use address::{Address, AddressBuilder, AddressStatus, AddressType};
pub use auth::{AuthenticationService, AuthenticationServiceType};
pub use endpoint::{EndpointSpec, EndpointStatus};
pub use error::ModelError;
pub use name::{sanitize_name, validate_name};
pub use space::{AddressSpace, AddressSpaceBuilder, AddressSpaceStatus};

/// Annotation carrying the platform user that created a resource.
pub const ANNOTATION_CREATED_BY: &str = "maas.io/created-by";

/// Label identifying the address space that owns a provisioned resource.
pub const LABEL_OWNER: &str = "maas.io/owner";

/// Label identifying the space type a provisioned resource belongs to.
pub const LABEL_SPACE_TYPE: &str = "maas.io/space-type";
