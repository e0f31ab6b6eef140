//! LVM Storage Operator
//!
//! Readiness validation, requirements and manifests for the LVM storage
//! operator and its legacy ODF LVM predecessor.

pub mod manifests;
pub mod operator;
pub mod policy;
pub mod requirements;
pub mod validator;

pub use manifests::*;
pub use operator::*;
pub use policy::*;
pub use requirements::*;
pub use validator::*;
