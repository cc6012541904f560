pub mod init_data;
pub mod resolver;

pub use init_data::{InitDataVerifier, RejectReason, Verification, VerifiedIdentity};
pub use resolver::{AdminIdentity, AuthResolver};
