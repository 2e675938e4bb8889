//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod credential;

#[allow(unused_imports)]
pub use credential::{
    ActiveModel as CredentialActiveModel, Entity as CredentialEntity, Model as CredentialModel,
};
