//! Entities the onboarding flow creates: drafts, members, and the per-type
//! dispatch table that drives rendering, validation, and payload building.

pub mod kind;
pub mod model;

pub use kind::{FieldKind, InputKind, KindSpec, Mutation};
pub use model::{CreatedEntity, CreatedUser, EntityDraft, EntityType, MemberDraft, MemberRef, Role};
