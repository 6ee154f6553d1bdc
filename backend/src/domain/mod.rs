//! Transport-agnostic domain model: entities, drafts, patches, field
//! validation, and the ports implemented by outbound adapters.

pub mod address;
pub mod error;
pub mod facility;
pub mod manager;
pub mod owner;
pub mod ports;
pub mod role;
pub mod staff;
pub mod states;
pub mod trainer;
pub mod validation;

pub use address::{Address, AddressInput, AddressPatch};
pub use error::{DomainError, ErrorCode};
pub use facility::{Facility, FacilityDraft, FacilityPatch, FacilityUpdate};
pub use manager::{Manager, ManagerDraft, ManagerPatch};
pub use owner::{Owner, OwnerDraft, OwnerPatch};
pub use role::Role;
pub use staff::{Staff, StaffDraft, StaffDraftInput, StaffPatch, StaffPatchInput};
pub use trainer::{Trainer, TrainerDraft, TrainerDraftInput, TrainerPatch, TrainerPatchInput};
pub use validation::{Email, FieldError, ValidationErrors};
