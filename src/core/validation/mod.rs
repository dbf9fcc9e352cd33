//! Attribute validators and the validation pass
//!
//! Validators are invoked per attribute while a model is being validated
//! before save. They append errors to the model and never abort the pass on
//! a validation failure.

pub mod mongo_id;
pub mod pipeline;
pub mod unique;
pub mod validators;

pub use mongo_id::MongoIdValidator;
pub use pipeline::{Rule, ValidationPipeline};
pub use unique::UniqueValidator;
pub use validators::{AttributeValidator, ValidationContext};
