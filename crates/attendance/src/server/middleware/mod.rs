pub mod bearer_validator;
