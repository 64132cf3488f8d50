pub mod measurement;
pub mod normalize;
pub mod summary;
pub mod training_set;
pub mod validate;
