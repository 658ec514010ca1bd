pub mod completion;
pub mod plan;
pub mod profile;
pub mod publish;
pub mod source;
