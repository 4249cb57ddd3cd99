use crate::TermType;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("No weight configured for {term_type}.")]
	MissingWeight { term_type: TermType },
	#[error("Weight for {term_type} must be a finite number.")]
	InvalidWeight { term_type: TermType },
	#[error("Term transform failed: {message}")]
	Transform { message: String },
}
