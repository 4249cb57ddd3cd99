pub mod annotation;
pub mod collection;
pub mod combiner;
pub mod date_format;
pub mod tag;
pub mod term;
pub mod term_type;
pub mod weights;

mod error;

pub use annotation::{Annotation, Point, Position};
pub use collection::{
	DocumentAnnotations, DocumentTags, DocumentTerms, TermVariant, UserAnnotations,
};
pub use combiner::{
	DefaultTermCombiner, PostProcessed, TermCombiner, TermIter, positive_terms, weighted,
};
pub use error::{Error, Result};
pub use tag::Tag;
pub use term::Term;
pub use term_type::TermType;
pub use weights::TermWeights;
