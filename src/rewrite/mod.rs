//! Schema qualification of table references

mod qualifier;
mod rules;

pub use qualifier::qualify;
pub use rules::QualifyRule;
