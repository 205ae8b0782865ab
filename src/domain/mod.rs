pub(crate) mod collection;
pub(crate) mod idea;
pub(crate) mod validation;
