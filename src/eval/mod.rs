pub(crate) mod evaluator;
pub(crate) mod time;
