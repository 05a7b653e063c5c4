pub(crate) mod date;
pub(crate) mod grouper;
pub(crate) mod model;
