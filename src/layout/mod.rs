pub(crate) mod columns;
pub(crate) mod events;
pub(crate) mod year_index;
