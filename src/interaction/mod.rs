pub(crate) mod camera;
pub(crate) mod focus;
pub(crate) mod selection;
pub(crate) mod zoom;
