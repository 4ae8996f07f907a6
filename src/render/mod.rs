pub(crate) mod filters;
pub(crate) mod frame;
pub(crate) mod painter;
