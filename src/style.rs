pub(crate) mod compositor;
pub(crate) mod raster;
pub(crate) mod state;
pub(crate) mod svg;
