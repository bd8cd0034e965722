pub(crate) mod blend;
pub(crate) mod blur;
pub(crate) mod compositor;
pub(crate) mod fit;
pub(crate) mod orient;
pub(crate) mod raster;
pub(crate) mod shadow;
