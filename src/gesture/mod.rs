pub(crate) mod controller;
pub(crate) mod hold;
pub(crate) mod slider;
