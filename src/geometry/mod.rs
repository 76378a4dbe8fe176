pub(crate) mod path;
pub(crate) mod point;
pub(crate) mod ring;
