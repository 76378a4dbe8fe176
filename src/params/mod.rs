pub(crate) mod resolve;
pub(crate) mod schema;
pub(crate) mod universal;
pub(crate) mod value;
