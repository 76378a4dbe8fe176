pub(crate) mod context;
pub(crate) mod cpu;
pub(crate) mod record;
