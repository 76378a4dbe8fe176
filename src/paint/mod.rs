pub(crate) mod appliers;
