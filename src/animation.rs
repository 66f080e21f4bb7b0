pub(crate) mod ease;
pub(crate) mod registry;
pub(crate) mod scheduler;
pub(crate) mod settings;
