pub(crate) mod guard;
/// Attribute keys and snapshot readers/writers.
pub mod schema;
