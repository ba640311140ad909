pub mod contracts;
pub mod enrichment;
pub mod entities;
pub mod generation;
pub mod inflight;
pub mod ports;
pub mod prompts;
pub mod reference_ranges;
pub mod schema;
pub mod services;
pub mod value_objects;

#[cfg(test)]
pub(crate) mod test_support;
