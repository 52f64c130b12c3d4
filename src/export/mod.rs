mod normalizer;
mod writer;

pub use normalizer::normalize;
pub use writer::DatabaseWriter;
