/*
 * Services module aggregator. Six cooperating components, leaves-first:
 * envelope building and filter parsing have no dependencies on the
 * others; pagination and index projection build on the models; the
 * artifact writer and cache orchestrator sit on top of all of them.
 */

pub mod artifact_writer;
pub mod cache_orchestrator;
pub mod envelope_builder;
pub mod filter_parser;
pub mod index_projector;
pub mod paginator;

pub use artifact_writer::ArtifactWriter;
pub use cache_orchestrator::CacheOrchestrator;
pub use envelope_builder::EnvelopeBuilder;
pub use filter_parser::FilterParser;
pub use index_projector::IndexProjector;
pub use paginator::Paginator;
