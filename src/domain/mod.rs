// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs, enums, and traits that define the core
// concepts of the pipeline.
//
// Rules for this layer:
//   - NO linfa / ndarray types allowed here
//   - NO file I/O or network calls
//   - Only plain Rust structs, enums, and traits
//
// The ML layer converts these types into ndarray matrices at
// its own boundary, so everything here can be unit tested
// without fitting a model.
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// Labelled training samples and the dataset they belong to
pub mod sample;

// The tabular structure handed to the model at inference time
pub mod table;

// The per-request prediction payload
pub mod prediction;

// Typed errors surfaced by the adapter and the quality gate
pub mod error;

// Core abstractions (traits) that other layers implement
pub mod traits;
