// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates all the other layers to accomplish
// a specific goal.
//
// Rules for this layer:
//   - No ML math or model code here
//   - No printing here (that's Layer 1)
//   - Only workflow coordination
//
// Use cases:
//   train_use_case      — offline batch job producing artifacts
//   inference_adapter   — the four hosting hooks
//   invoke_use_case     — runs the hooks in order, in-process
//   endpoint_test       — smoke test against a live endpoint
//
// Reference: Clean Architecture pattern

// The training workflow and its quality gate
pub mod train_use_case;

// load_model / parse_input / predict / serialize_output
pub mod inference_adapter;

// A local host driving the adapter for one request
pub mod invoke_use_case;
