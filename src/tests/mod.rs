/*
 * Test Suite for the MLRR Simulator
 *
 * Crate-level suites that drive the engine end to end. Module-level unit
 * tests live next to the code they cover.
 *
 * ## Suites
 *
 * ### Scenarios
 * - `scenarios` - hand-traced runs: the three-process quantum-2 trace,
 *   zero-burst work, failing and scripted predictors, idle gaps, tie order,
 *   predictor feature vectors, log capture of fallbacks
 *
 * ### Invariants
 * - `invariants` - properties every finished run must satisfy, checked over
 *   a range of batches and predictors
 *
 * ### Support
 * - `support` - deterministic predictors and batch builders shared by the suites
 */

mod scenarios;
mod support;
