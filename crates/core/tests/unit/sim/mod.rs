//! Replay harness tests.
