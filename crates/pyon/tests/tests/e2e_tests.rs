#[path = "e2e/composite_round_trip.rs"]
mod composite_round_trip;

#[path = "e2e/specialized_round_trip.rs"]
mod specialized_round_trip;

#[path = "e2e/degraded_decoding.rs"]
mod degraded_decoding;

#[path = "e2e/persistence.rs"]
mod persistence;

#[path = "e2e/identifiers.rs"]
mod identifiers;
