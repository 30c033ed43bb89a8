#[path = "property/round_trip.rs"]
mod round_trip;

#[path = "property/canonical_text.rs"]
mod canonical_text;
