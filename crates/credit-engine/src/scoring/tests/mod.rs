mod common;
mod scorecard;
