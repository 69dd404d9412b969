//! JSON request/response surface for host applications.
//!
//! Every entry point takes a request string and returns the response string,
//! or an error string prefixed with a stable code (`E_...: message`).

pub mod json_api;

pub use json_api::{
    error_codes, generate_bracket_json, record_match_result_json, resolve_cpu_matches_json,
    simulate_game_json, BracketRequest, BracketResponse, GameRequest, GameResponse,
    MatchResultRequest, ResolveCpuRequest, SCHEMA_VERSION,
};
