pub mod api_key;
pub mod basic_auth;
