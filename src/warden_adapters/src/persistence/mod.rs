pub mod in_memory_session_store;
pub mod in_memory_user_store;
pub mod in_memory_verification_token_store;
