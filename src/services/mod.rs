pub mod chat_session;
pub mod dispatch_service;
pub mod json_recovery;
pub mod llm;
pub mod render_service;
pub mod synthesis_service;
pub mod theme_service;
pub mod travel_assistant;
