pub mod component;
pub mod conversation;
pub mod generated;
pub mod rendered;
pub mod route_decision;
pub mod theme;
pub mod trip;
