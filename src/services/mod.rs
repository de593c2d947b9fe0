pub mod catalog;
pub mod gemini_service;
pub mod places_service;
pub mod plan_service;
