pub mod auth_service;
pub mod error;
pub mod gig_service;
pub mod notification_service;
pub mod wallet_service;
