pub mod auth_service;
pub mod friend_service;
pub mod gateway;
pub mod leave_service;
pub mod transfer_service;
