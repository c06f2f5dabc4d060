pub mod health;
pub mod list;
pub mod publish;
pub mod upload;
