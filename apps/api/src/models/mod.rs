pub mod chat;
pub mod employer;
pub mod intake;
pub mod linkedin;
pub mod outreach;
pub mod profile;
