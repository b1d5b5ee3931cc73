pub mod chat;
pub mod discovery;
pub mod email;
pub mod intake;
pub mod linkedin;
pub mod narration;
pub mod outreach;
pub mod workflow;
