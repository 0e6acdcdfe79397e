pub mod composer;
pub mod handlers;
pub mod prompts;
pub mod storage;
pub mod writer;
