//! Interactive terminal input

pub mod prompts;
