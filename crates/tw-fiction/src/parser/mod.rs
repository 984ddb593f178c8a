//! Input tokenizing and command resolution.

mod resolver;
mod tokenizer;

pub use resolver::{CommandSet, Resolution, resolve};
pub use tokenizer::{CommandTokens, tokenize};
