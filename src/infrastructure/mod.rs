pub mod hooks;
pub mod parser;

#[cfg(test)]
pub mod test_utils;

pub use hooks::*;
pub use parser::*;
