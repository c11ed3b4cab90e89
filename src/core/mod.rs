pub mod duplicate;
pub mod extract;
pub mod hash;
pub mod image;
pub mod report;
pub mod scanner;

#[cfg(test)]
pub(crate) mod test_support;
