pub mod base;
pub mod claude;
pub mod configs;

#[cfg(test)]
pub mod mock;
