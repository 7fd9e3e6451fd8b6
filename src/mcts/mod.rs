pub mod config;
pub mod rollout;
pub mod tree;

#[cfg(test)]
pub(crate) mod test_util;
