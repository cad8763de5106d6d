pub mod access;
pub mod admin;
pub mod applications;
pub mod identity;
pub mod jobs;
pub mod store;

#[cfg(test)]
mod tests;
