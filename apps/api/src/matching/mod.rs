pub mod engine;
pub mod handlers;
pub mod results;
pub mod scorer;
pub mod subscores;

#[cfg(test)]
pub(crate) mod test_fixtures;
