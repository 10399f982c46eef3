pub mod bae;
pub mod credential;
pub mod data_connector;
pub mod element;
pub mod test_connector;
