pub mod bean;
pub mod connector;
pub mod element;
