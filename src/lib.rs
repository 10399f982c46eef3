//! Configuration parsers for the GFIPM BAE and Test data connectors of a
//! Shibboleth identity provider.
//!
//! Each parser turns a `DataConnector` element into a typed configuration and
//! a [`BeanDefinition`](model::bean::BeanDefinition) whose property names are
//! what the connector implementations are constructed from.

pub mod config;
pub mod model;
pub mod namespace;
pub mod output;
pub mod parsers;
pub mod rc_config;
pub mod result;
