pub mod config;
pub mod error;
pub mod metrics;
pub mod net;
pub mod run;
pub mod sim;
pub mod stream;
pub mod topo;
pub mod viz;

#[cfg(test)]
mod test;
