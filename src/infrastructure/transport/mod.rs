// HTTP adapters for the agents::transport::Transport port

pub mod http_transport;

pub use http_transport::HttpTransport;
