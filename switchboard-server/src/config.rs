use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Settings for the listener and the dispatcher.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Capacity of the dispatcher's command queue.
    pub command_buffer: usize,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3000,
            command_buffer: 100,
        }
    }
}
