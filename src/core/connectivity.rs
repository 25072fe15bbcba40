use crate::domain::ports::ConnectivityProbe;
use std::time::Duration;
use url::Url;

/// Treats the network as reachable when the endpoint's host resolves.
#[derive(Debug, Clone)]
pub struct DnsProbe {
    timeout: Duration,
}

impl DnsProbe {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for DnsProbe {
    fn default() -> Self {
        Self::new(Duration::from_secs(5))
    }
}

impl ConnectivityProbe for DnsProbe {
    async fn is_connected(&self, url: &str) -> bool {
        let Ok(parsed) = Url::parse(url) else {
            // a malformed URL is a fetch failure, not a connectivity one
            return true;
        };
        let (Some(host), Some(port)) = (parsed.host_str(), parsed.port_or_known_default()) else {
            return true;
        };

        let target = format!("{}:{}", host.trim_start_matches('[').trim_end_matches(']'), port);
        match tokio::time::timeout(self.timeout, tokio::net::lookup_host(target.clone())).await {
            Ok(Ok(mut addrs)) => addrs.next().is_some(),
            Ok(Err(e)) => {
                tracing::warn!("Could not resolve {}: {}", target, e);
                false
            }
            Err(_) => {
                tracing::warn!("Resolving {} timed out after {:?}", target, self.timeout);
                false
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysOnline;

impl ConnectivityProbe for AlwaysOnline {
    async fn is_connected(&self, _url: &str) -> bool {
        true
    }
}
