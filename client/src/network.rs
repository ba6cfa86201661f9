//! Cluster selection: resolves monikers like `devnet` to RPC endpoints and builds explorer links.

use std::{
    fmt,
    str::FromStr,
};

use anyhow::Context;
use solana_sdk::signature::Signature;
use url::{
    form_urlencoded,
    Url,
};

const LOCALNET_URL: &str = "http://127.0.0.1:8899";
const DEVNET_URL: &str = "https://api.devnet.solana.com";
const TESTNET_URL: &str = "https://api.testnet.solana.com";
const MAINNET_BETA_URL: &str = "https://api.mainnet-beta.solana.com";
const EXPLORER_URL: &str = "https://explorer.solana.com";

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum Network {
    #[default]
    Localnet,
    Devnet,
    Testnet,
    MainnetBeta,
    /// Any other JSON-RPC endpoint. Always an `http` or `https` URL with a host.
    Custom(Url),
}

impl Network {
    pub fn url(&self) -> &str {
        match self {
            Self::Localnet => LOCALNET_URL,
            Self::Devnet => DEVNET_URL,
            Self::Testnet => TESTNET_URL,
            Self::MainnetBeta => MAINNET_BETA_URL,
            Self::Custom(url) => url.as_str(),
        }
    }

    /// Whether the cluster hands out airdrops.
    pub fn has_faucet(&self) -> bool {
        !matches!(self, Self::MainnetBeta)
    }

    /// Link to a transaction on the Solana explorer, pointed at this cluster.
    pub fn explorer_tx_url(&self, signature: &Signature) -> String {
        let link = format!("{EXPLORER_URL}/tx/{signature}");
        match self.explorer_cluster_query() {
            Some(query) => format!("{link}?{query}"),
            None => link,
        }
    }

    fn explorer_cluster_query(&self) -> Option<String> {
        let mut query = form_urlencoded::Serializer::new(String::new());
        match self {
            Self::MainnetBeta => return None,
            Self::Devnet => query.append_pair("cluster", "devnet"),
            Self::Testnet => query.append_pair("cluster", "testnet"),
            Self::Localnet | Self::Custom(_) => query
                .append_pair("cluster", "custom")
                .append_pair("customUrl", self.url()),
        };
        Some(query.finish())
    }
}

fn parse_rpc_url(s: &str) -> anyhow::Result<Url> {
    let url = Url::parse(s).with_context(|| format!("`{s}` isn't a valid RPC URL"))?;
    if !matches!(url.scheme(), "http" | "https") {
        anyhow::bail!("`{s}` must use http or https");
    }
    if !url.has_host() {
        anyhow::bail!("`{s}` has no host");
    }
    Ok(url)
}

impl FromStr for Network {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let network = match s.to_ascii_lowercase().as_str() {
            "l" | "localnet" | "localhost" => Self::Localnet,
            "d" | "devnet" => Self::Devnet,
            "t" | "testnet" => Self::Testnet,
            "m" | "mainnet" | "mainnet-beta" => Self::MainnetBeta,
            moniker if !moniker.contains("://") => anyhow::bail!(
                "Unknown network `{s}`. Expected localnet, devnet, testnet, mainnet-beta or a URL."
            ),
            _ => Self::Custom(parse_rpc_url(s)?),
        };
        Ok(network)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Localnet => f.write_str("localnet"),
            Self::Devnet => f.write_str("devnet"),
            Self::Testnet => f.write_str("testnet"),
            Self::MainnetBeta => f.write_str("mainnet-beta"),
            Self::Custom(url) => f.write_str(url.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn custom(url: &str) -> Network {
        Network::Custom(Url::parse(url).unwrap())
    }

    #[test]
    fn parse_monikers() {
        assert_eq!("d".parse::<Network>().unwrap(), Network::Devnet);
        assert_eq!("Devnet".parse::<Network>().unwrap(), Network::Devnet);
        assert_eq!("t".parse::<Network>().unwrap(), Network::Testnet);
        assert_eq!("mainnet-beta".parse::<Network>().unwrap(), Network::MainnetBeta);
        assert_eq!("localhost".parse::<Network>().unwrap(), Network::Localnet);
        assert!("moonnet".parse::<Network>().is_err());
    }

    #[test]
    fn parse_custom_urls() {
        assert_eq!(
            "http://10.0.0.1:8899".parse::<Network>().unwrap(),
            custom("http://10.0.0.1:8899")
        );
        // Schemes are case-insensitive.
        assert_eq!(
            "HTTPS://api.devnet.solana.com".parse::<Network>().unwrap(),
            custom("https://api.devnet.solana.com")
        );
    }

    #[test]
    fn rejects_bad_urls() {
        assert!("http://".parse::<Network>().is_err());
        assert!("http://bad host".parse::<Network>().is_err());
        assert!("ftp://rpc.example".parse::<Network>().is_err());
        assert!("ws://rpc.example".parse::<Network>().is_err());
    }

    #[test]
    fn urls() {
        assert_eq!(Network::Localnet.url(), "http://127.0.0.1:8899");
        assert_eq!(Network::Devnet.url(), "https://api.devnet.solana.com");
        assert_eq!(custom("https://rpc.example/v1").url(), "https://rpc.example/v1");
    }

    #[test]
    fn explorer_links() {
        let sig = Signature::default();
        assert_eq!(
            Network::MainnetBeta.explorer_tx_url(&sig),
            format!("https://explorer.solana.com/tx/{sig}")
        );
        assert_eq!(
            Network::Devnet.explorer_tx_url(&sig),
            format!("https://explorer.solana.com/tx/{sig}?cluster=devnet")
        );
        assert_eq!(
            Network::Localnet.explorer_tx_url(&sig),
            format!(
                "https://explorer.solana.com/tx/{sig}?cluster=custom&customUrl=http%3A%2F%2F127.0.0.1%3A8899"
            )
        );
    }

    #[test]
    fn explorer_link_escapes_the_whole_custom_url() {
        let sig = Signature::default();
        let network = custom("http://10.0.0.1:8899/?api-key=a%2Bb#frag");
        assert_eq!(
            network.explorer_tx_url(&sig),
            format!(
                "https://explorer.solana.com/tx/{sig}?cluster=custom\
                 &customUrl=http%3A%2F%2F10.0.0.1%3A8899%2F%3Fapi-key%3Da%252Bb%23frag"
            )
        );
    }

    #[test]
    fn display_round_trips() {
        for network in [
            Network::Localnet,
            Network::Devnet,
            Network::Testnet,
            Network::MainnetBeta,
            custom("https://rpc.example"),
        ] {
            assert_eq!(network.to_string().parse::<Network>().unwrap(), network);
        }
    }
}
