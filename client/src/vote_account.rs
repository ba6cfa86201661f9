use std::{
    fmt,
    path::Path,
    str::FromStr,
};

use anyhow::anyhow;
use solana_keypair::read_keypair_file;
use solana_sdk::{
    pubkey::Pubkey,
    signature::Keypair,
    signer::Signer,
};

/// Identifies the on-chain vote account. Carries the account's keypair when the caller has it,
/// which is only needed to sign the initialization that creates the account.
#[derive(Debug)]
pub struct VoteAccountHandle {
    address: Pubkey,
    keypair: Option<Keypair>,
}

impl VoteAccountHandle {
    pub fn from_address(address: Pubkey) -> Self {
        Self {
            address,
            keypair: None,
        }
    }

    pub fn from_keypair(keypair: Keypair) -> Self {
        Self {
            address: keypair.pubkey(),
            keypair: Some(keypair),
        }
    }

    /// Loads the handle from a keypair file if `source` names one, otherwise parses it as a base58
    /// address.
    pub fn from_path_or_address(source: &str) -> anyhow::Result<Self> {
        let path = Path::new(source);
        if path.is_file() {
            let keypair = read_keypair_file(path)
                .map_err(|e| anyhow!("Couldn't read vote account keypair {source}: {e}"))?;
            return Ok(Self::from_keypair(keypair));
        }

        Pubkey::from_str(source)
            .map(Self::from_address)
            .map_err(|_| anyhow!("`{source}` is neither a keypair file nor a valid address"))
    }

    pub fn address(&self) -> Pubkey {
        self.address
    }

    pub fn keypair(&self) -> Option<&Keypair> {
        self.keypair.as_ref()
    }
}

impl Clone for VoteAccountHandle {
    fn clone(&self) -> Self {
        Self {
            address: self.address,
            keypair: self.keypair.as_ref().map(Keypair::insecure_clone),
        }
    }
}

impl fmt::Display for VoteAccountHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_address() -> anyhow::Result<()> {
        let address = Pubkey::new_from_array([9; 32]);
        let handle = VoteAccountHandle::from_path_or_address(&address.to_string())?;
        assert_eq!(handle.address(), address);
        assert!(handle.keypair().is_none());
        Ok(())
    }

    #[test]
    fn rejects_garbage() {
        assert!(VoteAccountHandle::from_path_or_address("not-a-key").is_err());
    }

    #[test]
    fn keypair_handle_clones_signer() {
        let keypair = Keypair::new();
        let pubkey = keypair.pubkey();
        let handle = VoteAccountHandle::from_keypair(keypair).clone();
        assert_eq!(handle.address(), pubkey);
        assert_eq!(handle.keypair().map(|kp| kp.pubkey()), Some(pubkey));
    }
}
