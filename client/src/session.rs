use alloy_primitives::{Address, U256};
use skilldao_common::contract::LedgerContract;
use skilldao_common::error::{CertError, CertResult};
use skilldao_common::wallet::WalletProvider;

/// A connected identity plus the contract handle it sends through.
///
/// Handlers receive this explicitly; holding one is the proof that a
/// state-mutating operation is allowed to run.
#[derive(Clone, Debug)]
pub struct Session<C> {
    identity: Address,
    contract: C,
}

impl<C: LedgerContract> Session<C> {
    pub fn new(identity: Address, contract: C) -> Self {
        Self { identity, contract }
    }

    pub fn identity(&self) -> Address {
        self.identity
    }

    pub fn contract(&self) -> &C {
        &self.contract
    }
}

/// What an identity update did to the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionChange {
    /// No session before; now bound to this identity.
    Connected(Address),
    /// The wallet moved to another account.
    Switched { from: Address, to: Address },
    /// The wallet reported no authorized identities.
    Disconnected,
    /// Same identity as before, or still disconnected.
    Unchanged,
}

/// Wallet connectivity: at most one active identity per client.
pub struct WalletSession<W: WalletProvider> {
    provider: Option<W>,
    contract_address: Address,
    active: Option<Session<W::Contract>>,
}

impl<W: WalletProvider> WalletSession<W> {
    /// `provider` is `None` when no compatible wallet is installed.
    pub fn new(provider: Option<W>, contract_address: Address) -> Self {
        Self {
            provider,
            contract_address,
            active: None,
        }
    }

    pub fn provider(&self) -> Option<&W> {
        self.provider.as_ref()
    }

    pub fn active(&self) -> Option<&Session<W::Contract>> {
        self.active.as_ref()
    }

    pub fn identity(&self) -> Option<Address> {
        self.active.as_ref().map(Session::identity)
    }

    pub fn is_connected(&self) -> bool {
        self.active.is_some()
    }

    /// Ask the wallet for authorization and bind the contract to the first
    /// identity it returns.
    pub async fn connect(&mut self) -> CertResult<SessionChange> {
        let provider = self.provider.as_ref().ok_or(CertError::ProviderUnavailable)?;
        tracing::debug!("Requesting identities from {}", provider.provider_name());
        let identities = provider.request_identities().await?;
        match identities.first() {
            Some(first) => Ok(self.activate(*first)),
            None => Err(CertError::Provider("wallet returned no identities".into())),
        }
    }

    /// Pick up an identity the wallet already authorized, without prompting.
    pub async fn restore(&mut self) -> CertResult<SessionChange> {
        let provider = self.provider.as_ref().ok_or(CertError::ProviderUnavailable)?;
        let identities = provider.current_identities().await?;
        Ok(self.identities_changed(&identities))
    }

    /// Apply an identity-change event from the wallet.
    ///
    /// An empty list disconnects. Otherwise the first identity replaces the
    /// active one in a single assignment, so no handler ever observes a
    /// half-updated session.
    pub fn identities_changed(&mut self, identities: &[Address]) -> SessionChange {
        match identities.first() {
            None => self.disconnect(),
            Some(next) => self.activate(*next),
        }
    }

    pub fn disconnect(&mut self) -> SessionChange {
        match self.active.take() {
            Some(_) => SessionChange::Disconnected,
            None => SessionChange::Unchanged,
        }
    }

    /// Balance of the active identity; `None` when disconnected.
    pub async fn balance(&self) -> CertResult<Option<U256>> {
        match (&self.provider, &self.active) {
            (Some(provider), Some(session)) => {
                provider.balance_of(session.identity()).await.map(Some)
            }
            _ => Ok(None),
        }
    }

    fn activate(&mut self, identity: Address) -> SessionChange {
        let Some(provider) = self.provider.as_ref() else {
            return SessionChange::Unchanged;
        };
        let previous = self.identity();
        if previous == Some(identity) {
            return SessionChange::Unchanged;
        }
        let contract = provider.bind_contract(self.contract_address);
        self.active = Some(Session::new(identity, contract));
        match previous {
            Some(from) => SessionChange::Switched { from, to: identity },
            None => SessionChange::Connected(identity),
        }
    }
}
