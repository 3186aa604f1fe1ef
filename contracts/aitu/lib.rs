#![cfg_attr(not(feature = "std"), no_std, no_main)]

mod age;

#[ink::contract]
mod aitu {
    use crate::age;
    use ink::prelude::string::String;
    use ink::storage::Mapping;

    pub const TOKEN_NAME: &str = "AITU_SE2324_KV";
    pub const TOKEN_SYMBOL: &str = "AITU";
    pub const TOKEN_DECIMALS: u8 = 18;

    pub type Result<T> = core::result::Result<T, Error>;

    #[derive(scale::Encode, scale::Decode, Debug, Clone, Copy, PartialEq, Eq)]
    #[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
    pub enum Error {
        NotOwner,
        InsufficientAllowance,
        InsufficientBalance,
        TimestampInFuture,
        Overflow,
    }

    impl Error {
        /// Caller lacks the privilege (ownership or allowance) for the call.
        pub fn is_authorization(&self) -> bool {
            matches!(self, Error::NotOwner | Error::InsufficientAllowance)
        }
    }

    impl core::fmt::Display for Error {
        fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
            let msg = match self {
                Error::NotOwner => "Only the owner can call this function",
                Error::InsufficientAllowance => "Insufficient allowance",
                Error::InsufficientBalance => "Insufficient balance",
                Error::TimestampInFuture => "Timestamp cannot be in the future",
                Error::Overflow => "Arithmetic overflow",
            };
            f.write_str(msg)
        }
    }

    /// Most recent successful transfer, direct or delegated.
    #[derive(scale::Encode, scale::Decode, Debug, Clone, Copy, PartialEq, Eq)]
    #[cfg_attr(
        feature = "std",
        derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout)
    )]
    pub struct LatestTransaction {
        pub sender: AccountId,
        pub receiver: AccountId,
        pub amount: Balance,
        /// Seconds since the epoch.
        pub timestamp: u64,
    }

    impl LatestTransaction {
        fn empty() -> Self {
            Self {
                sender: AccountId::from([0u8; 32]),
                receiver: AccountId::from([0u8; 32]),
                amount: 0,
                timestamp: 0,
            }
        }
    }

    #[ink(event)]
    pub struct Transferred {
        #[ink(topic)]
        from_acc: AccountId,
        #[ink(topic)]
        to_acc: AccountId,
        amount: Balance,
    }

    #[ink(event)]
    pub struct Minted {
        #[ink(topic)]
        to_acc: AccountId,
        amount: Balance,
    }

    #[ink(event)]
    pub struct Approved {
        #[ink(topic)]
        owner_acc: AccountId,
        #[ink(topic)]
        spender_acc: AccountId,
        amount: Balance,
    }

    #[ink(storage)]
    pub struct Aitu {
        // governance
        owner_acc: AccountId,

        // token state
        total_supply: Balance,
        balances: Mapping<AccountId, Balance>,
        allowances: Mapping<(AccountId, AccountId), Balance>,

        // depth-1 transfer history
        latest_tx: LatestTransaction,
    }

    impl Aitu {
        // -------- constructors --------

        #[ink(constructor)]
        pub fn new(
            initial_supply: Balance,
            initial_holder: AccountId,
            owner_acc: AccountId,
        ) -> Self {
            let mut balances = Mapping::default();
            balances.insert(&initial_holder, &initial_supply);
            if initial_supply > 0 {
                Self::env().emit_event(Minted { to_acc: initial_holder, amount: initial_supply });
            }
            Self {
                owner_acc,
                total_supply: initial_supply,
                balances,
                allowances: Mapping::default(),
                latest_tx: LatestTransaction::empty(),
            }
        }

        /// The deploying account receives the initial supply.
        #[ink(constructor)]
        pub fn new_for_caller(initial_supply: Balance, owner_acc: AccountId) -> Self {
            Self::new(initial_supply, Self::env().caller(), owner_acc)
        }

        // -------- modifiers (helpers) --------

        fn only_owner(&self) -> Result<()> {
            if self.env().caller() != self.owner_acc {
                return Err(Error::NotOwner)
            }
            Ok(())
        }

        // -------- read API --------

        #[ink(message)]
        pub fn token_name(&self) -> String {
            String::from(TOKEN_NAME)
        }

        #[ink(message)]
        pub fn token_symbol(&self) -> String {
            String::from(TOKEN_SYMBOL)
        }

        #[ink(message)]
        pub fn token_decimals(&self) -> u8 {
            TOKEN_DECIMALS
        }

        #[ink(message)]
        pub fn owner(&self) -> AccountId {
            self.owner_acc
        }

        #[ink(message)]
        pub fn total_supply(&self) -> Balance {
            self.total_supply
        }

        #[ink(message)]
        pub fn balance_of(&self, owner_acc: AccountId) -> Balance {
            self.balances.get(&owner_acc).unwrap_or(0)
        }

        #[ink(message)]
        pub fn allowance(&self, owner_acc: AccountId, spender_acc: AccountId) -> Balance {
            self.allowances.get(&(owner_acc, spender_acc)).unwrap_or(0)
        }

        #[ink(message)]
        pub fn latest_transaction(&self) -> LatestTransaction {
            self.latest_tx
        }

        /// Age of `timestamp` (seconds) relative to the current block.
        #[ink(message)]
        pub fn timestamp_to_string(&self, timestamp: u64) -> Result<String> {
            age::timestamp_to_string(timestamp, self.now_secs()).ok_or(Error::TimestampInFuture)
        }

        #[ink(message)]
        pub fn latest_transaction_age(&self) -> Result<String> {
            self.timestamp_to_string(self.latest_tx.timestamp)
        }

        // -------- write API --------

        #[ink(message)]
        pub fn mint(&mut self, to_acc: AccountId, amount: Balance) -> Result<()> {
            self.only_owner()?;
            let new_total = self.total_supply.checked_add(amount).ok_or(Error::Overflow)?;
            let new_to = self.balance_of(to_acc).checked_add(amount).ok_or(Error::Overflow)?;

            self.total_supply = new_total;
            self.balances.insert(&to_acc, &new_to);
            self.env().emit_event(Minted { to_acc, amount });
            Ok(())
        }

        #[ink(message)]
        pub fn transfer(&mut self, to_acc: AccountId, amount: Balance) -> Result<()> {
            let from_acc = self.env().caller();
            let moved = self.checked_move(from_acc, to_acc, amount)?;
            self.commit_move(from_acc, to_acc, amount, moved);
            Ok(())
        }

        /// Sets (not adds to) the allowance of `spender_acc` over the caller's funds.
        #[ink(message)]
        pub fn approve(&mut self, spender_acc: AccountId, amount: Balance) -> Result<()> {
            let owner_acc = self.env().caller();
            self.allowances.insert(&(owner_acc, spender_acc), &amount);
            self.env().emit_event(Approved { owner_acc, spender_acc, amount });
            Ok(())
        }

        #[ink(message)]
        pub fn transfer_from(
            &mut self,
            from_acc: AccountId,
            to_acc: AccountId,
            amount: Balance,
        ) -> Result<()> {
            let caller_acc = self.env().caller();
            let current_allow = self.allowance(from_acc, caller_acc);
            if current_allow < amount {
                return Err(Error::InsufficientAllowance)
            }
            let moved = self.checked_move(from_acc, to_acc, amount)?;

            let new_allow = current_allow.checked_sub(amount).ok_or(Error::Overflow)?;
            self.allowances.insert(&(from_acc, caller_acc), &new_allow);
            self.commit_move(from_acc, to_acc, amount, moved);
            Ok(())
        }

        // ---- internals ----

        fn now_secs(&self) -> u64 {
            // block time is reported in milliseconds
            self.env().block_timestamp() / 1_000
        }

        /// Validates a move and returns the resulting (from, to) balances
        /// without touching storage.
        fn checked_move(
            &self,
            from_acc: AccountId,
            to_acc: AccountId,
            amount: Balance,
        ) -> Result<(Balance, Balance)> {
            let from_bal = self.balance_of(from_acc);
            if from_bal < amount {
                return Err(Error::InsufficientBalance)
            }
            if from_acc == to_acc {
                return Ok((from_bal, from_bal))
            }
            let new_from = from_bal.checked_sub(amount).ok_or(Error::Overflow)?;
            let new_to = self.balance_of(to_acc).checked_add(amount).ok_or(Error::Overflow)?;
            Ok((new_from, new_to))
        }

        fn commit_move(
            &mut self,
            from_acc: AccountId,
            to_acc: AccountId,
            amount: Balance,
            (new_from, new_to): (Balance, Balance),
        ) {
            self.balances.insert(&from_acc, &new_from);
            self.balances.insert(&to_acc, &new_to);
            self.env().emit_event(Transferred { from_acc, to_acc, amount });
            self.record_transfer(from_acc, to_acc, amount);
        }

        fn record_transfer(&mut self, sender: AccountId, receiver: AccountId, amount: Balance) {
            self.latest_tx = LatestTransaction {
                sender,
                receiver,
                amount,
                timestamp: self.now_secs(),
            };
        }
    }


}
