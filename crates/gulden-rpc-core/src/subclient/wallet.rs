use std::collections::BTreeMap;
use std::sync::Arc;

use bitcoin::{Amount, SignedAmount};
use serde_json::{json, Map, Value};

use crate::address;
use crate::client::Dispatcher;
use crate::error::CoreError;
use crate::types::WalletInfo;

use super::{amount, flag, record, text};

/// Account selector covering every account in the wallet.
pub const ALL_ACCOUNTS: &str = "*";

/// Optional arguments shared by the payment commands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendOptions {
    pub comment: String,
    /// Note about the recipient, stored locally with the transaction.
    pub comment_to: String,
    pub subtract_fee_from_amount: bool,
}

/// Optional arguments of [`WalletClient::send_many`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendManyOptions {
    pub min_confirmations: u32,
    pub comment: String,
    /// Recipients that pay the fee between them. Each must also be a recipient.
    pub subtract_fee_from: Vec<String>,
}

impl Default for SendManyOptions {
    fn default() -> Self {
        Self {
            min_confirmations: 1,
            comment: String::new(),
            subtract_fee_from: Vec::new(),
        }
    }
}

/// Balances, addresses, and payments.
pub struct WalletClient {
    dispatcher: Arc<Dispatcher>,
}

impl WalletClient {
    pub(crate) fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    pub async fn abandon_transaction(&self, txid: &str) -> Result<(), CoreError> {
        self.dispatcher
            .command("abandontransaction", vec![json!(txid)])
            .await?;
        Ok(())
    }

    /// Copy the wallet file to `destination` on the node's filesystem.
    pub async fn backup_wallet(&self, destination: &str) -> Result<(), CoreError> {
        self.dispatcher
            .command("backupwallet", vec![json!(destination)])
            .await?;
        Ok(())
    }

    /// Balance of `account` ([`ALL_ACCOUNTS`] for the whole wallet).
    pub async fn get_balance(
        &self,
        account: &str,
        min_confirmations: u32,
        include_watch_only: bool,
    ) -> Result<SignedAmount, CoreError> {
        let result = self
            .dispatcher
            .command(
                "getbalance",
                vec![
                    json!(account),
                    json!(min_confirmations),
                    json!(include_watch_only),
                ],
            )
            .await?;
        amount("getbalance", &result)
    }

    pub async fn get_new_address(&self, account: &str) -> Result<String, CoreError> {
        let result = self
            .dispatcher
            .command("getnewaddress", vec![json!(account)])
            .await?;
        Ok(text(result))
    }

    pub async fn get_raw_change_address(&self) -> Result<String, CoreError> {
        let result = self
            .dispatcher
            .command("getrawchangeaddress", Vec::new())
            .await?;
        Ok(text(result))
    }

    pub async fn get_unconfirmed_balance(&self) -> Result<SignedAmount, CoreError> {
        let result = self
            .dispatcher
            .command("getunconfirmedbalance", Vec::new())
            .await?;
        amount("getunconfirmedbalance", &result)
    }

    pub async fn get_wallet_info(&self) -> Result<WalletInfo, CoreError> {
        let result = self
            .dispatcher
            .command("getwalletinfo", Vec::new())
            .await?;
        record("getwalletinfo", result)
    }

    /// Move funds between two accounts of this wallet (`move`).
    pub async fn move_funds(
        &self,
        from_account: &str,
        to_account: &str,
        amount: Amount,
        min_confirmations: u32,
        comment: &str,
    ) -> Result<bool, CoreError> {
        if amount == Amount::ZERO {
            return Err(CoreError::Input(format!(
                "can't move an amount of {amount} because it's not greater than 0"
            )));
        }

        let result = self
            .dispatcher
            .command(
                "move",
                vec![
                    json!(from_account),
                    json!(to_account),
                    json!(amount.to_btc()),
                    json!(min_confirmations),
                    json!(comment),
                ],
            )
            .await?;
        Ok(flag(&result))
    }

    /// Top up the key pool to `size` keys.
    pub async fn refill_key_pool(&self, size: u32) -> Result<(), CoreError> {
        self.dispatcher
            .command("keypoolrefill", vec![json!(size)])
            .await?;
        Ok(())
    }

    /// Pay several recipients in one transaction. Returns the txid.
    pub async fn send_many(
        &self,
        from_account: &str,
        recipients: &BTreeMap<String, Amount>,
        options: &SendManyOptions,
    ) -> Result<String, CoreError> {
        if recipients.is_empty() {
            return Err(CoreError::Input(
                "no addresses and amounts were defined".to_owned(),
            ));
        }

        let mut amounts = Map::with_capacity(recipients.len());
        for (recipient, amount) in recipients {
            if !address::validate_format(recipient) {
                return Err(CoreError::Input(format!(
                    "{recipient} does not appear to be a valid Gulden address"
                )));
            }
            if *amount == Amount::ZERO {
                return Err(CoreError::Input(format!(
                    "can't send {amount} to {recipient} because it's not greater than 0"
                )));
            }
            amounts.insert(recipient.clone(), json!(amount.to_btc()));
        }

        if let Some(stray) = options
            .subtract_fee_from
            .iter()
            .find(|address| !recipients.contains_key(*address))
        {
            return Err(CoreError::Input(format!(
                "can't subtract fee from {stray} because it's not listed as a recipient"
            )));
        }

        let result = self
            .dispatcher
            .command(
                "sendmany",
                vec![
                    json!(from_account),
                    Value::Object(amounts),
                    json!(options.min_confirmations),
                    json!(options.comment),
                    json!(options.subtract_fee_from),
                ],
            )
            .await?;
        Ok(text(result))
    }

    /// Pay `to_address` from the wallet's default account. Returns the txid.
    pub async fn send_to_address(
        &self,
        to_address: &str,
        amount: Amount,
        options: &SendOptions,
    ) -> Result<String, CoreError> {
        self.send_to_address_from_account("", to_address, amount, options)
            .await
    }

    pub async fn send_to_address_from_account(
        &self,
        from_account: &str,
        to_address: &str,
        amount: Amount,
        options: &SendOptions,
    ) -> Result<String, CoreError> {
        let result = self
            .dispatcher
            .command(
                "sendtoaddressfromaccount",
                vec![
                    json!(from_account),
                    json!(to_address),
                    json!(amount.to_btc()),
                    json!(options.comment),
                    json!(options.comment_to),
                    json!(options.subtract_fee_from_amount),
                ],
            )
            .await?;
        Ok(text(result))
    }

    /// Fee rate per kB for subsequent transactions.
    pub async fn set_transaction_fee(&self, fee_per_kb: Amount) -> Result<bool, CoreError> {
        let result = self
            .dispatcher
            .command("settxfee", vec![json!(fee_per_kb.to_btc())])
            .await?;
        Ok(flag(&result))
    }

    /// Sign `message` with the key of `address`. Returns the base64 signature.
    pub async fn sign_message(&self, address: &str, message: &str) -> Result<String, CoreError> {
        if !address::validate_format(address) {
            return Err(CoreError::Input(format!(
                "{address} does not appear to be a valid address"
            )));
        }

        let result = self
            .dispatcher
            .command("signmessage", vec![json!(address), json!(message)])
            .await?;
        Ok(text(result))
    }
}
